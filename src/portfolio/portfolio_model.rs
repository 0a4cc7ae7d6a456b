use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::portfolio_errors::{PortfolioError, Result};

/// Domain model representing a user's investment portfolio.
///
/// A portfolio owns its positions; a position never outlives its portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub total_investment: Decimal,
    pub created_at: DateTime<Utc>,
    pub positions: Vec<Position>,
}

/// A holding of one asset inside a portfolio.
///
/// `asset_symbol` references the asset catalog; it does not own the asset.
/// `target_allocation` is the desired fraction of total portfolio value in
/// [0, 1]. Target allocations across a portfolio conventionally sum to at most
/// 1, but that is not enforced; the analytics tolerate over- and
/// under-allocated portfolios.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub portfolio_id: String,
    pub asset_symbol: String,
    pub quantity: i64,
    pub average_price: Decimal,
    pub target_allocation: Decimal,
    pub last_transaction: DateTime<Utc>,
}

/// Input model for creating a new portfolio
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    pub name: String,
    pub user_id: String,
    pub total_investment: Decimal,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewPortfolio {
    /// Validates the new portfolio data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PortfolioError::InvalidData(
                "Portfolio name cannot be empty".to_string(),
            ));
        }
        if self.user_id.trim().is_empty() {
            return Err(PortfolioError::InvalidData(
                "Portfolio user id cannot be empty".to_string(),
            ));
        }
        if self.total_investment <= Decimal::ZERO {
            return Err(PortfolioError::InvalidData(
                "Total investment must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<NewPortfolio> for Portfolio {
    fn from(new_portfolio: NewPortfolio) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: new_portfolio.name,
            user_id: new_portfolio.user_id,
            total_investment: new_portfolio.total_investment,
            created_at: new_portfolio.created_at.unwrap_or_else(Utc::now),
            positions: Vec::new(),
        }
    }
}

/// Input model for updating a portfolio's editable fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    pub name: String,
    pub total_investment: Decimal,
}

/// Input model for adding a position to a portfolio
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub asset_symbol: String,
    pub quantity: i64,
    pub average_price: Decimal,
    pub target_allocation: Decimal,
}

impl NewPosition {
    /// Validates the new position data
    pub fn validate(&self) -> Result<()> {
        if self.asset_symbol.trim().is_empty() {
            return Err(PortfolioError::InvalidData(
                "Position asset symbol cannot be empty".to_string(),
            ));
        }
        if self.quantity <= 0 {
            return Err(PortfolioError::InvalidData(
                "Position quantity must be greater than zero".to_string(),
            ));
        }
        if self.average_price <= Decimal::ZERO {
            return Err(PortfolioError::InvalidData(
                "Position average price must be greater than zero".to_string(),
            ));
        }
        if self.target_allocation < Decimal::ZERO || self.target_allocation > Decimal::ONE {
            return Err(PortfolioError::InvalidData(
                "Target allocation must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_position(self, portfolio_id: &str) -> Position {
        Position {
            id: uuid::Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            asset_symbol: self.asset_symbol.trim().to_uppercase(),
            quantity: self.quantity,
            average_price: self.average_price,
            target_allocation: self.target_allocation,
            last_transaction: Utc::now(),
        }
    }
}
