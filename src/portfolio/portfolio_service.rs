use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use super::portfolio_errors::PortfolioError;
use super::portfolio_model::{NewPortfolio, NewPosition, Portfolio, PortfolioUpdate, Position};
use super::portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use crate::assets::AssetRepositoryTrait;
use crate::errors::Result;

/// Service for managing portfolios and valuing them against current prices
pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
}

impl PortfolioService {
    /// Creates a new PortfolioService instance
    pub fn new(
        repository: Arc<dyn PortfolioRepositoryTrait>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            asset_repository,
        }
    }
}

#[async_trait::async_trait]
impl PortfolioServiceTrait for PortfolioService {
    fn get_portfolios(&self) -> Result<Vec<Portfolio>> {
        self.repository.list()
    }

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.repository.get_by_id(portfolio_id)?.ok_or_else(|| {
            PortfolioError::NotFound(format!("Portfolio '{}' not found", portfolio_id)).into()
        })
    }

    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        new_portfolio.validate()?;
        debug!("Creating portfolio '{}'", new_portfolio.name);
        self.repository.create(new_portfolio.into()).await
    }

    async fn update_portfolio(
        &self,
        portfolio_id: &str,
        update: PortfolioUpdate,
    ) -> Result<Portfolio> {
        if update.name.trim().is_empty() {
            return Err(
                PortfolioError::InvalidData("Portfolio name cannot be empty".to_string()).into(),
            );
        }
        self.repository.update(portfolio_id, update).await
    }

    async fn delete_portfolio(&self, portfolio_id: &str) -> Result<()> {
        self.repository.delete(portfolio_id).await
    }

    async fn add_position(
        &self,
        portfolio_id: &str,
        new_position: NewPosition,
    ) -> Result<Position> {
        new_position.validate()?;
        // Ensure the portfolio exists before attaching the position
        self.get_portfolio(portfolio_id)?;
        self.repository
            .add_position(portfolio_id, new_position.into_position(portfolio_id))
            .await
    }

    async fn update_position(&self, position_id: &str, update: NewPosition) -> Result<Position> {
        update.validate()?;
        let existing = self.repository.get_position(position_id)?.ok_or_else(|| {
            PortfolioError::PositionNotFound(format!("Position '{}' not found", position_id))
        })?;
        let updated = Position {
            asset_symbol: update.asset_symbol.trim().to_uppercase(),
            quantity: update.quantity,
            average_price: update.average_price,
            target_allocation: update.target_allocation,
            ..existing
        };
        self.repository.update_position(updated).await
    }

    async fn remove_position(&self, position_id: &str) -> Result<()> {
        self.repository.remove_position(position_id).await
    }

    /// Sums `quantity * current_price` over all positions.
    ///
    /// Positions whose symbol is not in the asset catalog contribute nothing;
    /// missing price data is tolerated, not fatal.
    fn calculate_total_value(&self, portfolio: &Portfolio) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for position in &portfolio.positions {
            if let Some(asset) = self.asset_repository.get_by_symbol(&position.asset_symbol)? {
                total += Decimal::from(position.quantity) * asset.current_price;
            }
        }
        Ok(total)
    }

    /// Percentage return over the invested capital; 0 when the invested
    /// capital is not positive.
    fn calculate_return_percent(&self, portfolio: &Portfolio) -> Result<Decimal> {
        if portfolio.total_investment <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        let total_value = self.calculate_total_value(portfolio)?;
        Ok((total_value - portfolio.total_investment) / portfolio.total_investment * dec!(100))
    }
}
