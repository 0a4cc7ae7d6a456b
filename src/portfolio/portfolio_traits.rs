use rust_decimal::Decimal;

use super::portfolio_model::{NewPortfolio, NewPosition, Portfolio, PortfolioUpdate, Position};
use crate::errors::Result;

/// Trait defining the contract for Portfolio repository operations.
#[async_trait::async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Portfolio>>;
    fn get_by_id(&self, portfolio_id: &str) -> Result<Option<Portfolio>>;
    fn get_position(&self, position_id: &str) -> Result<Option<Position>>;
    async fn create(&self, portfolio: Portfolio) -> Result<Portfolio>;
    async fn update(&self, portfolio_id: &str, update: PortfolioUpdate) -> Result<Portfolio>;
    async fn delete(&self, portfolio_id: &str) -> Result<()>;
    async fn add_position(&self, portfolio_id: &str, position: Position) -> Result<Position>;
    async fn update_position(&self, position: Position) -> Result<Position>;
    async fn remove_position(&self, position_id: &str) -> Result<()>;
}

/// Trait defining the contract for Portfolio service operations.
///
/// `calculate_total_value` and `calculate_return_percent` form the valuation
/// layer every analytics operation builds on; both return full-precision
/// values and leave presentation rounding to the caller.
#[async_trait::async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    fn get_portfolios(&self) -> Result<Vec<Portfolio>>;
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio>;
    async fn update_portfolio(
        &self,
        portfolio_id: &str,
        update: PortfolioUpdate,
    ) -> Result<Portfolio>;
    async fn delete_portfolio(&self, portfolio_id: &str) -> Result<()>;
    async fn add_position(&self, portfolio_id: &str, new_position: NewPosition)
        -> Result<Position>;
    async fn update_position(
        &self,
        position_id: &str,
        update: NewPosition,
    ) -> Result<Position>;
    async fn remove_position(&self, position_id: &str) -> Result<()>;
    fn calculate_total_value(&self, portfolio: &Portfolio) -> Result<Decimal>;
    fn calculate_return_percent(&self, portfolio: &Portfolio) -> Result<Decimal>;
}
