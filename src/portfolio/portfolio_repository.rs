use chrono::Utc;
use dashmap::DashMap;

use super::portfolio_errors::PortfolioError;
use super::portfolio_model::{Portfolio, PortfolioUpdate, Position};
use super::portfolio_traits::PortfolioRepositoryTrait;
use crate::errors::Result;

/// In-memory portfolio store keyed by portfolio id.
///
/// Positions live inside their portfolio record, so removing a portfolio
/// removes its positions with it.
#[derive(Default)]
pub struct InMemoryPortfolioRepository {
    portfolios: DashMap<String, Portfolio>,
}

impl InMemoryPortfolioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_owner(&self, position_id: &str) -> Option<String> {
        self.portfolios.iter().find_map(|entry| {
            entry
                .value()
                .positions
                .iter()
                .any(|p| p.id == position_id)
                .then(|| entry.key().clone())
        })
    }
}

#[async_trait::async_trait]
impl PortfolioRepositoryTrait for InMemoryPortfolioRepository {
    fn list(&self) -> Result<Vec<Portfolio>> {
        let mut portfolios: Vec<Portfolio> = self
            .portfolios
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        portfolios.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(portfolios)
    }

    fn get_by_id(&self, portfolio_id: &str) -> Result<Option<Portfolio>> {
        Ok(self
            .portfolios
            .get(portfolio_id)
            .map(|entry| entry.value().clone()))
    }

    fn get_position(&self, position_id: &str) -> Result<Option<Position>> {
        Ok(self.portfolios.iter().find_map(|entry| {
            entry
                .value()
                .positions
                .iter()
                .find(|p| p.id == position_id)
                .cloned()
        }))
    }

    async fn create(&self, portfolio: Portfolio) -> Result<Portfolio> {
        self.portfolios
            .insert(portfolio.id.clone(), portfolio.clone());
        Ok(portfolio)
    }

    async fn update(&self, portfolio_id: &str, update: PortfolioUpdate) -> Result<Portfolio> {
        let mut entry = self.portfolios.get_mut(portfolio_id).ok_or_else(|| {
            PortfolioError::NotFound(format!("Portfolio '{}' not found", portfolio_id))
        })?;
        entry.name = update.name;
        entry.total_investment = update.total_investment;
        Ok(entry.value().clone())
    }

    async fn delete(&self, portfolio_id: &str) -> Result<()> {
        self.portfolios.remove(portfolio_id).ok_or_else(|| {
            PortfolioError::NotFound(format!("Portfolio '{}' not found", portfolio_id))
        })?;
        Ok(())
    }

    async fn add_position(&self, portfolio_id: &str, position: Position) -> Result<Position> {
        let mut entry = self.portfolios.get_mut(portfolio_id).ok_or_else(|| {
            PortfolioError::NotFound(format!("Portfolio '{}' not found", portfolio_id))
        })?;
        entry.positions.push(position.clone());
        Ok(position)
    }

    async fn update_position(&self, position: Position) -> Result<Position> {
        let owner = self.find_owner(&position.id).ok_or_else(|| {
            PortfolioError::PositionNotFound(format!("Position '{}' not found", position.id))
        })?;
        let mut entry = self
            .portfolios
            .get_mut(&owner)
            .ok_or_else(|| PortfolioError::NotFound(format!("Portfolio '{}' not found", owner)))?;
        let existing = entry
            .positions
            .iter_mut()
            .find(|p| p.id == position.id)
            .ok_or_else(|| {
                PortfolioError::PositionNotFound(format!("Position '{}' not found", position.id))
            })?;
        *existing = Position {
            last_transaction: Utc::now(),
            ..position.clone()
        };
        Ok(existing.clone())
    }

    async fn remove_position(&self, position_id: &str) -> Result<()> {
        let owner = self.find_owner(position_id).ok_or_else(|| {
            PortfolioError::PositionNotFound(format!("Position '{}' not found", position_id))
        })?;
        if let Some(mut entry) = self.portfolios.get_mut(&owner) {
            entry.positions.retain(|p| p.id != position_id);
        }
        Ok(())
    }
}
