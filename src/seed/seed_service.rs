use log::info;
use std::path::Path;
use std::sync::Arc;

use super::seed_model::{SeedData, SeedSummary};
use crate::assets::AssetServiceTrait;
use crate::errors::Result;
use crate::portfolio::{NewPortfolio, PortfolioServiceTrait};

/// Loads seed data (assets, portfolios, price histories) through the services,
/// so seed rows go through the same validation as any other input.
pub struct SeedService {
    asset_service: Arc<dyn AssetServiceTrait>,
    portfolio_service: Arc<dyn PortfolioServiceTrait>,
}

impl SeedService {
    /// Creates a new SeedService instance
    pub fn new(
        asset_service: Arc<dyn AssetServiceTrait>,
        portfolio_service: Arc<dyn PortfolioServiceTrait>,
    ) -> Self {
        Self {
            asset_service,
            portfolio_service,
        }
    }

    /// Loads seed data from a JSON file
    pub async fn load_from_file(&self, path: impl AsRef<Path>) -> Result<SeedSummary> {
        let json = std::fs::read_to_string(path)?;
        self.load_from_str(&json).await
    }

    /// Loads seed data from a JSON string
    pub async fn load_from_str(&self, json: &str) -> Result<SeedSummary> {
        let data: SeedData = serde_json::from_str(json)?;
        self.load(data).await
    }

    /// Inserts the parsed seed data, assets first so portfolio positions and
    /// price histories can reference them.
    pub async fn load(&self, data: SeedData) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();

        for new_asset in data.assets {
            self.asset_service.create_asset(new_asset).await?;
            summary.assets += 1;
        }

        for (symbol, series) in data.price_history {
            self.asset_service
                .save_price_history(&symbol, series)
                .await?;
            summary.price_series += 1;
        }

        for seed_portfolio in data.portfolios {
            let portfolio = self
                .portfolio_service
                .create_portfolio(NewPortfolio {
                    name: seed_portfolio.name,
                    user_id: seed_portfolio.user_id,
                    total_investment: seed_portfolio.total_investment,
                    created_at: seed_portfolio.created_at,
                })
                .await?;
            summary.portfolios += 1;

            for new_position in seed_portfolio.positions {
                self.portfolio_service
                    .add_position(&portfolio.id, new_position)
                    .await?;
                summary.positions += 1;
            }
        }

        info!(
            "Seed load complete: {} assets, {} price series, {} portfolios, {} positions",
            summary.assets, summary.price_series, summary.portfolios, summary.positions
        );
        Ok(summary)
    }
}
