use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::assets_errors::AssetError;
use super::assets_model::{Asset, NewAsset, PricePoint};
use super::assets_traits::{AssetRepositoryTrait, AssetServiceTrait};
use crate::errors::Result;

/// Service for managing the asset catalog
pub struct AssetService {
    repository: Arc<dyn AssetRepositoryTrait>,
}

impl AssetService {
    /// Creates a new AssetService instance
    pub fn new(repository: Arc<dyn AssetRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AssetServiceTrait for AssetService {
    /// Lists all assets
    fn get_assets(&self) -> Result<Vec<Asset>> {
        self.repository.list()
    }

    /// Retrieves an asset by its symbol (case-insensitive)
    fn get_asset_by_symbol(&self, symbol: &str) -> Result<Asset> {
        self.repository
            .get_by_symbol(symbol)?
            .ok_or_else(|| AssetError::NotFound(format!("Asset '{}' not found", symbol)).into())
    }

    /// Creates a new asset, rejecting duplicate symbols
    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset> {
        new_asset.validate()?;
        let symbol = new_asset.normalized_symbol();
        if self.repository.exists_by_symbol(&symbol)? {
            return Err(AssetError::AlreadyExists(format!(
                "Asset with symbol '{}' already exists",
                symbol
            ))
            .into());
        }
        debug!("Creating asset {}", symbol);
        self.repository.insert(new_asset).await
    }

    /// Updates an asset's current price
    async fn update_asset_price(&self, symbol: &str, price: Decimal) -> Result<Asset> {
        if price <= Decimal::ZERO {
            return Err(
                AssetError::InvalidData("Price must be greater than zero".to_string()).into(),
            );
        }
        self.repository.update_price(symbol, price).await
    }

    /// Replaces the historical price series for a symbol
    async fn save_price_history(&self, symbol: &str, series: Vec<PricePoint>) -> Result<()> {
        if !self.repository.exists_by_symbol(symbol)? {
            return Err(AssetError::NotFound(format!("Asset '{}' not found", symbol)).into());
        }
        self.repository.save_price_history(symbol, series).await
    }

    /// Deletes an asset and its price history
    async fn delete_asset(&self, symbol: &str) -> Result<()> {
        self.repository.delete(symbol).await
    }
}
