use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;

use super::assets_errors::AssetError;
use super::assets_model::{Asset, NewAsset, PricePoint};
use crate::errors::Result;

/// In-memory asset store keyed by normalized (uppercase) symbol.
///
/// Serves as the pricing gateway for the analytics engine; durable persistence
/// lives outside this crate behind the same trait.
#[derive(Default)]
pub struct InMemoryAssetRepository {
    assets: DashMap<String, Asset>,
    price_histories: DashMap<String, Vec<PricePoint>>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(symbol: &str) -> String {
        symbol.trim().to_uppercase()
    }
}

#[async_trait::async_trait]
impl super::assets_traits::AssetRepositoryTrait for InMemoryAssetRepository {
    fn get_by_symbol(&self, symbol: &str) -> Result<Option<Asset>> {
        Ok(self
            .assets
            .get(&Self::normalize(symbol))
            .map(|entry| entry.value().clone()))
    }

    fn get_price_history(&self, symbol: &str) -> Result<Option<Vec<PricePoint>>> {
        Ok(self
            .price_histories
            .get(&Self::normalize(symbol))
            .map(|entry| entry.value().clone()))
    }

    fn list(&self) -> Result<Vec<Asset>> {
        let mut assets: Vec<Asset> = self
            .assets
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        assets.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(assets)
    }

    fn exists_by_symbol(&self, symbol: &str) -> Result<bool> {
        Ok(self.assets.contains_key(&Self::normalize(symbol)))
    }

    async fn insert(&self, new_asset: NewAsset) -> Result<Asset> {
        let asset: Asset = new_asset.into();
        self.assets.insert(asset.symbol.clone(), asset.clone());
        Ok(asset)
    }

    async fn update_price(&self, symbol: &str, price: Decimal) -> Result<Asset> {
        let key = Self::normalize(symbol);
        let mut entry = self
            .assets
            .get_mut(&key)
            .ok_or_else(|| AssetError::NotFound(format!("Asset '{}' not found", key)))?;
        entry.current_price = price;
        entry.last_updated = Utc::now();
        Ok(entry.value().clone())
    }

    async fn save_price_history(&self, symbol: &str, series: Vec<PricePoint>) -> Result<()> {
        self.price_histories.insert(Self::normalize(symbol), series);
        Ok(())
    }

    async fn delete(&self, symbol: &str) -> Result<()> {
        let key = Self::normalize(symbol);
        self.assets
            .remove(&key)
            .ok_or_else(|| AssetError::NotFound(format!("Asset '{}' not found", key)))?;
        self.price_histories.remove(&key);
        Ok(())
    }
}
