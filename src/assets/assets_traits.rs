use rust_decimal::Decimal;

use super::assets_model::{Asset, NewAsset, PricePoint};
use crate::errors::Result;

/// Trait defining the contract for Asset repository operations.
///
/// Reads are synchronous; the analytics engine uses `get_by_symbol` and
/// `get_price_history` as its pricing gateway and treats an absent asset as
/// "no data", never as an error.
#[async_trait::async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    fn get_by_symbol(&self, symbol: &str) -> Result<Option<Asset>>;
    fn get_price_history(&self, symbol: &str) -> Result<Option<Vec<PricePoint>>>;
    fn list(&self) -> Result<Vec<Asset>>;
    fn exists_by_symbol(&self, symbol: &str) -> Result<bool>;
    async fn insert(&self, new_asset: NewAsset) -> Result<Asset>;
    async fn update_price(&self, symbol: &str, price: Decimal) -> Result<Asset>;
    async fn save_price_history(&self, symbol: &str, series: Vec<PricePoint>) -> Result<()>;
    async fn delete(&self, symbol: &str) -> Result<()>;
}

/// Trait defining the contract for Asset service operations.
#[async_trait::async_trait]
pub trait AssetServiceTrait: Send + Sync {
    fn get_assets(&self) -> Result<Vec<Asset>>;
    fn get_asset_by_symbol(&self, symbol: &str) -> Result<Asset>;
    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset>;
    async fn update_asset_price(&self, symbol: &str, price: Decimal) -> Result<Asset>;
    async fn save_price_history(&self, symbol: &str, series: Vec<PricePoint>) -> Result<()>;
    async fn delete_asset(&self, symbol: &str) -> Result<()>;
}
