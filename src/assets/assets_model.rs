use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::assets_errors::{AssetError, Result};

/// Domain model representing a priced asset in the catalog.
///
/// The symbol is the asset's identity; it is unique case-insensitively and
/// stored normalized to uppercase.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub asset_type: String,
    pub sector: String,
    pub current_price: Decimal,
    pub last_updated: DateTime<Utc>,
}

/// Input model for creating a new asset
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub symbol: String,
    pub name: String,
    pub asset_type: String,
    pub sector: String,
    pub current_price: Decimal,
}

impl NewAsset {
    /// Validates the new asset data
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(AssetError::InvalidData(
                "Asset symbol cannot be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(AssetError::InvalidData(
                "Asset name cannot be empty".to_string(),
            ));
        }
        if self.current_price <= Decimal::ZERO {
            return Err(AssetError::InvalidData(
                "Asset price must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalized symbol used as the catalog key.
    pub fn normalized_symbol(&self) -> String {
        self.symbol.trim().to_uppercase()
    }
}

impl From<NewAsset> for Asset {
    fn from(new_asset: NewAsset) -> Self {
        let symbol = new_asset.normalized_symbol();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol,
            name: new_asset.name,
            asset_type: new_asset.asset_type,
            sector: new_asset.sector,
            current_price: new_asset.current_price,
            last_updated: Utc::now(),
        }
    }
}

/// A single observation in an asset's historical price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Decimal,
}
