use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::assets::{NewAsset, PricePoint};
use crate::portfolio::NewPosition;

/// Seed file contents: an asset catalog, portfolios with their positions, and
/// historical price series keyed by symbol.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub assets: Vec<NewAsset>,
    #[serde(default)]
    pub portfolios: Vec<SeedPortfolio>,
    #[serde(default)]
    pub price_history: HashMap<String, Vec<PricePoint>>,
}

/// A portfolio row in the seed file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeedPortfolio {
    pub name: String,
    pub user_id: String,
    pub total_investment: Decimal,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub positions: Vec<NewPosition>,
}

/// Counts of what a seed load inserted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub assets: usize,
    pub portfolios: usize,
    pub positions: usize,
    pub price_series: usize,
}
