use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::analytics_constants::{
    DEFAULT_MIN_TRANSACTION_VALUE, DEFAULT_REBALANCE_TOLERANCE, DEFAULT_RISK_FREE_RATE,
    DEFAULT_TRANSACTION_COST_RATE,
};

/// Tunable policy values for the analytics engine, injected at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    pub risk_free_rate: Decimal,
    pub transaction_cost_rate: Decimal,
    pub rebalance_tolerance: Decimal,
    pub min_transaction_value: Decimal,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            transaction_cost_rate: DEFAULT_TRANSACTION_COST_RATE,
            rebalance_tolerance: DEFAULT_REBALANCE_TOLERANCE,
            min_transaction_value: DEFAULT_MIN_TRANSACTION_VALUE,
        }
    }
}

/// Total and annualized return for a portfolio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResult {
    pub portfolio: String,
    pub total_investment: Decimal,
    pub current_value: Decimal,
    pub total_return_percent: Decimal,
    pub annualized_return_percent: Decimal,
}

/// Volatility, Sharpe ratio and concentration for a portfolio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysisResult {
    pub portfolio: String,
    pub volatility_percent: Decimal,
    pub sharpe_ratio: Decimal,
    pub largest_asset_concentration_percent: Decimal,
}

/// Direction of a suggested rebalancing trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
        }
    }
}

/// A single buy/sell suggestion; `value` is net of the transaction cost
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingAction {
    pub asset: String,
    pub action: TradeAction,
    pub value: Decimal,
    pub transaction_cost: Decimal,
}

/// Deviation-from-target suggestions for a portfolio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingResult {
    pub portfolio: String,
    pub total_value: Decimal,
    pub is_balanced: bool,
    pub suggested_actions: Vec<RebalancingAction>,
}

/// Value held in one sector and its share of the portfolio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectorWeight {
    pub sector: String,
    pub value: Decimal,
    pub percent: Decimal,
}

/// Sector-weight breakdown for a portfolio, heaviest sector first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiversificationResult {
    pub portfolio: String,
    pub total_value: Decimal,
    pub sectors: Vec<SectorWeight>,
}

/// Pearson correlation between two assets' historical price series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetCorrelation {
    pub asset_a: String,
    pub asset_b: String,
    pub correlation_coefficient: Decimal,
}

/// Pairwise correlations across the distinct assets of a portfolio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    pub portfolio: String,
    pub correlations: Vec<AssetCorrelation>,
}
