pub(crate) mod analytics_constants;
pub(crate) mod analytics_model;
pub(crate) mod analytics_service;
pub(crate) mod analytics_traits;
pub(crate) mod statistics;

// Re-export the public interface
pub use analytics_constants::*;
pub use analytics_model::{
    AnalyticsConfig, AssetCorrelation, CorrelationResult, DiversificationResult,
    PerformanceResult, RebalancingAction, RebalancingResult, RiskAnalysisResult, SectorWeight,
    TradeAction,
};
pub use analytics_service::PortfolioAnalyticsService;
pub use analytics_traits::PortfolioAnalyticsServiceTrait;
pub use statistics::pearson_correlation;

#[cfg(test)]
pub(crate) mod tests;
