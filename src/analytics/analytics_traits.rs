use super::analytics_model::{
    CorrelationResult, DiversificationResult, PerformanceResult, RebalancingResult,
    RiskAnalysisResult,
};
use crate::errors::Result;
use crate::portfolio::Portfolio;

/// Trait defining the contract for portfolio analytics operations.
///
/// Every operation is a pure, synchronous computation over the portfolio
/// snapshot it is given; nothing here mutates state or caches results.
/// Missing price data degrades the result (positions are skipped, pairs are
/// omitted) instead of failing.
pub trait PortfolioAnalyticsServiceTrait: Send + Sync {
    fn performance(&self, portfolio: &Portfolio) -> Result<PerformanceResult>;
    fn risk_analysis(&self, portfolio: &Portfolio) -> Result<RiskAnalysisResult>;
    fn rebalancing(&self, portfolio: &Portfolio) -> Result<RebalancingResult>;
    fn diversification(&self, portfolio: &Portfolio) -> Result<DiversificationResult>;
    fn correlations(&self, portfolio: &Portfolio) -> Result<CorrelationResult>;
}
