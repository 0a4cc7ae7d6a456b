use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

use super::analytics_constants::{
    DAYS_PER_YEAR, DISPLAY_DECIMAL_PRECISION, MIN_CORRELATION_OBSERVATIONS,
    RATIO_DECIMAL_PRECISION, UNKNOWN_SECTOR,
};
use super::analytics_model::{
    AnalyticsConfig, AssetCorrelation, CorrelationResult, DiversificationResult,
    PerformanceResult, RebalancingAction, RebalancingResult, RiskAnalysisResult, SectorWeight,
    TradeAction,
};
use super::analytics_traits::PortfolioAnalyticsServiceTrait;
use super::statistics::pearson_correlation;
use crate::assets::AssetRepositoryTrait;
use crate::errors::Result;
use crate::portfolio::{Portfolio, PortfolioServiceTrait};

const SECONDS_PER_DAY: Decimal = dec!(86400);

/// Computes derived analytics over a portfolio snapshot and current prices.
///
/// All operations are read-only; the pricing gateway (asset repository) is the
/// only collaborator consulted beyond the snapshot itself.
pub struct PortfolioAnalyticsService {
    portfolio_service: Arc<dyn PortfolioServiceTrait>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    config: AnalyticsConfig,
}

impl PortfolioAnalyticsService {
    /// Creates a new PortfolioAnalyticsService instance
    pub fn new(
        portfolio_service: Arc<dyn PortfolioServiceTrait>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        config: AnalyticsConfig,
    ) -> Self {
        Self {
            portfolio_service,
            asset_repository,
            config,
        }
    }

    /// Market values of the positions whose symbol resolves; unresolvable
    /// positions are skipped, not zero-filled.
    fn resolved_position_values(&self, portfolio: &Portfolio) -> Result<Vec<Decimal>> {
        let mut values = Vec::with_capacity(portfolio.positions.len());
        for position in &portfolio.positions {
            if let Some(asset) = self.asset_repository.get_by_symbol(&position.asset_symbol)? {
                values.push(Decimal::from(position.quantity) * asset.current_price);
            }
        }
        Ok(values)
    }

    /// Compounds a holding-period return to a 365-day year.
    ///
    /// Amplifies small returns when the holding period is short; callers get
    /// large magnitudes in that regime, not an error. The compounding step runs
    /// in f64 because short periods push the factor outside Decimal's range.
    fn annualized_return(total_return_percent: Decimal, created_at: DateTime<Utc>) -> Decimal {
        let elapsed = Utc::now() - created_at;
        let days = Decimal::from(elapsed.num_seconds()) / SECONDS_PER_DAY;
        if days <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let base = Decimal::ONE + total_return_percent / dec!(100);
        if base <= Decimal::ZERO {
            // A total loss (or worse) has no real fractional power
            return Decimal::ZERO;
        }

        let exponent = (DAYS_PER_YEAR / days).to_f64().unwrap_or(0.0);
        let factor = base.to_f64().unwrap_or(0.0).powf(exponent);
        Decimal::from_f64(factor - 1.0).unwrap_or(Decimal::ZERO)
    }
}

impl PortfolioAnalyticsServiceTrait for PortfolioAnalyticsService {
    /// Total and annualized return over the portfolio's invested capital
    fn performance(&self, portfolio: &Portfolio) -> Result<PerformanceResult> {
        let total_value = self.portfolio_service.calculate_total_value(portfolio)?;
        let total_return = self.portfolio_service.calculate_return_percent(portfolio)?;
        let annualized = Self::annualized_return(total_return, portfolio.created_at);

        Ok(PerformanceResult {
            portfolio: portfolio.name.clone(),
            total_investment: portfolio.total_investment,
            current_value: total_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            total_return_percent: total_return.round_dp(DISPLAY_DECIMAL_PRECISION),
            annualized_return_percent: (annualized * dec!(100))
                .round_dp(DISPLAY_DECIMAL_PRECISION),
        })
    }

    /// Volatility, Sharpe ratio and largest-position concentration.
    ///
    /// The volatility figure is the coefficient of variation of position
    /// market values: a cross-sectional measure of how unevenly the portfolio
    /// is sized, not a time-series return volatility.
    fn risk_analysis(&self, portfolio: &Portfolio) -> Result<RiskAnalysisResult> {
        let values = self.resolved_position_values(portfolio)?;

        let mut mean = Decimal::ZERO;
        let mut variance = Decimal::ZERO;
        if !values.is_empty() {
            let count = Decimal::from(values.len());
            mean = values.iter().copied().sum::<Decimal>() / count;
            variance = values
                .iter()
                .map(|&v| (v - mean) * (v - mean))
                .sum::<Decimal>()
                / count;
        }
        let volatility = if mean > Decimal::ZERO {
            variance.sqrt().unwrap_or(Decimal::ZERO) / mean
        } else {
            Decimal::ZERO
        };

        let total_return = self.portfolio_service.calculate_return_percent(portfolio)? / dec!(100);
        let sharpe = if volatility > Decimal::ZERO {
            (total_return - self.config.risk_free_rate) / volatility
        } else {
            Decimal::ZERO
        };

        let total_value = self.portfolio_service.calculate_total_value(portfolio)?;
        let concentration = match values.iter().copied().max() {
            Some(largest) if total_value > Decimal::ZERO => largest / total_value * dec!(100),
            _ => Decimal::ZERO,
        };

        Ok(RiskAnalysisResult {
            portfolio: portfolio.name.clone(),
            volatility_percent: (volatility * dec!(100)).round_dp(DISPLAY_DECIMAL_PRECISION),
            sharpe_ratio: sharpe.round_dp(RATIO_DECIMAL_PRECISION),
            largest_asset_concentration_percent: concentration
                .round_dp(DISPLAY_DECIMAL_PRECISION),
        })
    }

    /// Buy/sell suggestions for positions that drifted off their target
    /// allocation, net of transaction costs.
    ///
    /// Suggestions keep position iteration order; deviations inside the
    /// tolerance band and notionals below the minimum transaction size are
    /// skipped.
    fn rebalancing(&self, portfolio: &Portfolio) -> Result<RebalancingResult> {
        let total_value = self.portfolio_service.calculate_total_value(portfolio)?;
        let mut suggested_actions = Vec::new();

        for position in &portfolio.positions {
            let asset = match self.asset_repository.get_by_symbol(&position.asset_symbol)? {
                Some(asset) => asset,
                None => continue,
            };

            let current_value = Decimal::from(position.quantity) * asset.current_price;
            let current_weight = if total_value > Decimal::ZERO {
                current_value / total_value
            } else {
                Decimal::ZERO
            };
            let deviation = current_weight - position.target_allocation;

            if deviation.abs() < self.config.rebalance_tolerance {
                continue;
            }
            let rebalance_value = deviation.abs() * total_value;
            if rebalance_value < self.config.min_transaction_value {
                continue;
            }

            let cost = rebalance_value * self.config.transaction_cost_rate;
            suggested_actions.push(RebalancingAction {
                asset: position.asset_symbol.clone(),
                action: if deviation > Decimal::ZERO {
                    TradeAction::Sell
                } else {
                    TradeAction::Buy
                },
                value: (rebalance_value - cost).round_dp(DISPLAY_DECIMAL_PRECISION),
                transaction_cost: cost.round_dp(DISPLAY_DECIMAL_PRECISION),
            });
        }

        debug!(
            "Rebalancing '{}': {} suggestion(s)",
            portfolio.name,
            suggested_actions.len()
        );

        Ok(RebalancingResult {
            portfolio: portfolio.name.clone(),
            total_value: total_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            is_balanced: suggested_actions.is_empty(),
            suggested_actions,
        })
    }

    /// Sector-weight breakdown; positions with no resolvable asset are grouped
    /// under the "Unknown" sector rather than dropped.
    fn diversification(&self, portfolio: &Portfolio) -> Result<DiversificationResult> {
        let total_value = self.portfolio_service.calculate_total_value(portfolio)?;

        let mut sector_values: HashMap<String, Decimal> = HashMap::new();
        for position in &portfolio.positions {
            let (sector, value) = match self
                .asset_repository
                .get_by_symbol(&position.asset_symbol)?
            {
                Some(asset) => (
                    asset.sector,
                    Decimal::from(position.quantity) * asset.current_price,
                ),
                None => (UNKNOWN_SECTOR.to_string(), Decimal::ZERO),
            };
            *sector_values.entry(sector).or_default() += value;
        }

        let mut sectors: Vec<SectorWeight> = sector_values
            .into_iter()
            .map(|(sector, value)| {
                let percent = if total_value > Decimal::ZERO {
                    value / total_value * dec!(100)
                } else {
                    Decimal::ZERO
                };
                SectorWeight {
                    sector,
                    value: value.round_dp(DISPLAY_DECIMAL_PRECISION),
                    percent: percent.round_dp(DISPLAY_DECIMAL_PRECISION),
                }
            })
            .collect();
        // Heaviest sector first; name tiebreak keeps the order reproducible
        sectors.sort_by(|a, b| b.percent.cmp(&a.percent).then_with(|| a.sector.cmp(&b.sector)));

        Ok(DiversificationResult {
            portfolio: portfolio.name.clone(),
            total_value: total_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            sectors,
        })
    }

    /// Pearson correlation for every unordered pair of distinct symbols held.
    ///
    /// Series are matched by date; pairs with fewer than three joint
    /// observations, or with a missing history, are omitted from the result.
    fn correlations(&self, portfolio: &Portfolio) -> Result<CorrelationResult> {
        let mut symbols: Vec<&str> = Vec::new();
        for position in &portfolio.positions {
            if !symbols.contains(&position.asset_symbol.as_str()) {
                symbols.push(&position.asset_symbol);
            }
        }

        let mut correlations = Vec::new();
        for i in 0..symbols.len() {
            let history_a = match self.asset_repository.get_price_history(symbols[i])? {
                Some(history) => history,
                None => continue,
            };
            for j in (i + 1)..symbols.len() {
                let history_b = match self.asset_repository.get_price_history(symbols[j])? {
                    Some(history) => history,
                    None => continue,
                };

                let prices_b: HashMap<NaiveDate, Decimal> = history_b
                    .iter()
                    .map(|point| (point.date, point.price))
                    .collect();

                let mut xs = Vec::new();
                let mut ys = Vec::new();
                for point in &history_a {
                    if let Some(&price_b) = prices_b.get(&point.date) {
                        xs.push(point.price);
                        ys.push(price_b);
                    }
                }

                if xs.len() < MIN_CORRELATION_OBSERVATIONS {
                    continue;
                }

                correlations.push(AssetCorrelation {
                    asset_a: symbols[i].to_string(),
                    asset_b: symbols[j].to_string(),
                    correlation_coefficient: pearson_correlation(&xs, &ys)
                        .round_dp(RATIO_DECIMAL_PRECISION),
                });
            }
        }

        Ok(CorrelationResult {
            portfolio: portfolio.name.clone(),
            correlations,
        })
    }
}
