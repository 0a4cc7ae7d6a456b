use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Default annual risk-free benchmark rate (12% a.a.)
pub const DEFAULT_RISK_FREE_RATE: Decimal = dec!(0.12);

/// Default transaction cost rate applied to rebalancing notionals (0.3%)
pub const DEFAULT_TRANSACTION_COST_RATE: Decimal = dec!(0.003);

/// Weight deviations below this band produce no rebalancing action
pub const DEFAULT_REBALANCE_TOLERANCE: Decimal = dec!(0.01);

/// Rebalancing notionals below this size are not worth executing
pub const DEFAULT_MIN_TRANSACTION_VALUE: Decimal = dec!(100);

/// Days used when compounding a holding-period return to a year
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Minimum joint observations required to report a correlation pair
pub const MIN_CORRELATION_OBSERVATIONS: usize = 3;

/// Sector label for positions whose asset cannot be resolved
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// Decimal precision for monetary and percentage display values
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for ratios (Sharpe, correlation coefficients)
pub const RATIO_DECIMAL_PRECISION: u32 = 3;
