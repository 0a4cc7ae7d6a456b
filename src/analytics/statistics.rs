use rust_decimal::{Decimal, MathematicalOps};

/// Pearson correlation coefficient between two equally sized series.
///
/// Returns 0 when the series lengths differ, fewer than two observations are
/// available, or either series has zero variance.
pub fn pearson_correlation(xs: &[Decimal], ys: &[Decimal]) -> Decimal {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Decimal::ZERO;
    }

    let count = Decimal::from(xs.len());
    let mean_x = xs.iter().copied().sum::<Decimal>() / count;
    let mean_y = ys.iter().copied().sum::<Decimal>() / count;

    let mut sum_xy = Decimal::ZERO;
    let mut sum_x2 = Decimal::ZERO;
    let mut sum_y2 = Decimal::ZERO;

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sum_xy += dx * dy;
        sum_x2 += dx * dx;
        sum_y2 += dy * dy;
    }

    let denominator = (sum_x2 * sum_y2).sqrt().unwrap_or(Decimal::ZERO);
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    sum_xy / denominator
}
