//! Numerically stable summation helpers (spec.md §4.5): fusion sums a
//! handful of small weighted terms, but pairwise/compensated summation
//! is cheap and removes an entire class of floating-point drift bugs.

/// Kahan-compensated summation. More accurate than a naive fold for the
/// short weighted sums fusion produces, at negligible cost.
pub fn safe_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0f64;
    let mut compensation = 0.0f64;
    for value in values {
        let y = value - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Weighted mean of `values` against `weights`, `0.0` if all weights sum
/// to zero.
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let weight_sum = safe_sum(weights.iter().copied());
    if weight_sum <= 0.0 {
        return 0.0;
    }
    let numerator = safe_sum(values.iter().zip(weights).map(|(v, w)| v * w));
    numerator / weight_sum
}

/// Weighted standard deviation of `values` around `mean`, `0.0` if all
/// weights sum to zero or there is a single data point.
pub fn weighted_std_dev(values: &[f64], weights: &[f64], mean: f64) -> f64 {
    let weight_sum = safe_sum(weights.iter().copied());
    if weight_sum <= 0.0 {
        return 0.0;
    }
    let variance = safe_sum(
        values
            .iter()
            .zip(weights)
            .map(|(v, w)| w * (v - mean) * (v - mean)),
    ) / weight_sum;
    variance.max(0.0).sqrt()
}
