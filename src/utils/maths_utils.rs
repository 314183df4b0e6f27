use statrs::statistics::Statistics;
use std::f64;

/// Logistic squashing of a single value: `1 / (1 + exp(-k * x))`.
///
/// `exp` overflows to `inf` for large negative `k * x`, which gives exactly 0.0,
/// and underflows to 0.0 for large positive `k * x`, which gives exactly 1.0.
/// Nothing here can panic.
#[inline]
pub fn logistic_scalar(x: f64, k: f64) -> f64 {
    1.0 / (1.0 + (-k * x).exp())
}

/// Elementwise logistic squashing. Output lies in (0, 1) for moderate input and
/// saturates to the closed bounds at extreme magnitudes.
pub fn logistic(values: &[f64], k: f64) -> Vec<f64> {
    values.iter().map(|&x| logistic_scalar(x, k)).collect()
}

/// Standard score `(x - mean) / std` using the sample standard deviation (n - 1).
///
/// Returns all zeros (same length) when the column is constant, has fewer than
/// two values, or contains anything non-finite.
pub fn zscore(values: &[f64]) -> Vec<f64> {
    if values.iter().any(|x| !x.is_finite()) {
        return vec![0.0; values.len()];
    }

    let mean = values.mean();
    let std = values.std_dev();

    if std == 0.0 || !std.is_finite() {
        return vec![0.0; values.len()];
    }

    values.iter().map(|&x| (x - mean) / std).collect()
}

/// log1p followed by z-score. This is the normalizer every pipeline shares.
pub fn log1p_zscore(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let logs: Vec<f64> = values.iter().map(|x| x.ln_1p()).collect();
    let z = zscore(&logs);
    (logs, z)
}

/// Ordinary least-squares fit of `y = slope * x + intercept`.
///
/// * Fewer than 2 points: `(0.0, y[0])`, or `(0.0, 0.0)` when `y` is empty.
/// * Non-finite pairs are dropped; fewer than 2 left gives `(0.0, 0.0)`.
/// * All remaining `x` identical: `(0.0, mean(y))`.
pub fn linear_trend(x: &[f64], y: &[f64]) -> (f64, f64) {
    if x.len() < 2 {
        return (0.0, y.first().copied().unwrap_or(0.0));
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .unzip();

    if xs.len() < 2 {
        return (0.0, 0.0);
    }

    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;

    // Centre on the means: years around 2000 squared lose precision otherwise.
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (a, b) in xs.iter().zip(ys.iter()) {
        let dx = a - x_mean;
        sxx += dx * dx;
        sxy += dx * (b - y_mean);
    }

    if sxx == 0.0 {
        return (0.0, y_mean);
    }

    let slope = sxy / sxx;
    (slope, y_mean - slope * x_mean)
}

/// Percentile `q` (0..=100, clamped) with linear interpolation between the
/// closest ranks. Empty input gives NaN.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    if sorted.len() == 1 {
        return sorted[0];
    }

    let clamped = q.clamp(0.0, 100.0) / 100.0;
    let max_index = (sorted.len() - 1) as f64;
    let position = clamped * max_index;
    let lower_index = position.floor() as usize;
    let upper_index = position.ceil() as usize;

    if lower_index == upper_index {
        sorted[lower_index]
    } else {
        let lower_value = sorted[lower_index];
        let upper_value = sorted[upper_index];
        let weight = position - lower_index as f64;
        lower_value + (upper_value - lower_value) * weight
    }
}

/// Pearson correlation coefficient. `None` for fewer than two points, length
/// mismatch, or a column without variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let sx = x.std_dev();
    let sy = y.std_dev();
    if !(sx > 0.0 && sy > 0.0) || !sx.is_finite() || !sy.is_finite() {
        return None;
    }

    let cov = x.covariance(y);
    let r = cov / (sx * sy);
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Arithmetic mean, `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.mean())
    }
}
