//! Measurement helpers used by the scenario and integration tests.

use num_complex::Complex64;

/// Nearest `{±1 ± i}` QPSK constellation point to `sample`.
pub fn nearest_constellation_point(sample: Complex64) -> Complex64 {
    let re = if sample.re >= 0.0 { 1.0 } else { -1.0 };
    let im = if sample.im >= 0.0 { 1.0 } else { -1.0 };
    Complex64::new(re, im)
}

/// Mean Euclidean distance of `symbols` to their nearest constellation point.
pub fn mean_distance_to_constellation(symbols: &[Complex64]) -> f64 {
    if symbols.is_empty() {
        return 0.0;
    }
    symbols.iter().map(|s| (s - nearest_constellation_point(*s)).norm()).sum::<f64>() / symbols.len() as f64
}

/// Mean distance computed over successive non-overlapping windows of
/// `window` symbols each.
pub fn windowed_mean_distances(symbols: &[Complex64], window: usize) -> Vec<f64> {
    symbols.chunks(window).map(mean_distance_to_constellation).collect()
}

/// True if the sequence is non-increasing within `tolerance` slack,
/// comparing each window's mean distance against the running minimum
/// of everything seen so far.
pub fn trends_downward(values: &[f64], tolerance: f64) -> bool {
    if values.len() < 2 {
        return true;
    }
    let mut running_min = values[0];
    for &v in &values[1..] {
        if v > running_min + tolerance {
            return false;
        }
        running_min = running_min.min(v);
    }
    true
}
