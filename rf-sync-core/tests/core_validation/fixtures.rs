//! Synthetic tone and symbol generators shared by the scenario tests.

use num_complex::Complex64;
use std::f64::consts::TAU;

/// An ideal unmodulated complex tone at normalized frequency `fnor`.
pub fn unmodulated_tone(fnor: f64, n: usize) -> Vec<Complex64> {
    (0..n).map(|i| Complex64::from_polar(1.0, TAU * fnor * i as f64)).collect()
}

/// BPSK constellation, alternating every `samples_per_symbol` samples,
/// riding an unmodulated carrier at `fnor`.
pub fn bpsk_burst(fnor: f64, samples_per_symbol: usize, n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|i| {
            let symbol = if (i / samples_per_symbol) % 2 == 0 { 1.0 } else { -1.0 };
            Complex64::new(symbol, 0.0) * Complex64::from_polar(1.0, TAU * fnor * i as f64)
        })
        .collect()
}

/// QPSK constellation, cycling through all four points every
/// `samples_per_symbol` samples, riding an unmodulated carrier at `fnor`.
pub fn qpsk_burst(fnor: f64, samples_per_symbol: usize, n: usize) -> Vec<Complex64> {
    let points = [
        Complex64::new(1.0, 1.0),
        Complex64::new(-1.0, 1.0),
        Complex64::new(-1.0, -1.0),
        Complex64::new(1.0, -1.0),
    ];
    (0..n)
        .map(|i| {
            let symbol = points[(i / samples_per_symbol) % points.len()];
            symbol * Complex64::from_polar(1.0, TAU * fnor * i as f64)
        })
        .collect()
}
