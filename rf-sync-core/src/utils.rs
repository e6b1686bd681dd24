//! Boundary conversions between a host's raw sample buffers and the
//! complex samples every loop in this crate operates on.
//!
//! Bit-level framing, symbol-to-bit slicing, and FEC are out of scope
//! here; this module only bridges the real/imaginary interleaving a
//! WAV reader or a raw I/Q capture hands a host, nothing more.

use num_complex::Complex64;

/// Interpret `[i0, q0, i1, q1, ...]` as a sequence of complex samples.
/// Panics if `data.len()` is odd.
pub fn complex_from_interleaved(data: &[f64]) -> Vec<Complex64> {
    assert!(data.len() % 2 == 0, "interleaved I/Q buffer must have an even length");
    data.chunks_exact(2).map(|chunk| Complex64::new(chunk[0], chunk[1])).collect()
}

/// Flatten complex samples back into `[i0, q0, i1, q1, ...]`.
pub fn interleaved_from_complex(data: &[Complex64]) -> Vec<f64> {
    data.iter().flat_map(|c| [c.re, c.im]).collect()
}
