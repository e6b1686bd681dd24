//! Host-facing configuration and normalization helpers.
//!
//! Every frequency the core consumes internally is normalized: cycles
//! per sample (`fnor`) or radians per sample (`omega`). Absolute
//! frequencies only appear at the boundary a host crosses before
//! handing values to a loop; these free functions are that boundary.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Convert an absolute frequency in Hz to cycles/sample.
pub fn abs_to_nor(f_abs_hz: f64, sample_rate_hz: f64) -> f64 {
    f_abs_hz / sample_rate_hz
}

/// Convert a period in seconds to symbols/sample (a normalized baud).
pub fn period_to_nor(period_s: f64, sample_rate_hz: f64) -> f64 {
    1.0 / (period_s * sample_rate_hz)
}

/// Convert a normalized frequency (cycles/sample) to radians/sample.
pub fn nor_to_angular(fnor: f64) -> f64 {
    TAU * fnor
}

/// Convert radians/sample back to cycles/sample.
pub fn angular_to_nor(omega: f64) -> f64 {
    omega / TAU
}

/// Settable limits for the clock detector's baud estimate, `bmin <= bmax`.
///
/// Construction is the only place this invariant is checked; once built,
/// `bmin`/`bmax` are plain fields a caller can read back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaudLimits {
    pub bmin: f64,
    pub bmax: f64,
}

impl BaudLimits {
    pub fn new(bmin: f64, bmax: f64) -> crate::errors::Result<Self> {
        if bmin > bmax {
            return Err(crate::errors::ConfigError::BaudLimitsInverted { bmin, bmax }.into());
        }
        Ok(Self { bmin, bmax })
    }

    pub fn clamp(&self, bnor: f64) -> f64 {
        bnor.clamp(self.bmin, self.bmax)
    }
}

/// Damping factor used throughout the loop-coefficient derivations.
/// ζ = √2/2 (critical damping), per spec.
pub const CRITICAL_DAMPING: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Threshold above (and at) which the Costas arm filter is realized as an
/// FIR brick-wall design instead of an IIR Butterworth section.
pub const FIR_ORDER_THRESHOLD: usize = 20;
