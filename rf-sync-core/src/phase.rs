//! Phase wrapping shared by every loop in the core.

use std::f64::consts::{PI, TAU};

/// Wrap a phase (radians) into the principal cycle `(-π, π]`.
///
/// Every loop folds its phase accumulator through this function after
/// each update so that φ never grows without bound.
pub fn principal_cycle(phase: f64) -> f64 {
    let wrapped = phase - TAU * ((phase + PI) / TAU).floor();
    // The floor-based formula maps -π itself to -π, not +π; re-fold the
    // single excluded endpoint so the range is exactly (-π, π].
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
