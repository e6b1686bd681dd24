//! Host-observable telemetry snapshot.
//!
//! Every loop in the core exposes a `telemetry()` accessor returning
//! one of these; fields not meaningful to a given loop (e.g. baud
//! estimate on a PLL) are left at their neutral default.

use crate::clock_recovery::ClockDetector;
use crate::costas::CostasLoop;
use crate::pll::Pll;

/// A point-in-time snapshot of one loop's internal state, all in the
/// same normalized units the loop itself uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopTelemetry {
    pub freq: f64,
    pub phase: f64,
    pub lock: f64,
    pub bnor: f64,
    pub last_error: f64,
}

impl Pll {
    pub fn telemetry(&self) -> LoopTelemetry {
        LoopTelemetry {
            freq: self.ncqo().get_freq(),
            phase: self.ncqo().get_phase(),
            lock: self.lock(),
            bnor: 0.0,
            last_error: 0.0,
        }
    }
}

impl CostasLoop {
    pub fn telemetry(&self) -> LoopTelemetry {
        LoopTelemetry {
            freq: self.ncqo().get_freq(),
            phase: self.ncqo().get_phase(),
            lock: self.lock(),
            bnor: 0.0,
            last_error: self.last_error(),
        }
    }
}

impl ClockDetector {
    pub fn telemetry(&self) -> LoopTelemetry {
        LoopTelemetry {
            freq: 0.0,
            phase: 0.0,
            lock: 0.0,
            bnor: self.bnor(),
            last_error: self.last_error(),
        }
    }
}
