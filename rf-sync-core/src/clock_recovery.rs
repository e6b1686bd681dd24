//! Gardner-TED clock/symbol-timing recovery.
//!
//! Runs at twice the symbol rate conceptually: every half-symbol
//! boundary produces an interpolated sample, alternating between a
//! mid-symbol sample (feeds the Gardner error) and an on-symbol sample
//! (the recovered symbol, pushed to the [`SymbolStream`]).

use crate::config::BaudLimits;
use crate::errors::{InvalidStateError, Result};
use crate::logging::SignalLogger;
use crate::symbol_stream::SymbolStream;
use num_complex::Complex64;
use std::sync::Arc;

/// Selects the timing-error-detector algorithm. `None` is the rejected
/// null state, mirroring [`crate::costas::CostasKind`]; only `Gardner`
/// is realized here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAlgorithm {
    None,
    Gardner,
}

/// Gardner timing-error detector driving a second-order loop over the
/// normalized baud estimate.
pub struct ClockDetector {
    algorithm: ClockAlgorithm,
    bnor: f64,
    limits: BaudLimits,
    /// Half-symbol phase accumulator, advances by `bnor` per sample.
    phi: f64,
    prev: Complex64,
    /// `x[0]` = current on-symbol sample, `x[1]` = current mid-symbol
    /// sample, `x[2]` = previous on-symbol sample.
    x: [Complex64; 3],
    half_cycle: bool,
    alpha: f64,
    beta: f64,
    gain: f64,
    last_error: f64,
    stream: Arc<SymbolStream>,
}

impl ClockDetector {
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        algorithm: ClockAlgorithm,
        bnor: f64,
        limits: BaudLimits,
        alpha: f64,
        beta: f64,
        gain: f64,
        stream: Arc<SymbolStream>,
    ) -> Self {
        Self {
            algorithm,
            bnor: limits.clamp(bnor),
            limits,
            phi: 0.0,
            prev: Complex64::new(0.0, 0.0),
            x: [Complex64::new(0.0, 0.0); 3],
            half_cycle: false,
            alpha,
            beta,
            gain,
            last_error: 0.0,
            stream,
        }
    }

    pub fn bnor(&self) -> f64 {
        self.bnor
    }

    pub fn last_error(&self) -> f64 {
        self.last_error
    }

    pub fn stream(&self) -> &Arc<SymbolStream> {
        &self.stream
    }

    /// Re-seed the baud estimate and zero the phase accumulator and
    /// symbol history, clamped to the configured limits.
    pub fn set_baud(&mut self, bnor: f64) {
        self.bnor = self.limits.clamp(bnor);
        self.phi = 0.0;
        self.x = [Complex64::new(0.0, 0.0); 3];
    }

    /// Feed one input sample. Returns a neutral zero (and logs) when
    /// `algorithm` is the null state, per
    /// [`InvalidStateError::ClockAlgorithmNone`].
    pub fn feed(&mut self, val: Complex64, logger: Option<&mut SignalLogger>) -> Result<()> {
        if self.algorithm == ClockAlgorithm::None {
            if let Some(logger) = logger {
                logger.warn("GARDNER", &InvalidStateError::ClockAlgorithmNone.to_string());
            }
            self.prev = val;
            return Ok(());
        }

        self.phi += self.bnor;
        if self.phi < 0.5 {
            self.prev = val;
            return Ok(());
        }

        self.half_cycle = !self.half_cycle;
        let a = self.bnor * (self.phi - 0.5);
        let p = (1.0 - a) * val + a * self.prev;
        self.phi -= 0.5;

        if !self.half_cycle {
            self.x[2] = self.x[0];
            self.x[0] = p;
            let e = self.gain * (self.x[1].conj() * (self.x[0] - self.x[2])).re;
            self.last_error = e;
            self.phi += self.alpha * e;
            self.bnor = self.limits.clamp(self.bnor + self.beta * e);
            self.stream.write(p);
            self.stream.publish_telemetry(self.bnor, self.last_error);
        } else {
            self.x[1] = p;
        }

        self.prev = val;
        Ok(())
    }
}
