//! Fractional-period phase accumulator firing once per symbol period.
//!
//! Used by consumers that prefer explicit resampling at a configurable
//! sub-sample phase offset over TED-driven recovery. When `bnor = 0`
//! the sampler is permanently idle.

use num_complex::Complex64;

/// Fires once per symbol period at a configurable sub-sample phase offset.
#[derive(Debug, Clone)]
pub struct Sampler {
    bnor: f64,
    /// Phase accumulator, always in `[0, period)`.
    phase: f64,
    /// Sub-sample phase offset relative to the period, in `[0, 1)`.
    phase0_rel: f64,
    prev: Complex64,
}

impl Sampler {
    pub fn new(bnor: f64) -> Self {
        let phase0_rel = 0.0;
        Self {
            bnor,
            phase: phase0_rel * Self::period(bnor),
            phase0_rel,
            prev: Complex64::new(0.0, 0.0),
        }
    }

    fn period(bnor: f64) -> f64 {
        if bnor == 0.0 {
            0.0
        } else {
            1.0 / bnor
        }
    }

    pub fn period_samples(&self) -> f64 {
        Self::period(self.bnor)
    }

    pub fn bnor(&self) -> f64 {
        self.bnor
    }

    /// Reset the phase accumulator relative to the configured sub-sample
    /// offset (argument is `[0, 1)`, a fraction of the period).
    pub fn reset_phase(&mut self, phase0_rel: f64) {
        self.phase0_rel = phase0_rel;
        self.phase = phase0_rel * self.period_samples();
    }

    /// Feed one input sample. Returns `None` every sample until a symbol
    /// boundary is crossed since the last call, `Some(interpolated)` on
    /// the sample where the boundary fires. Permanently idle if
    /// `bnor == 0`.
    pub fn step(&mut self, sample: Complex64) -> Option<Complex64> {
        if self.bnor == 0.0 {
            self.prev = sample;
            return None;
        }

        let period = self.period_samples();
        self.phase += 1.0;
        let fired = if self.phase >= period {
            // Linear interpolation between prev and current sample at
            // the fractional position where the boundary was crossed.
            let overshoot = self.phase - period;
            let frac = 1.0 - overshoot;
            let interpolated = self.prev + (sample - self.prev) * frac;
            self.phase -= period;
            Some(interpolated)
        } else {
            None
        };

        self.prev = sample;
        fired
    }
}
