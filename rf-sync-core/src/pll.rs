//! Second-order phase-locked loop wrapping one NCQO.
//!
//! Two usage modes share one set of `(alpha, beta)` loop coefficients:
//! a complex tracker (`track`) for IQ carrier recovery, and a real
//! audio feed (`feed`) that additionally maintains a lock indicator.
//! They are kept as two operations on one loop structure rather than
//! two loop types, since both derive their gains the same way and
//! differ only in the phase detector.

use crate::config::CRITICAL_DAMPING;
use crate::errors::{ConfigError, Result};
use crate::logging::SignalLogger;
use crate::ncqo::Ncqo;
use crate::phase::principal_cycle;
use num_complex::Complex64;

/// Second-order PLL: one owned NCQO plus proportional/integral gains.
#[derive(Debug, Clone)]
pub struct Pll {
    ncqo: Ncqo,
    /// Proportional (angular-frequency) gain.
    alpha: f64,
    /// Integral (phase) gain.
    beta: f64,
    /// Smoothed lock indicator in `[0, ~1]`, used only by `feed`.
    lock: f64,
}

impl Pll {
    /// `fhint` seeds the NCQO's starting frequency; `fc` is the loop's
    /// natural frequency (normalized), used to derive `alpha`/`beta` at
    /// critical damping (ζ = √2/2).
    pub fn init(fhint: f64, fc: f64) -> Result<Self> {
        if !(fc > 0.0 && fc < 0.5) {
            return Err(ConfigError::InvalidLoopBandwidth { loop_bw: fc }.into());
        }
        let ncqo = Ncqo::init(fhint)?;
        let (alpha, beta) = Self::derive_coefficients(fc);
        Ok(Self { ncqo, alpha, beta, lock: 0.0 })
    }

    fn derive_coefficients(fc: f64) -> (f64, f64) {
        let omega_c = std::f64::consts::TAU * fc;
        let zeta = CRITICAL_DAMPING;
        let d = 1.0 / (1.0 + 2.0 * zeta * omega_c + omega_c * omega_c);
        let alpha = 4.0 * omega_c * omega_c * d;
        let beta = 4.0 * zeta * omega_c * d;
        (alpha, beta)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn lock(&self) -> f64 {
        self.lock
    }

    pub fn ncqo(&self) -> &Ncqo {
        &self.ncqo
    }

    /// Complex tracker: mixes `x` with the conjugate local oscillator
    /// and steers the NCQO from the phase residual between `x` and the
    /// current LO phase.
    pub fn track(&mut self, x: Complex64) -> Complex64 {
        let reference = self.ncqo.read();
        let mix = x * reference.conj();

        let err = principal_cycle(x.arg() - self.ncqo.get_phase());
        self.ncqo.inc_angfreq(self.alpha * err, None);
        self.ncqo.set_phase(self.ncqo.get_phase() + self.beta * err, None);

        mix
    }

    /// Real audio feed: Q-projection error, I-projection lock term.
    ///
    /// The guard on the frequency update (`omega > -alpha*err`) is
    /// asymmetric with the always-applied phase update: likely an
    /// anti-wind-up heuristic, kept as-is rather than symmetrized.
    pub fn feed(&mut self, x: f64, logger: Option<&mut SignalLogger>) {
        let s = self.ncqo.read();
        let err = -x * s.im;
        let lck = x * s.re;

        self.lock += self.beta * (2.0 * lck - self.lock);

        if self.ncqo.get_angfreq() > -self.alpha * err {
            self.ncqo.inc_angfreq(self.alpha * err, None);
        } else if let Some(logger) = logger {
            logger.trace("PLL", "frequency update suppressed by anti-windup guard");
        }
        self.ncqo.set_phase(self.ncqo.get_phase() + self.beta * err, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn init_rejects_loop_bandwidth_outside_open_unit_range() {
        assert!(Pll::init(0.1, 0.0).is_err());
        assert!(Pll::init(0.1, -0.01).is_err());
        assert!(Pll::init(0.1, 0.5).is_err());
    }

    #[test]
    fn coefficients_strictly_positive_across_fc_range() {
        let mut fc = 0.001;
        while fc < 0.5 {
            let pll = Pll::init(0.1, fc).unwrap();
            assert!(pll.alpha() > 0.0, "alpha must be positive for fc={}", fc);
            assert!(pll.beta() > 0.0, "beta must be positive for fc={}", fc);
            fc += 0.01;
        }
    }

    #[test]
    fn track_stays_locked_on_unmodulated_tone() {
        // A PLL initialized at fhint=0.1, fc=0.01 fed a synthetic tone
        // at 0.1 for 10000 samples should hold frequency within
        // [0.0995, 0.1005].
        let fhint = 0.1;
        let mut pll = Pll::init(fhint, 0.01).unwrap();
        let mut phase = 0.0;
        for _ in 0..10_000 {
            let x = Complex64::from_polar(1.0, phase);
            pll.track(x);
            phase += std::f64::consts::TAU * fhint;
        }
        let freq = pll.ncqo().get_freq();
        assert!((0.0995..=0.1005).contains(&freq), "final freq {} out of range", freq);
    }

    #[test]
    fn feed_updates_lock_indicator_toward_one_on_matched_tone() {
        let mut pll = Pll::init(0.05, 0.01).unwrap();
        let mut phase = 0.0;
        for _ in 0..5000 {
            let x = phase.cos();
            pll.feed(x, None);
            phase += std::f64::consts::TAU * 0.05;
        }
        assert!(pll.lock() > 0.0, "lock indicator should rise above zero: {}", pll.lock());
    }

    #[test]
    fn coefficient_derivation_matches_formula() {
        let fc = 0.02;
        let pll = Pll::init(0.1, fc).unwrap();
        let omega_c = std::f64::consts::TAU * fc;
        let zeta = CRITICAL_DAMPING;
        let d = 1.0 / (1.0 + 2.0 * zeta * omega_c + omega_c * omega_c);
        assert_relative_eq!(pll.alpha(), 4.0 * omega_c * omega_c * d, epsilon = 1e-12);
        assert_relative_eq!(pll.beta(), 4.0 * zeta * omega_c * d, epsilon = 1e-12);
    }
}
