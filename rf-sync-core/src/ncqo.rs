//! Numerically-controlled quadrature oscillator.
//!
//! Maintains a phase `φ` and emits `(cos φ, sin φ)` on demand. A "free"
//! NCQO accumulates phase sample-by-sample from a mutable frequency; a
//! "fixed" NCQO precomputes one exact period into lookup tables and is
//! closed to further frequency/phase mutation in exchange for zero
//! accumulated phase error and a cheaper hot-loop read.

use crate::errors::{ConfigError, Result};
use crate::logging::SignalLogger;
use crate::phase::principal_cycle;
use num_complex::Complex64;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fresh {
    cos: bool,
    sin: bool,
}

impl Fresh {
    const fn stale() -> Self {
        Self { cos: false, sin: false }
    }
}

#[derive(Debug, Clone)]
enum Mode {
    /// Phase accumulated each `step` from a mutable `omega`.
    Free { phase: f64, omega: f64, fnor: f64 },
    /// One exact period precomputed; `index` cycles through it modulo
    /// the table length. Neither frequency nor phase can change here.
    Fixed { cos_table: Vec<f64>, sin_table: Vec<f64>, index: usize },
}

/// A numerically-controlled quadrature oscillator.
#[derive(Debug, Clone)]
pub struct Ncqo {
    mode: Mode,
    cached_cos: f64,
    cached_sin: f64,
    fresh: Fresh,
}

impl Ncqo {
    /// Create a free-running NCQO at normalized frequency `fnor`
    /// (cycles/sample). Phase starts at 0.
    pub fn init(fnor: f64) -> Result<Self> {
        if !fnor.is_finite() {
            return Err(ConfigError::NegativeFrequency { fnor }.into());
        }
        let mut ncqo = Self {
            mode: Mode::Free { phase: 0.0, omega: TAU * fnor, fnor },
            cached_cos: 1.0,
            cached_sin: 0.0,
            fresh: Fresh::stale(),
        };
        ncqo.refresh_cache();
        Ok(ncqo)
    }

    /// Create a fixed-mode NCQO: one full period of `(cos, sin)` is
    /// precomputed into tables sized `round(1/fnor)` samples. Fails if
    /// `fnor <= 0`.
    pub fn init_fixed(fnor: f64) -> Result<Self> {
        if fnor <= 0.0 || !fnor.is_finite() {
            return Err(ConfigError::ZeroFrequencyFixedNcqo { fnor }.into());
        }
        let table_len = (1.0 / fnor).round().max(1.0) as usize;
        let omega = TAU * fnor;
        let mut cos_table = Vec::with_capacity(table_len);
        let mut sin_table = Vec::with_capacity(table_len);
        for n in 0..table_len {
            let phase = principal_cycle(omega * n as f64);
            cos_table.push(phase.cos());
            sin_table.push(phase.sin());
        }
        let cached_cos = cos_table[0];
        let cached_sin = sin_table[0];
        Ok(Self {
            mode: Mode::Fixed { cos_table, sin_table, index: 0 },
            cached_cos,
            cached_sin,
            fresh: Fresh { cos: true, sin: true },
        })
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.mode, Mode::Fixed { .. })
    }

    /// Fold `phase0` into `(-π, π]` and store it. No-op (logged) on a
    /// fixed-mode NCQO.
    pub fn set_phase(&mut self, phase0: f64, logger: Option<&mut SignalLogger>) {
        match &mut self.mode {
            Mode::Free { phase, .. } => {
                *phase = principal_cycle(phase0);
                self.fresh = Fresh::stale();
            }
            Mode::Fixed { .. } => {
                if let Some(logger) = logger {
                    logger.warn("NCQO", "set_phase ignored: NCQO is in fixed mode");
                }
            }
        }
    }

    pub fn set_freq(&mut self, fnor: f64, logger: Option<&mut SignalLogger>) {
        match &mut self.mode {
            Mode::Free { omega, fnor: f, .. } => {
                *omega = TAU * fnor;
                *f = fnor;
            }
            Mode::Fixed { .. } => {
                if let Some(logger) = logger {
                    logger.warn("NCQO", "set_freq ignored: NCQO is in fixed mode");
                }
            }
        }
    }

    pub fn inc_freq(&mut self, delta_fnor: f64, logger: Option<&mut SignalLogger>) {
        if let Mode::Free { fnor, .. } = &self.mode {
            let new = fnor + delta_fnor;
            self.set_freq(new, logger);
        } else if let Some(logger) = logger {
            logger.warn("NCQO", "inc_freq ignored: NCQO is in fixed mode");
        }
    }

    pub fn set_angfreq(&mut self, omega0: f64, logger: Option<&mut SignalLogger>) {
        match &mut self.mode {
            Mode::Free { omega, fnor, .. } => {
                *omega = omega0;
                *fnor = omega0 / TAU;
            }
            Mode::Fixed { .. } => {
                if let Some(logger) = logger {
                    logger.warn("NCQO", "set_angfreq ignored: NCQO is in fixed mode");
                }
            }
        }
    }

    pub fn inc_angfreq(&mut self, delta_omega: f64, logger: Option<&mut SignalLogger>) {
        if let Mode::Free { omega, .. } = &self.mode {
            let new = omega + delta_omega;
            self.set_angfreq(new, logger);
        } else if let Some(logger) = logger {
            logger.warn("NCQO", "inc_angfreq ignored: NCQO is in fixed mode");
        }
    }

    pub fn get_freq(&self) -> f64 {
        match &self.mode {
            Mode::Free { fnor, .. } => *fnor,
            // Fixed mode has no mutable fnor; report the design frequency
            // implied by the table length (1/len), matching init_fixed's
            // own table sizing.
            Mode::Fixed { cos_table, .. } => 1.0 / cos_table.len() as f64,
        }
    }

    pub fn get_angfreq(&self) -> f64 {
        match &self.mode {
            Mode::Free { omega, .. } => *omega,
            Mode::Fixed { .. } => TAU * self.get_freq(),
        }
    }

    pub fn get_phase(&self) -> f64 {
        match &self.mode {
            Mode::Free { phase, .. } => *phase,
            Mode::Fixed { cos_table: _, index, .. } => {
                // Reconstruct phase from the current table slot.
                let len = self.table_len();
                principal_cycle(TAU * *index as f64 / len as f64)
            }
        }
    }

    fn table_len(&self) -> usize {
        match &self.mode {
            Mode::Fixed { cos_table, .. } => cos_table.len(),
            Mode::Free { .. } => 0,
        }
    }

    fn refresh_cache(&mut self) {
        if let Mode::Free { phase, .. } = &self.mode {
            if !self.fresh.cos {
                self.cached_cos = phase.cos();
                self.fresh.cos = true;
            }
            if !self.fresh.sin {
                self.cached_sin = phase.sin();
                self.fresh.sin = true;
            }
        }
    }

    /// Current in-phase component, without advancing.
    pub fn get_i(&mut self) -> f64 {
        self.refresh_cache();
        self.cached_cos
    }

    /// Current quadrature component, without advancing.
    pub fn get_q(&mut self) -> f64 {
        self.refresh_cache();
        self.cached_sin
    }

    /// Current `(i, q)` pair as a complex sample, without advancing.
    pub fn get(&mut self) -> Complex64 {
        Complex64::new(self.get_i(), self.get_q())
    }

    /// Advance phase by `omega` and fold into `(-π, π]`; invalidates caches.
    /// In fixed mode, advances the table index modulo its length instead.
    pub fn step(&mut self) {
        match &mut self.mode {
            Mode::Free { phase, omega, .. } => {
                *phase = principal_cycle(*phase + *omega);
                self.fresh = Fresh::stale();
            }
            Mode::Fixed { cos_table, sin_table, index } => {
                *index = (*index + 1) % cos_table.len();
                self.cached_cos = cos_table[*index];
                self.cached_sin = sin_table[*index];
            }
        }
    }

    pub fn read_i(&mut self) -> f64 {
        let v = self.get_i();
        self.step();
        v
    }

    pub fn read_q(&mut self) -> f64 {
        let v = self.get_q();
        self.step();
        v
    }

    pub fn read(&mut self) -> Complex64 {
        let v = self.get();
        self.step();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn init_starts_at_zero_phase() {
        let mut ncqo = Ncqo::init(0.1).unwrap();
        assert_relative_eq!(ncqo.get_phase(), 0.0);
        assert_relative_eq!(ncqo.get_i(), 1.0);
        assert_relative_eq!(ncqo.get_q(), 0.0);
    }

    #[test]
    fn set_freq_roundtrips_on_free_ncqo() {
        let mut ncqo = Ncqo::init(0.1).unwrap();
        ncqo.set_freq(0.2, None);
        assert_relative_eq!(ncqo.get_freq(), 0.2);
    }

    #[test]
    fn set_phase_roundtrips_with_wrap() {
        let mut ncqo = Ncqo::init(0.1).unwrap();
        let x = 7.0;
        ncqo.set_phase(x, None);
        let expected = x - TAU * ((x + PI) / TAU).floor();
        assert_relative_eq!(ncqo.get_phase(), expected, epsilon = 1e-12);
    }

    #[test]
    fn step_keeps_phase_bounded_and_unit_modulus() {
        let mut ncqo = Ncqo::init(0.0317).unwrap();
        for _ in 0..5000 {
            assert!(ncqo.get_phase().abs() <= PI + 1e-12);
            let (i, q) = (ncqo.get_i(), ncqo.get_q());
            assert_relative_eq!(i * i + q * q, 1.0, epsilon = 1e-9);
            ncqo.step();
        }
    }

    #[test]
    fn fixed_mode_rejects_zero_frequency() {
        assert!(Ncqo::init_fixed(0.0).is_err());
        assert!(Ncqo::init_fixed(-0.1).is_err());
    }

    #[test]
    fn fixed_mode_is_exactly_periodic() {
        // init(fnor=0.125) gives period 8; after 1000 reads cos matches the initial value.
        let mut ncqo = Ncqo::init_fixed(0.125).unwrap();
        let initial_cos = ncqo.get_i();
        for _ in 0..1000 {
            ncqo.read();
        }
        assert_relative_eq!(ncqo.get_i(), initial_cos, epsilon = 1e-12);
    }

    #[test]
    fn fixed_mode_refuses_mutation_without_state_change() {
        let mut ncqo = Ncqo::init_fixed(0.1).unwrap();
        let freq_before = ncqo.get_freq();
        let phase_before = ncqo.get_phase();

        ncqo.set_freq(0.2, None);
        ncqo.inc_freq(0.05, None);
        ncqo.set_angfreq(1.0, None);
        ncqo.inc_angfreq(0.5, None);
        ncqo.set_phase(1.0, None);

        assert_relative_eq!(ncqo.get_freq(), freq_before);
        assert_relative_eq!(ncqo.get_phase(), phase_before);
    }

    #[test]
    fn free_ncqo_read_matches_periodic_sequence() {
        let mut ncqo = Ncqo::init(0.125).unwrap();
        let samples: Vec<f64> = (0..9).map(|_| ncqo.read_i()).collect();
        assert_relative_eq!(samples[0], samples[8], epsilon = 1e-9);
    }
}
