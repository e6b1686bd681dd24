//! Opaque IIR/FIR filtering primitives with a `feed(complex) -> complex`
//! contract. Used internally as the Costas arm filter, and equally
//! usable by a host as the AGC/RRC stage ahead of a loop — the core
//! treats both the same way, through the [`Filter`] trait.

use crate::errors::{ConfigError, Result};
use num_complex::Complex64;
use std::collections::VecDeque;
use std::f64::consts::PI;

/// Shared contract for a single-sample complex filtering stage.
pub trait Filter {
    fn feed(&mut self, x: Complex64) -> Complex64;
}

/// A real-coefficient FIR filter applied identically to the real and
/// imaginary rails of a complex baseband signal.
#[derive(Debug, Clone)]
pub struct FirLowpass {
    taps: Vec<f64>,
    history: VecDeque<Complex64>,
}

impl FirLowpass {
    /// Order-1 is the identity filter (`b = [1]`).
    pub fn identity() -> Self {
        Self::from_taps(vec![1.0])
    }

    /// Windowed-sinc low-pass, `num_taps` taps, cutoff `fnor`
    /// (cycles/sample). Hamming-windowed, normalized to unity DC gain.
    pub fn design_lowpass(num_taps: usize, fnor: f64) -> Result<Self> {
        if num_taps == 0 {
            return Err(ConfigError::UnrealizableArmOrder { order: num_taps }.into());
        }
        if num_taps == 1 {
            return Ok(Self::identity());
        }

        let center = (num_taps - 1) as f64 / 2.0;
        let mut taps: Vec<f64> = (0..num_taps)
            .map(|n| {
                let m = n as f64 - center;
                let sinc = if m.abs() < 1e-12 {
                    2.0 * fnor
                } else {
                    (2.0 * PI * fnor * m).sin() / (PI * m)
                };
                // Hamming window
                let window = 0.54 - 0.46 * (2.0 * PI * n as f64 / (num_taps - 1) as f64).cos();
                sinc * window
            })
            .collect();

        let dc_gain: f64 = taps.iter().sum();
        if dc_gain.abs() > 1e-12 {
            for tap in &mut taps {
                *tap /= dc_gain;
            }
        }

        Ok(Self::from_taps(taps))
    }

    fn from_taps(taps: Vec<f64>) -> Self {
        let len = taps.len();
        Self { taps, history: VecDeque::from(vec![Complex64::new(0.0, 0.0); len]) }
    }
}

impl Filter for FirLowpass {
    fn feed(&mut self, x: Complex64) -> Complex64 {
        self.history.push_front(x);
        self.history.pop_back();
        self.history
            .iter()
            .zip(self.taps.iter())
            .fold(Complex64::new(0.0, 0.0), |acc, (&sample, &tap)| acc + sample * tap)
    }
}

/// One digital biquad section (direct form II transposed), real
/// coefficients applied to both rails of a complex signal.
#[derive(Debug, Clone, Copy)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    z1: Complex64,
    z2: Complex64,
}

impl Biquad {
    fn feed(&mut self, x: Complex64) -> Complex64 {
        let y = self.b0 * x + self.z1;
        self.z1 = self.b1 * x - self.a1 * y + self.z2;
        self.z2 = self.b2 * x - self.a2 * y;
        y
    }
}

/// Cascade of biquad sections implementing a Butterworth low-pass of
/// the requested order, built via the bilinear transform with
/// frequency pre-warping. Feed-forward coefficients of the first
/// section are scaled so the cascade has unity gain at DC.
#[derive(Debug, Clone)]
pub struct IirLowpass {
    sections: Vec<Biquad>,
}

impl IirLowpass {
    pub fn design(order: usize, fnor: f64) -> Result<Self> {
        if order == 0 {
            return Err(ConfigError::UnrealizableArmOrder { order }.into());
        }
        let omega_c = (PI * fnor).tan(); // pre-warped analog cutoff, T = 1

        // Butterworth analog poles: p_k = omega_c * exp(i*pi*(2k+N+1)/(2N))
        let n = order;
        let poles: Vec<Complex64> = (0..n)
            .map(|k| {
                let theta = PI * (2 * k + n + 1) as f64 / (2 * n) as f64;
                omega_c * Complex64::from_polar(1.0, theta)
            })
            .collect();

        let mut sections = Vec::new();
        let mut used = vec![false; n];
        for i in 0..n {
            if used[i] {
                continue;
            }
            let p = poles[i];
            if p.im.abs() < 1e-9 {
                // Real pole: first-order analog section Ωc/(s+Ωc).
                sections.push(bilinear_first_order(omega_c, p.re));
                used[i] = true;
            } else {
                // Find its conjugate partner.
                let j = ((i + 1)..n)
                    .find(|&j| !used[j] && (poles[j].im + p.im).abs() < 1e-6)
                    .expect("Butterworth poles come in conjugate pairs");
                used[i] = true;
                used[j] = true;
                sections.push(bilinear_second_order(omega_c, p));
            }
        }

        let mut filter = Self { sections };
        filter.normalize_dc_gain();
        Ok(filter)
    }

    fn normalize_dc_gain(&mut self) {
        let dc = self.evaluate_dc_gain();
        if dc.abs() > 1e-12 {
            if let Some(first) = self.sections.first_mut() {
                first.b0 /= dc;
                first.b1 /= dc;
                first.b2 /= dc;
            }
        }
    }

    /// H(z) evaluated at z = 1 for the whole cascade.
    fn evaluate_dc_gain(&self) -> f64 {
        self.sections
            .iter()
            .map(|s| (s.b0 + s.b1 + s.b2) / (1.0 + s.a1 + s.a2))
            .product()
    }
}

impl Filter for IirLowpass {
    fn feed(&mut self, x: Complex64) -> Complex64 {
        self.sections.iter_mut().fold(x, |acc, section| section.feed(acc))
    }
}

/// Bilinear-transform a first-order analog section `Ωc/(s+Ωc)` (T=1).
fn bilinear_first_order(_omega_c: f64, pole_re: f64) -> Biquad {
    // H(s) = -pole_re / (s - pole_re), since pole_re < 0 this is Ωc/(s+Ωc).
    let k = -pole_re;
    // Bilinear substitution s = (z-1)/(z+1):
    // H(z) = k(z+1) / ((1-pole_re) z + (-1-pole_re))  [unnormalized]
    let a0 = 1.0 - pole_re;
    let b0 = k / a0;
    let b1 = k / a0;
    let a1 = (-1.0 - pole_re) / a0;
    Biquad { b0, b1, b2: 0.0, a1, a2: 0.0, z1: Complex64::new(0.0, 0.0), z2: Complex64::new(0.0, 0.0) }
}

/// Bilinear-transform a conjugate-pole-pair analog section
/// `Ωc² / (s² - 2·Re(p)·s + |p|²)` (T=1).
fn bilinear_second_order(omega_c: f64, pole: Complex64) -> Biquad {
    let re = pole.re;
    let mag2 = pole.norm_sqr();
    let k = omega_c * omega_c;

    // Analog: B(s) = k, A(s) = s^2 - 2 re s + mag2.
    // Bilinear: s = (z-1)/(z+1). Multiply through by (z+1)^2.
    // A(z)*(z+1)^2 expands to: (1 - 2re + mag2) z^2 + (2 mag2 - 2) z + (1 + 2re + mag2)
    let a0 = 1.0 - 2.0 * re + mag2;
    let a1_raw = 2.0 * mag2 - 2.0;
    let a2_raw = 1.0 + 2.0 * re + mag2;
    // B(z)*(z+1)^2 = k*(z^2 + 2z + 1)
    let b0_raw = k;
    let b1_raw = 2.0 * k;
    let b2_raw = k;

    Biquad {
        b0: b0_raw / a0,
        b1: b1_raw / a0,
        b2: b2_raw / a0,
        a1: a1_raw / a0,
        a2: a2_raw / a0,
        z1: Complex64::new(0.0, 0.0),
        z2: Complex64::new(0.0, 0.0),
    }
}
