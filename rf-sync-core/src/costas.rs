//! Costas loop family (BPSK/QPSK/8PSK) for carrier phase/frequency
//! recovery on a suppressed-carrier signal.
//!
//! Shares its NCQO and coefficient-derivation shape with [`crate::pll`],
//! but the phase detector is decision-directed and kind-specific, and
//! the mixer output passes through an arm low-pass before detection.

use crate::config::FIR_ORDER_THRESHOLD;
use crate::errors::{ConfigError, InvalidStateError, Result};
use crate::filters::{Filter, FirLowpass, IirLowpass};
use crate::logging::SignalLogger;
use crate::ncqo::Ncqo;
use num_complex::Complex64;

/// Selects the phase-error detector. `None` is the rejected null state;
/// `feed` on a loop built with it returns a neutral zero and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostasKind {
    None,
    Bpsk,
    Qpsk,
    Psk8,
}

#[derive(Debug, Clone)]
enum ArmFilter {
    Iir(IirLowpass),
    Fir(FirLowpass),
}

impl Filter for ArmFilter {
    fn feed(&mut self, x: Complex64) -> Complex64 {
        match self {
            ArmFilter::Iir(f) => f.feed(x),
            ArmFilter::Fir(f) => f.feed(x),
        }
    }
}

fn build_arm_filter(arm_order: usize, arm_bw: f64) -> Result<ArmFilter> {
    let arm_order = if arm_order == 0 { 1 } else { arm_order };
    if arm_order == 1 || arm_order >= FIR_ORDER_THRESHOLD {
        Ok(ArmFilter::Fir(FirLowpass::design_lowpass(arm_order, arm_bw)?))
    } else {
        Ok(ArmFilter::Iir(IirLowpass::design(arm_order - 1, arm_bw)?))
    }
}

/// BPSK/QPSK/8PSK Costas loop: one owned NCQO, one arm low-pass, a
/// smoothed lock indicator and an output-smoothing stage.
#[derive(Debug, Clone)]
pub struct CostasLoop {
    kind: CostasKind,
    ncqo: Ncqo,
    arm: ArmFilter,
    gain: f64,
    /// Loop-filter proportional gain, `a = 2π·loop_bw`.
    a: f64,
    /// Loop-filter integral gain, `b = a²/2` (critically damped, Hagemann).
    b: f64,
    /// Output-smoothing coefficient, defaults to 1 (no smoothing).
    y_alpha: f64,
    y: Complex64,
    lock: f64,
    last_error: f64,
}

impl CostasLoop {
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        kind: CostasKind,
        fhint: f64,
        arm_bw: f64,
        arm_order: usize,
        loop_bw: f64,
        gain: f64,
    ) -> Result<Self> {
        if !(loop_bw > 0.0 && loop_bw < 0.5) {
            return Err(ConfigError::InvalidLoopBandwidth { loop_bw }.into());
        }
        let ncqo = Ncqo::init(fhint)?;
        let arm = build_arm_filter(arm_order, arm_bw)?;
        let a = std::f64::consts::TAU * loop_bw;
        let b = a * a / 2.0;
        Ok(Self {
            kind,
            ncqo,
            arm,
            gain,
            a,
            b,
            y_alpha: 1.0,
            y: Complex64::new(0.0, 0.0),
            lock: 0.0,
            last_error: 0.0,
        })
    }

    pub fn kind(&self) -> CostasKind {
        self.kind
    }

    pub fn lock(&self) -> f64 {
        self.lock
    }

    pub fn last_error(&self) -> f64 {
        self.last_error
    }

    pub fn ncqo(&self) -> &Ncqo {
        &self.ncqo
    }

    /// Set the output-smoothing coefficient (1 disables smoothing).
    pub fn set_y_alpha(&mut self, y_alpha: f64) {
        self.y_alpha = y_alpha;
    }

    fn error(&self, z: Complex64) -> f64 {
        match self.kind {
            CostasKind::None => 0.0,
            CostasKind::Bpsk => -z.re * z.im,
            CostasKind::Qpsk => {
                let l = Complex64::new(z.re.signum(), z.im.signum());
                l.re * z.im - l.im * z.re
            }
            CostasKind::Psk8 => {
                let l = Complex64::new(z.re.signum(), z.im.signum());
                let k = std::f64::consts::SQRT_2 - 1.0;
                if z.re.abs() >= z.im.abs() {
                    l.re * z.im - l.im * z.re * k
                } else {
                    l.re * z.im * k - l.im * z.re
                }
            }
        }
    }

    /// Feed one complex sample through the loop, returning the smoothed
    /// arm output. Returns a neutral zero (and logs) when `kind` is the
    /// null state, per [`InvalidStateError::CostasKindNone`].
    pub fn feed(&mut self, x: Complex64, logger: Option<&mut SignalLogger>) -> Complex64 {
        if self.kind == CostasKind::None {
            if let Some(logger) = logger {
                logger.warn("COSTAS", &InvalidStateError::CostasKindNone.to_string());
            }
            return Complex64::new(0.0, 0.0);
        }

        let s = self.ncqo.read();
        let z = self.gain * self.arm.feed(s.conj() * x);

        let e = self.error(z);
        self.last_error = e;
        self.lock += self.a * (1.0 - e - self.lock);
        self.y += self.y_alpha * (z - self.y);

        self.ncqo.set_angfreq(self.ncqo.get_angfreq() + self.b * e, None);
        self.ncqo.set_phase(self.ncqo.get_phase() + self.a * e, None);

        self.y
    }
}
