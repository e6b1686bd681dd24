//! Property-based invariant checks across randomized inputs, run with
//! `proptest` rather than fixed-case assertions.

use proptest::prelude::*;
use rf_sync_core::clock_recovery::{ClockAlgorithm, ClockDetector};
use rf_sync_core::config::BaudLimits;
use rf_sync_core::symbol_stream::SymbolStream;
use rf_sync_core::Ncqo;
use rf_sync_core::Pll;
use num_complex::Complex64;
use std::f64::consts::PI;
use std::sync::Arc;

proptest! {
    /// The NCQO's phase stays folded into `(-pi, pi]` after every step,
    /// no matter how large or small the normalized frequency is.
    #[test]
    fn ncqo_phase_stays_within_principal_range(fnor in -50.0f64..50.0, steps in 0usize..2_000) {
        let mut ncqo = Ncqo::init(fnor).unwrap();
        for _ in 0..steps {
            let phase = ncqo.get_phase();
            prop_assert!(phase > -PI - 1e-9 && phase <= PI + 1e-9, "phase {phase} escaped (-pi, pi]");
            ncqo.step();
        }
    }

    /// Critically-damped alpha/beta stay strictly positive across the
    /// whole admissible loop-bandwidth range.
    #[test]
    fn pll_coefficients_are_strictly_positive(fc in 1e-6f64..0.49) {
        let pll = Pll::init(0.1, fc).unwrap();
        prop_assert!(pll.alpha() > 0.0, "alpha non-positive at fc={fc}: {}", pll.alpha());
        prop_assert!(pll.beta() > 0.0, "beta non-positive at fc={fc}: {}", pll.beta());
    }

    /// `ClockDetector::bnor` never leaves the configured `BaudLimits`
    /// window, regardless of the error sequence the input drives it
    /// through.
    #[test]
    fn clock_detector_bnor_never_escapes_baud_limits(
        samples in prop::collection::vec(-2.0f64..2.0, 1..500),
    ) {
        let stream = Arc::new(SymbolStream::new(256).unwrap());
        let limits = BaudLimits::new(0.05, 0.07).unwrap();
        let mut det = ClockDetector::init(ClockAlgorithm::Gardner, 0.06, limits, 0.01, 0.001, 1.0, stream);

        for re in samples {
            det.feed(Complex64::new(re, 0.0), None).unwrap();
            let bnor = det.bnor();
            prop_assert!((0.05..=0.07).contains(&bnor), "bnor escaped limits: {bnor}");
        }
    }
}
