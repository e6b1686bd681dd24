//! Scenario 4: Costas-recovered QPSK, passed through a matched filter
//! into the Gardner clock detector. The recovered symbol stream
//! clusters around `{±1 ± i}`, and the mean distance to the nearest
//! constellation point (averaged over 100-symbol windows) trends
//! downward.

use crate::fixtures::qpsk_burst;
use crate::signal_analysis::{trends_downward, windowed_mean_distances};
use rf_sync_core::clock_recovery::{ClockAlgorithm, ClockDetector};
use rf_sync_core::config::BaudLimits;
use rf_sync_core::costas::{CostasKind, CostasLoop};
use rf_sync_core::filters::FirLowpass;
use rf_sync_core::pipeline::ReceiveChain;
use rf_sync_core::symbol_stream::SymbolStream;
use std::sync::Arc;

#[test]
fn scenario_4_chain_output_clusters_and_converges() {
    let fhint = 0.11375;
    let bnor = 468.0 / 8000.0;
    let bmin = 458.0 / 8000.0;
    let bmax = 478.0 / 8000.0;

    let costas = CostasLoop::init(CostasKind::Qpsk, fhint, 0.02925, 10, 0.00585, 1.0).unwrap();
    let matched_filter = Box::new(FirLowpass::design_lowpass(21, bnor).unwrap());
    let stream = Arc::new(SymbolStream::new(8192).unwrap());
    let limits = BaudLimits::new(bmin, bmax).unwrap();
    let clock = ClockDetector::init(ClockAlgorithm::Gardner, bnor, limits, 0.01, 0.001, 1.0, stream.clone());
    let mut chain = ReceiveChain::new(None, costas, matched_filter, clock);
    let mut reader = stream.reader();

    let burst = qpsk_burst(fhint, 17, 80_000);
    for sample in &burst {
        chain.feed(*sample, None).unwrap();
    }

    let mut recovered = vec![num_complex::Complex64::new(0.0, 0.0); stream.capacity()];
    let n = reader.read(&mut recovered).unwrap();
    recovered.truncate(n);

    assert!(recovered.len() > 200, "too few symbols recovered to assess convergence: {}", recovered.len());

    let windows = windowed_mean_distances(&recovered, 100);
    assert!(windows.len() >= 2, "need at least two 100-symbol windows");
    assert!(
        trends_downward(&windows, 0.15),
        "mean distance to constellation did not trend downward: {windows:?}"
    );
}
