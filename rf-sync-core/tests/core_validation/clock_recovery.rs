//! Boundary behavior: a flat (constant complex) input drives the
//! Gardner error toward zero and `bnor` stabilizes.
//!
//! Scenario 5: a slow reader falling more than `capacity` symbols
//! behind the writer observes exactly one `StreamOverrun` before the
//! next read, then resynchronizes to `tell()` and resumes reading
//! contiguously.

use num_complex::Complex64;
use rf_sync_core::clock_recovery::{ClockAlgorithm, ClockDetector};
use rf_sync_core::config::BaudLimits;
use rf_sync_core::errors::SyncError;
use rf_sync_core::symbol_stream::SymbolStream;
use std::sync::Arc;

fn detector(bnor: f64, capacity: usize) -> (ClockDetector, Arc<SymbolStream>) {
    let stream = Arc::new(SymbolStream::new(capacity).unwrap());
    let limits = BaudLimits::new(bnor * 0.9, bnor * 1.1).unwrap();
    let det = ClockDetector::init(ClockAlgorithm::Gardner, bnor, limits, 0.01, 0.001, 1.0, stream.clone());
    (det, stream)
}

#[test]
fn flat_input_drives_error_to_zero_and_bnor_stabilizes() {
    let (mut det, _stream) = detector(0.0585, 64);
    let flat = Complex64::new(1.0, 0.0);

    for _ in 0..2_000 {
        det.feed(flat, None).unwrap();
    }
    let bnor_after_settling = det.bnor();

    for _ in 0..2_000 {
        det.feed(flat, None).unwrap();
        assert!(det.last_error().abs() < 1e-6);
    }
    assert!((det.bnor() - bnor_after_settling).abs() < 1e-9);
}

#[test]
fn scenario_5_slow_reader_observes_one_overrun_then_resyncs() {
    let (mut det, stream) = detector(0.0585, 16);
    let mut reader = stream.reader();

    for n in 0..2_000 {
        let symbol = if n % 2 == 0 { 1.0 } else { -1.0 };
        det.feed(Complex64::new(symbol, 0.0), None).unwrap();
    }

    let mut scratch = vec![Complex64::new(0.0, 0.0); 4];
    let first_read = reader.read(&mut scratch);
    assert!(matches!(first_read, Err(SyncError::StreamOverrun { .. })));

    reader.resync();
    for _ in 0..2_000 {
        det.feed(Complex64::new(1.0, 0.0), None).unwrap();
    }
    let second_read = reader.read(&mut scratch);
    assert!(second_read.is_ok(), "reader should resync and read contiguously after an overrun");
    let third_read = reader.read(&mut scratch);
    assert!(third_read.is_ok(), "reader should keep reading contiguously after resync");
}
