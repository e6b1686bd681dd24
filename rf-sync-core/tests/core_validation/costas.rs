//! Scenario 3: `CostasLoop::init(kind=QPSK, fhint=0.11375, arm_bw=0.02925,
//! arm_order=10, loop_bw=0.00585)` on a QPSK burst at normalized carrier
//! 0.11375 (910 Hz at 8 kHz) — the measured NCQO frequency ends within
//! 0.113625-0.113875 (909-911 Hz).

use crate::fixtures::qpsk_burst;
use rf_sync_core::costas::{CostasKind, CostasLoop};

const FHINT: f64 = 0.11375;

#[test]
fn scenario_3_qpsk_costas_holds_near_carrier_hint() {
    let mut costas = CostasLoop::init(CostasKind::Qpsk, FHINT, 0.02925, 10, 0.00585, 1.0).unwrap();
    let burst = qpsk_burst(FHINT, 16, 20_000);

    for sample in &burst {
        costas.feed(*sample, None);
    }

    let freq = costas.ncqo().get_freq();
    assert!((0.113625..=0.113875).contains(&freq), "costas frequency drifted to {freq}");
}

#[test]
fn boundary_bpsk_lock_approaches_unity_within_a_time_proportional_to_loop_bw() {
    use crate::fixtures::bpsk_burst;

    let loop_bw = 0.01;
    let mut costas = CostasLoop::init(CostasKind::Bpsk, 0.1, 0.02, 8, loop_bw, 1.0).unwrap();
    let burst = bpsk_burst(0.1, 20, 20_000);

    for sample in &burst {
        costas.feed(*sample, None);
    }

    assert!(costas.lock().abs() > 0.9, "BPSK lock failed to approach unity: {}", costas.lock());
}
