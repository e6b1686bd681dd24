//! Scenario 1: `Ncqo::init(fnor = 0.125)`, 1000 `read()` calls — the
//! sequence is periodic with period 8, and the final cos equals the
//! initial cos within epsilon.

use rf_sync_core::Ncqo;

#[test]
fn scenario_1_ncqo_periodicity_at_one_eighth_cycle() {
    let mut ncqo = Ncqo::init_fixed(0.125).unwrap();
    let initial_cos = ncqo.get_i();

    let first_period: Vec<f64> = (0..8).map(|_| ncqo.read().re).collect();
    let second_period: Vec<f64> = (0..8).map(|_| ncqo.read().re).collect();
    for (a, b) in first_period.iter().zip(second_period.iter()) {
        assert!((a - b).abs() < 1e-12, "period-8 cycle broken: {a} vs {b}");
    }

    for _ in 0..(1000 - 16) {
        ncqo.read();
    }
    assert!((ncqo.get_i() - initial_cos).abs() < 1e-12);
}
