//! Boundary behaviors and scenario 6 (fixed-NCQO mutation rejection).

use num_complex::Complex64;
use rf_sync_core::{Ncqo, Sampler};

#[test]
fn sampler_with_zero_baud_never_fires() {
    let mut sampler = Sampler::new(0.0);
    for n in 0..10_000 {
        let sample = Complex64::from_polar(1.0, n as f64 * 0.01);
        assert!(sampler.step(sample).is_none(), "zero-baud sampler fired at sample {n}");
    }
}

#[test]
fn scenario_6_fixed_ncqo_rejects_every_mutation_with_no_state_change() {
    let mut ncqo = Ncqo::init_fixed(0.1).unwrap();
    let freq_before = ncqo.get_freq();
    let phase_before = ncqo.get_phase();

    ncqo.set_freq(0.2, None);
    ncqo.inc_freq(0.05, None);
    ncqo.set_angfreq(1.0, None);
    ncqo.inc_angfreq(0.1, None);
    ncqo.set_phase(1.0, None);

    assert_eq!(ncqo.get_freq(), freq_before);
    assert_eq!(ncqo.get_phase(), phase_before);
}
