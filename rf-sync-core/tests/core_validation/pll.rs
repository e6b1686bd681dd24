//! Scenario 2: `Pll::init(fhint=0.1, fc=0.01).track(...)` on a synthetic
//! tone `exp(i*2*pi*0.1*n)` for n=0..9999 — the final NCQO frequency
//! lands in `[0.0995, 0.1005]`.

use crate::fixtures::unmodulated_tone;
use rf_sync_core::Pll;

#[test]
fn scenario_2_pll_tracks_unmodulated_tone_within_half_percent() {
    let mut pll = Pll::init(0.1, 0.01).unwrap();
    let tone = unmodulated_tone(0.1, 10_000);

    for sample in &tone {
        pll.track(*sample);
    }

    let freq = pll.ncqo().get_freq();
    assert!((0.0995..=0.1005).contains(&freq), "pll frequency drifted to {freq}");
}

#[test]
fn boundary_feeding_unmodulated_tone_keeps_frequency_bounded() {
    let mut pll = Pll::init(0.1, 0.01).unwrap();
    let tone = unmodulated_tone(0.1, 5_000);
    for sample in &tone {
        let before = pll.ncqo().get_freq();
        pll.track(*sample);
        let after = pll.ncqo().get_freq();
        assert!((after - before).abs() < 0.01, "single-sample frequency jump too large");
    }
}
