//! Checkpoint classifier tests.

use commission_core::checkpoint::{classify, Checkpoint, TIER2_THRESHOLD, TIER3_THRESHOLD};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

#[test]
fn boundaries_resolve_to_expected_tiers() {
    let cases = [
        (0.0, Checkpoint::Tier1),
        (19.999, Checkpoint::Tier1),
        (20.0, Checkpoint::Tier2),
        (64.999, Checkpoint::Tier2),
        (65.0, Checkpoint::Tier3),
        (100.0, Checkpoint::Tier3),
        (150.0, Checkpoint::Tier3),
    ];
    for (attainment, expected) in cases {
        assert_eq!(
            classify(attainment).tier,
            expected,
            "attainment {attainment}% should be {expected:?}"
        );
    }
}

#[test]
fn fractions_are_thirds() {
    assert!((classify(0.0).fraction - 1.0 / 3.0).abs() < 1e-12);
    assert!((classify(TIER2_THRESHOLD).fraction - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(classify(TIER3_THRESHOLD).fraction, 1.0);
    assert_eq!(classify(150.0).fraction, 1.0);
}

#[test]
fn negative_attainment_is_treated_as_zero() {
    let c = classify(-25.0);
    assert_eq!(c.tier, Checkpoint::Tier1);
    assert_eq!(c, classify(0.0));
}

#[test]
fn nan_attainment_lands_in_lowest_tier() {
    assert_eq!(classify(f64::NAN).tier, Checkpoint::Tier1);
}

/// Higher attainment never yields a lower fraction.
#[test]
fn classification_is_monotonic() {
    let mut rng = Pcg64Mcg::seed_from_u64(0xC0FF_EE00);
    let mut samples: Vec<f64> = (0..2_000).map(|_| rng.gen_range(0.0..250.0)).collect();
    samples.extend([0.0, 19.999, 20.0, 64.999, 65.0, 100.0]);
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap());

    for pair in samples.windows(2) {
        let (lo, hi) = (classify(pair[0]), classify(pair[1]));
        assert!(
            lo.fraction <= hi.fraction && lo.tier <= hi.tier,
            "classify({}) = {:?} is above classify({}) = {:?}",
            pair[0], lo, pair[1], hi
        );
    }
}
