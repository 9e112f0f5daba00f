//! SDR calculator tests.

use commission_core::{
    config::CommissionConfig,
    sdr::{calculate_sdr_commission, MeetingCounts},
};

fn meetings(qualified_count: u32, closed_venue_count: u32) -> MeetingCounts {
    MeetingCounts { qualified_count, closed_venue_count }
}

#[test]
fn base_is_additive_over_meeting_kinds() {
    let cfg = CommissionConfig::default_test().sdr;
    let r = calculate_sdr_commission(meetings(3, 2), 0.0, &cfg);

    let expected = 3.0 * cfg.per_qualified_meeting + 2.0 * cfg.per_meeting_that_closed;
    assert_eq!(r.base_amount, expected);
    assert_eq!(r.bonus_amount, 0.0);
    assert_eq!(r.total, expected);
}

#[test]
fn bonus_paid_only_from_100_percent() {
    let cfg = CommissionConfig::default_test().sdr;

    let below = calculate_sdr_commission(meetings(5, 1), 99.999, &cfg);
    assert_eq!(below.bonus_amount, 0.0);

    let at = calculate_sdr_commission(meetings(5, 1), 100.0, &cfg);
    assert_eq!(at.bonus_amount, cfg.bonus_at_goal_100);
    assert_eq!(at.total, at.base_amount + cfg.bonus_at_goal_100);

    let above = calculate_sdr_commission(meetings(5, 1), 180.0, &cfg);
    assert_eq!(above.bonus_amount, cfg.bonus_at_goal_100);
}

/// The SDR base is not scaled by the checkpoint tier.
#[test]
fn base_ignores_checkpoint_tier() {
    let cfg = CommissionConfig::default_test().sdr;
    let tier1 = calculate_sdr_commission(meetings(4, 4), 5.0, &cfg);
    let tier3 = calculate_sdr_commission(meetings(4, 4), 90.0, &cfg);
    assert_eq!(tier1.base_amount, tier3.base_amount);
    assert_eq!(tier1.total, tier3.total);
}

#[test]
fn inputs_are_echoed() {
    let cfg = CommissionConfig::default_test().sdr;
    let counts = meetings(7, 2);
    let r = calculate_sdr_commission(counts, 42.5, &cfg);
    assert_eq!(r.meeting_counts, counts);
    assert_eq!(r.goal_attainment, 42.5);
}

#[test]
fn no_meetings_no_goal_pays_nothing() {
    let cfg = CommissionConfig::default_test().sdr;
    let r = calculate_sdr_commission(MeetingCounts::default(), 0.0, &cfg);
    assert_eq!(r.total, 0.0);
}
