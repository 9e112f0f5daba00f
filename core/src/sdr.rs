//! SDR calculator — pay per meeting plus a flat bonus at 100% of goal.
//!
//! The bonus is all-or-nothing and is NOT scaled by the checkpoint
//! fraction, unlike the Closer path.

use crate::{
    config::SdrConfig,
    types::{Money, Percent},
};
use serde::{Deserialize, Serialize};

/// Attainment at which the SDR bonus is paid.
pub const SDR_BONUS_THRESHOLD: Percent = 100.0;

/// Period aggregates computed by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingCounts {
    /// Meetings classified as qualified.
    pub qualified_count: u32,
    /// Meetings that led directly to a sale.
    pub closed_venue_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdrCommissionResult {
    pub base_amount: Money,
    pub bonus_amount: Money,
    pub total: Money,
    pub meeting_counts: MeetingCounts,
    pub goal_attainment: Percent,
}

pub fn calculate_sdr_commission(
    meeting_counts: MeetingCounts,
    goal_attainment_percent: Percent,
    config: &SdrConfig,
) -> SdrCommissionResult {
    let base_amount = f64::from(meeting_counts.qualified_count) * config.per_qualified_meeting
        + f64::from(meeting_counts.closed_venue_count) * config.per_meeting_that_closed;

    let bonus_amount = if goal_attainment_percent >= SDR_BONUS_THRESHOLD {
        config.bonus_at_goal_100
    } else {
        0.0
    };

    let total = base_amount + bonus_amount;

    log::debug!(
        "sdr: qualified={} closed={} attainment={:.2}% base=${:.2} bonus=${:.2} total=${:.2}",
        meeting_counts.qualified_count,
        meeting_counts.closed_venue_count,
        goal_attainment_percent,
        base_amount,
        bonus_amount,
        total
    );

    SdrCommissionResult {
        base_amount,
        bonus_amount,
        total,
        meeting_counts,
        goal_attainment: goal_attainment_percent,
    }
}
