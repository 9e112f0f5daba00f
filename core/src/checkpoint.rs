//! Checkpoint classifier — maps percent-of-goal attained to a payout tier.
//!
//!   attainment < 20%        -> tier1 (1/3)
//!   20% <= attainment < 65% -> tier2 (2/3)
//!   attainment >= 65%       -> tier3 (1.0)
//!
//! Total and monotonic over non-negative input.

use crate::{config::CheckpointFractions, types::Percent};
use serde::{Deserialize, Serialize};

/// Lowest attainment that reaches tier2.
pub const TIER2_THRESHOLD: Percent = 20.0;
/// Lowest attainment that reaches tier3.
pub const TIER3_THRESHOLD: Percent = 65.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Checkpoint {
    Tier1,
    Tier2,
    Tier3,
}

impl Checkpoint {
    pub fn fraction(self) -> f64 {
        let fixed = CheckpointFractions::FIXED;
        match self {
            Checkpoint::Tier1 => fixed.tier1,
            Checkpoint::Tier2 => fixed.tier2,
            Checkpoint::Tier3 => fixed.tier3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub tier: Checkpoint,
    pub fraction: f64,
}

/// Classify a goal-attainment percentage.
///
/// Negative and NaN input are clamped to 0, so they land in tier1.
pub fn classify(goal_attainment_percent: Percent) -> Classification {
    let attainment = goal_attainment_percent.max(0.0);
    let tier = if attainment >= TIER3_THRESHOLD {
        Checkpoint::Tier3
    } else if attainment >= TIER2_THRESHOLD {
        Checkpoint::Tier2
    } else {
        Checkpoint::Tier1
    };
    Classification { tier, fraction: tier.fraction() }
}
