//! Shared primitive types used across the entire engine.

use crate::error::CommissionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A monetary amount in the dashboard's currency.
pub type Money = f64;

/// A percentage where 100.0 means 100%. Goal attainment may exceed 100.
pub type Percent = f64;

/// Billing cadence of a sold subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Mensal,
    Trimestral,
    Semestral,
    Anual,
}

impl PlanTier {
    pub const COUNT: usize = 4;

    pub const ALL: [PlanTier; PlanTier::COUNT] = [
        PlanTier::Mensal,
        PlanTier::Trimestral,
        PlanTier::Semestral,
        PlanTier::Anual,
    ];

    /// Position of this tier in enum-indexed tables.
    pub fn index(self) -> usize {
        match self {
            PlanTier::Mensal     => 0,
            PlanTier::Trimestral => 1,
            PlanTier::Semestral  => 2,
            PlanTier::Anual      => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanTier::Mensal     => "mensal",
            PlanTier::Trimestral => "trimestral",
            PlanTier::Semestral  => "semestral",
            PlanTier::Anual      => "anual",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = CommissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommissionError::UnknownPlanTier { value: s.to_string() })
    }
}
