//! Role dispatch over the two calculators.

use crate::{
    closer::{calculate_closer_commission, CloserCommissionResult, SaleRecord},
    config::CommissionConfig,
    sdr::{calculate_sdr_commission, MeetingCounts, SdrCommissionResult},
    types::{Money, Percent},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Sdr,
    Closer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Sdr    => f.write_str("sdr"),
            Role::Closer => f.write_str("closer"),
        }
    }
}

/// Facts for one collaborator and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum CommissionInput {
    Sdr { meetings: MeetingCounts },
    Closer { sales: Vec<SaleRecord> },
}

impl CommissionInput {
    pub fn role(&self) -> Role {
        match self {
            CommissionInput::Sdr { .. }    => Role::Sdr,
            CommissionInput::Closer { .. } => Role::Closer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum CommissionResult {
    Sdr(SdrCommissionResult),
    Closer(CloserCommissionResult),
}

impl CommissionResult {
    pub fn role(&self) -> Role {
        match self {
            CommissionResult::Sdr(_)    => Role::Sdr,
            CommissionResult::Closer(_) => Role::Closer,
        }
    }

    pub fn total(&self) -> Money {
        match self {
            CommissionResult::Sdr(r)    => r.total,
            CommissionResult::Closer(r) => r.total,
        }
    }

    pub fn goal_attainment(&self) -> Percent {
        match self {
            CommissionResult::Sdr(r)    => r.goal_attainment,
            CommissionResult::Closer(r) => r.goal_attainment,
        }
    }
}

/// Run the calculator for the input's role with the matching config slice.
pub fn calculate(
    input: &CommissionInput,
    goal_attainment_percent: Percent,
    config: &CommissionConfig,
) -> CommissionResult {
    match input {
        CommissionInput::Sdr { meetings } => CommissionResult::Sdr(calculate_sdr_commission(
            *meetings,
            goal_attainment_percent,
            &config.sdr,
        )),
        CommissionInput::Closer { sales } => CommissionResult::Closer(calculate_closer_commission(
            sales,
            goal_attainment_percent,
            &config.closer,
            &config.plans,
        )),
    }
}
