//! Goal-attainment helpers for callers.
//!
//! The calculators take attainment as an input. These helpers exist so
//! callers that measure closers by MRR use the same normalization as
//! the commission breakdown.

use crate::{
    closer::SaleRecord,
    config::PlanConfigMap,
    mrr::total_mrr,
    types::{Money, Percent},
};

/// `actual / target * 100`, clamped to >= 0. A non-positive target
/// yields 0.
pub fn goal_attainment_percent(actual: f64, target: f64) -> Percent {
    if target > 0.0 {
        (actual / target * 100.0).max(0.0)
    } else {
        0.0
    }
}

/// Closer attainment measured as period MRR against an MRR target.
pub fn closer_mrr_attainment(sales: &[SaleRecord], target_mrr: Money, plans: &PlanConfigMap) -> Percent {
    let actual = total_mrr(sales.iter().map(|s| (s.sale_amount, s.plan_tier)), plans);
    goal_attainment_percent(actual, target_mrr)
}
