//! MRR normalization.
//!
//! Sales are paid up front for the plan's whole period. Dividing by the
//! period length gives the monthly-equivalent figure used both for
//! commission reporting and for MRR-based goal attainment. Both sides
//! call [`monthly_recurring_revenue`] so they cannot drift apart.

use crate::{
    config::PlanConfigMap,
    types::{Money, PlanTier},
};

/// Monthly-equivalent value of a sale.
///
/// Returns 0 when `plan_tier` has no entry in `plans`.
pub fn monthly_recurring_revenue(sale_amount: Money, plan_tier: PlanTier, plans: &PlanConfigMap) -> Money {
    match plans.get(plan_tier) {
        // period_months >= 1 is enforced by CommissionConfig::validate;
        // max(1) keeps a hand-built table from dividing by zero.
        Some(plan) => sale_amount / f64::from(plan.period_months.max(1)),
        None => 0.0,
    }
}

/// Sum of [`monthly_recurring_revenue`] over `(amount, tier)` pairs.
pub fn total_mrr<I>(sales: I, plans: &PlanConfigMap) -> Money
where
    I: IntoIterator<Item = (Money, PlanTier)>,
{
    sales
        .into_iter()
        .map(|(amount, tier)| monthly_recurring_revenue(amount, tier, plans))
        .sum()
}
