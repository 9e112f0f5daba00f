//! Closer calculator — per-sale fixed amount scaled by the checkpoint
//! fraction, plus a bonus proportional to how far the sale went above
//! the plan's base price, plus a stepped goal bonus for the period.
//!
//! Per sale (f = checkpoint fraction for the whole batch):
//!   fixed_at_checkpoint = fixed_amount[tier] * f
//!   percent_above_base  = (amount - base) / base * 100   (0 when base <= 0)
//!   bonus_pct           = percent_above_base * bonus_factor[tier] / 100
//!   bonus               = fixed_at_checkpoint * bonus_pct / 100
//!
//! A sale below base gets a negative bonus. That is intended.

use crate::{
    checkpoint::{classify, Classification},
    config::{CloserConfig, GoalBonusConfig, PlanConfigMap},
    mrr::monthly_recurring_revenue,
    types::{Money, Percent, PlanTier},
};
use serde::{Deserialize, Serialize};

/// A sale as the caller read it from storage. Never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub plan_tier: PlanTier,
    pub sale_amount: Money,
    pub base_price_at_sale_time: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDetail {
    pub plan_tier: PlanTier,
    pub sale_amount: Money,
    pub base_price_at_sale_time: Money,
    pub mrr: Money,
    pub fixed_amount_at_checkpoint: Money,
    pub percent_above_base: Percent,
    pub bonus_percent_of_commission: Percent,
    pub bonus_amount: Money,
    pub sale_commission_total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloserCommissionResult {
    pub checkpoint: Classification,
    pub sales_commission_amount: Money,
    pub goal_bonus_amount: Money,
    pub total: Money,
    /// Same order as the input sales.
    pub per_sale_detail: Vec<SaleDetail>,
    pub total_mrr: Money,
    pub goal_attainment: Percent,
}

pub fn calculate_closer_commission(
    sales: &[SaleRecord],
    goal_attainment_percent: Percent,
    config: &CloserConfig,
    plans: &PlanConfigMap,
) -> CloserCommissionResult {
    let checkpoint = classify(goal_attainment_percent);

    let per_sale_detail: Vec<SaleDetail> = sales
        .iter()
        .map(|sale| sale_detail(sale, checkpoint.fraction, config, plans))
        .collect();

    let sales_commission_amount: Money =
        per_sale_detail.iter().map(|d| d.sale_commission_total).sum();
    let total_mrr: Money = per_sale_detail.iter().map(|d| d.mrr).sum();
    let goal_bonus_amount = goal_bonus(goal_attainment_percent, &config.goal_bonus);
    let total = sales_commission_amount + goal_bonus_amount;

    log::debug!(
        "closer: {} sales attainment={:.2}% checkpoint={:?} mrr=${:.2} sales=${:.2} goal_bonus=${:.2} total=${:.2}",
        sales.len(),
        goal_attainment_percent,
        checkpoint.tier,
        total_mrr,
        sales_commission_amount,
        goal_bonus_amount,
        total
    );

    CloserCommissionResult {
        checkpoint,
        sales_commission_amount,
        goal_bonus_amount,
        total,
        per_sale_detail,
        total_mrr,
        goal_attainment: goal_attainment_percent,
    }
}

/// Stepped goal bonus, evaluated highest threshold first. Never additive.
pub fn goal_bonus(goal_attainment_percent: Percent, config: &GoalBonusConfig) -> Money {
    if goal_attainment_percent >= 120.0 {
        config.at_120
    } else if goal_attainment_percent >= 110.0 {
        config.at_110
    } else if goal_attainment_percent >= 100.0 {
        config.at_100
    } else {
        0.0
    }
}

/// Signed percentage of `sale_amount` over `base_price`; 0 without a base.
pub fn percent_above_base(sale_amount: Money, base_price: Money) -> Percent {
    if base_price > 0.0 {
        (sale_amount - base_price) / base_price * 100.0
    } else {
        0.0
    }
}

fn sale_detail(
    sale: &SaleRecord,
    fraction: f64,
    config: &CloserConfig,
    plans: &PlanConfigMap,
) -> SaleDetail {
    let tier = sale.plan_tier;

    let fixed_amount = match config.fixed_amount_by_plan_tier.get(tier) {
        Some(amount) => *amount,
        None => {
            log::warn!("closer: no fixed amount configured for plan tier {tier}; using 0");
            0.0
        }
    };
    let bonus_factor_percent = match plans.get(tier) {
        Some(plan) => plan.bonus_factor_percent,
        None => {
            log::warn!("closer: plan tier {tier} missing from plans; MRR and bonus factor are 0");
            0.0
        }
    };

    let fixed_amount_at_checkpoint = fixed_amount * fraction;
    let mrr = monthly_recurring_revenue(sale.sale_amount, tier, plans);
    let percent_above_base = percent_above_base(sale.sale_amount, sale.base_price_at_sale_time);
    let bonus_percent_of_commission = percent_above_base * bonus_factor_percent / 100.0;
    let bonus_amount = fixed_amount_at_checkpoint * (bonus_percent_of_commission / 100.0);
    let sale_commission_total = fixed_amount_at_checkpoint + bonus_amount;

    SaleDetail {
        plan_tier: tier,
        sale_amount: sale.sale_amount,
        base_price_at_sale_time: sale.base_price_at_sale_time,
        mrr,
        fixed_amount_at_checkpoint,
        percent_above_base,
        bonus_percent_of_commission,
        bonus_amount,
        sale_commission_total,
    }
}
