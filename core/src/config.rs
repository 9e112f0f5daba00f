use crate::error::{CommissionError, EngineResult};
use crate::types::{Money, Percent, PlanTier};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

// ── Plan-tier tables ───────────────────────────────────────────────

/// A table with one optional slot per plan tier.
///
/// On disk it is a JSON object keyed by tier name. A tier left out of
/// the object stays empty, and lookups on an empty slot fall back to
/// zero in the calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTable<T> {
    slots: [Option<T>; PlanTier::COUNT],
}

impl<T> PlanTable<T> {
    pub fn new() -> Self {
        Self { slots: [None, None, None, None] }
    }

    pub fn get(&self, tier: PlanTier) -> Option<&T> {
        self.slots[tier.index()].as_ref()
    }

    /// Set the entry for `tier`, returning the previous one.
    pub fn insert(&mut self, tier: PlanTier, value: T) -> Option<T> {
        self.slots[tier.index()].replace(value)
    }

    pub fn remove(&mut self, tier: PlanTier) -> Option<T> {
        self.slots[tier.index()].take()
    }

    /// Configured entries in tier order.
    pub fn iter(&self) -> impl Iterator<Item = (PlanTier, &T)> {
        PlanTier::ALL
            .into_iter()
            .filter_map(move |tier| self.get(tier).map(|v| (tier, v)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for PlanTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(PlanTier, T)> for PlanTable<T> {
    fn from_iter<I: IntoIterator<Item = (PlanTier, T)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (tier, value) in iter {
            table.insert(tier, value);
        }
        table
    }
}

impl<T, const N: usize> From<[(PlanTier, T); N]> for PlanTable<T> {
    fn from(entries: [(PlanTier, T); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<T: Serialize> Serialize for PlanTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PlanTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<PlanTier, T>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

// ── SDR ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdrConfig {
    pub per_qualified_meeting: Money,
    pub per_meeting_that_closed: Money,
    /// Flat bonus once the SDR reaches 100% of goal.
    pub bonus_at_goal_100: Money,
}

// ── Closer ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalBonusConfig {
    pub at_100: Money,
    pub at_110: Money,
    pub at_120: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloserConfig {
    pub fixed_amount_by_plan_tier: PlanTable<Money>,
    pub goal_bonus: GoalBonusConfig,
}

// ── Plans ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub base_price: Money,
    /// Months paid up front; always >= 1.
    pub period_months: u32,
    /// Share of the over-base percentage paid as bonus, in percent.
    pub bonus_factor_percent: Percent,
}

pub type PlanConfigMap = PlanTable<PlanConfig>;

// ── Checkpoints ────────────────────────────────────────────────────

/// Payout fractions per checkpoint tier.
///
/// Stored with the rest of the config but fixed: validation rejects
/// any value other than [`CheckpointFractions::FIXED`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckpointFractions {
    pub tier1: f64,
    pub tier2: f64,
    pub tier3: f64,
}

impl CheckpointFractions {
    pub const FIXED: CheckpointFractions = CheckpointFractions {
        tier1: 1.0 / 3.0,
        tier2: 2.0 / 3.0,
        tier3: 1.0,
    };
}

impl Default for CheckpointFractions {
    fn default() -> Self {
        Self::FIXED
    }
}

// ── Top-level config ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionConfig {
    /// Version label of this parameter set. The repository assigns it
    /// on save.
    #[serde(default)]
    pub version: u32,
    pub sdr: SdrConfig,
    pub closer: CloserConfig,
    pub plans: PlanConfigMap,
    #[serde(default)]
    pub checkpoint_fractions: CheckpointFractions,
}

impl CommissionConfig {
    /// Load from the data/ directory.
    /// In tests, use CommissionConfig::default_test().
    pub fn load(data_dir: &str) -> EngineResult<Self> {
        let path = format!("{data_dir}/commission/commission_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|source| CommissionError::Io { path: path.clone(), source })?;
        let config = Self::from_json_str(&content)?;
        log::info!(
            "config: loaded version {} from {path} ({} plans)",
            config.version,
            config.plans.len()
        );
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> EngineResult<Self> {
        let config: CommissionConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject parameter sets the calculators cannot use meaningfully.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("sdr.per_qualified_meeting", self.sdr.per_qualified_meeting)?;
        check_amount("sdr.per_meeting_that_closed", self.sdr.per_meeting_that_closed)?;
        check_amount("sdr.bonus_at_goal_100", self.sdr.bonus_at_goal_100)?;

        for (tier, amount) in self.closer.fixed_amount_by_plan_tier.iter() {
            check_amount(&format!("closer.fixed_amount_by_plan_tier.{tier}"), *amount)?;
        }
        let bonus = &self.closer.goal_bonus;
        check_amount("closer.goal_bonus.at_100", bonus.at_100)?;
        check_amount("closer.goal_bonus.at_110", bonus.at_110)?;
        check_amount("closer.goal_bonus.at_120", bonus.at_120)?;

        for (tier, plan) in self.plans.iter() {
            check_amount(&format!("plans.{tier}.base_price"), plan.base_price)?;
            check_amount(&format!("plans.{tier}.bonus_factor_percent"), plan.bonus_factor_percent)?;
            if plan.period_months == 0 {
                return Err(invalid(
                    &format!("plans.{tier}.period_months"),
                    "must be at least 1",
                ));
            }
        }

        let fixed = CheckpointFractions::FIXED;
        let actual = self.checkpoint_fractions;
        for (name, want, got) in [
            ("tier1", fixed.tier1, actual.tier1),
            ("tier2", fixed.tier2, actual.tier2),
            ("tier3", fixed.tier3, actual.tier3),
        ] {
            if (want - got).abs() > 1e-9 {
                return Err(invalid(
                    &format!("checkpoint_fractions.{name}"),
                    &format!("checkpoint fractions are fixed; expected {want:.6}, got {got:.6}"),
                ));
            }
        }

        Ok(())
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            version: 0,
            sdr: SdrConfig {
                per_qualified_meeting: 10.0,
                per_meeting_that_closed: 30.0,
                bonus_at_goal_100: 200.0,
            },
            closer: CloserConfig {
                fixed_amount_by_plan_tier: [
                    (PlanTier::Mensal, 15.0),
                    (PlanTier::Trimestral, 40.0),
                    (PlanTier::Semestral, 75.0),
                    (PlanTier::Anual, 140.0),
                ]
                .into(),
                goal_bonus: GoalBonusConfig {
                    at_100: 300.0,
                    at_110: 500.0,
                    at_120: 800.0,
                },
            },
            plans: [
                (
                    PlanTier::Mensal,
                    PlanConfig { base_price: 100.0, period_months: 1, bonus_factor_percent: 50.0 },
                ),
                (
                    PlanTier::Trimestral,
                    PlanConfig { base_price: 270.0, period_months: 3, bonus_factor_percent: 50.0 },
                ),
                (
                    PlanTier::Semestral,
                    PlanConfig { base_price: 510.0, period_months: 6, bonus_factor_percent: 40.0 },
                ),
                (
                    PlanTier::Anual,
                    PlanConfig { base_price: 960.0, period_months: 12, bonus_factor_percent: 30.0 },
                ),
            ]
            .into(),
            checkpoint_fractions: CheckpointFractions::FIXED,
        }
    }
}

fn check_amount(field: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(invalid(field, &format!("must not be negative (got {value})")));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> CommissionError {
    CommissionError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_field(result: EngineResult<()>) -> String {
        match result {
            Err(CommissionError::InvalidConfig { field, .. }) => field,
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn default_test_config_is_valid() {
        CommissionConfig::default_test().validate().unwrap();
    }

    #[test]
    fn zero_period_months_rejected() {
        let mut config = CommissionConfig::default_test();
        config.plans.insert(
            PlanTier::Anual,
            PlanConfig { base_price: 960.0, period_months: 0, bonus_factor_percent: 30.0 },
        );
        assert_eq!(invalid_field(config.validate()), "plans.anual.period_months");
    }

    #[test]
    fn negative_fixed_amount_rejected() {
        let mut config = CommissionConfig::default_test();
        config.closer.fixed_amount_by_plan_tier.insert(PlanTier::Trimestral, -1.0);
        assert_eq!(
            invalid_field(config.validate()),
            "closer.fixed_amount_by_plan_tier.trimestral"
        );
    }

    #[test]
    fn non_finite_amount_rejected() {
        let mut config = CommissionConfig::default_test();
        config.sdr.bonus_at_goal_100 = f64::NAN;
        assert_eq!(invalid_field(config.validate()), "sdr.bonus_at_goal_100");
    }

    #[test]
    fn altered_checkpoint_fractions_rejected() {
        let mut config = CommissionConfig::default_test();
        config.checkpoint_fractions.tier2 = 0.5;
        assert_eq!(invalid_field(config.validate()), "checkpoint_fractions.tier2");
    }

    #[test]
    fn json_without_fractions_or_version_uses_defaults() {
        let json = r#"{
            "sdr": { "per_qualified_meeting": 10, "per_meeting_that_closed": 30, "bonus_at_goal_100": 200 },
            "closer": {
                "fixed_amount_by_plan_tier": { "mensal": 15 },
                "goal_bonus": { "at_100": 300, "at_110": 500, "at_120": 800 }
            },
            "plans": { "mensal": { "base_price": 100, "period_months": 1, "bonus_factor_percent": 50 } }
        }"#;
        let config = CommissionConfig::from_json_str(json).unwrap();
        assert_eq!(config.version, 0);
        assert_eq!(config.checkpoint_fractions, CheckpointFractions::FIXED);
        assert_eq!(config.closer.fixed_amount_by_plan_tier.get(PlanTier::Mensal), Some(&15.0));
        assert_eq!(config.closer.fixed_amount_by_plan_tier.get(PlanTier::Anual), None);
        assert_eq!(config.plans.len(), 1);
    }

    #[test]
    fn unknown_tier_key_in_json_is_a_parse_error() {
        let json = r#"{ "bienal": 10 }"#;
        assert!(serde_json::from_str::<PlanTable<f64>>(json).is_err());
    }

    #[test]
    fn plan_table_serializes_only_configured_tiers() {
        let mut table: PlanTable<f64> = [(PlanTier::Anual, 140.0), (PlanTier::Mensal, 15.0)].into();
        table.remove(PlanTier::Anual);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json, serde_json::json!({ "mensal": 15.0 }));
    }
}
