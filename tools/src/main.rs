//! commission-runner: computes one collaborator's commission for a period.
//!
//! Usage:
//!   commission-runner --input data/inputs/closer_example.json
//!   commission-runner --input sales.json --target-mrr 1500 --json
//!   commission-runner --input sales.json --db config.db --save-config

use anyhow::{anyhow, Result};
use commission_core::{
    commission::{calculate, CommissionInput, CommissionResult},
    config::CommissionConfig,
    goal::closer_mrr_attainment,
    store::{ConfigRepository, ConfigStore},
};
use std::env;

/// Period facts as exported by the dashboard.
#[derive(serde::Deserialize)]
struct PeriodInput {
    #[serde(default)]
    goal_attainment: Option<f64>,
    #[serde(flatten)]
    facts: CommissionInput,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let db = string_arg(&args, "--db");
    let save_config = args.iter().any(|a| a == "--save-config");
    let json_output = args.iter().any(|a| a == "--json");
    let target_mrr = target_mrr_arg(&args)?;
    let input_path =
        string_arg(&args, "--input").ok_or_else(|| anyhow!("missing required --input FILE"))?;

    let config = match db {
        Some(db) => load_from_store(db, data_dir, save_config)?,
        None => CommissionConfig::load(data_dir)?,
    };

    let content = std::fs::read_to_string(input_path)
        .map_err(|e| anyhow!("Cannot read {input_path}: {e}"))?;
    let input: PeriodInput = serde_json::from_str(&content)?;

    let goal_attainment = resolve_goal_attainment(&input, target_mrr, &config, input_path)?;
    if goal_attainment < 0.0 {
        log::warn!("goal attainment {goal_attainment:.2}% is negative; treating as 0");
    }
    let goal_attainment = goal_attainment.max(0.0);

    let result = calculate(&input.facts, goal_attainment, &config);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&config, &result);
    }

    Ok(())
}

fn load_from_store(db: &str, data_dir: &str, save_config: bool) -> Result<CommissionConfig> {
    let store = ConfigStore::open(db)?;
    store.migrate()?;

    if save_config {
        let config = CommissionConfig::load(data_dir)?;
        let revision = store.save(&config)?;
        log::info!("saved config version {} ({})", revision.version, revision.revision_id);
    }

    store
        .current()?
        .ok_or_else(|| anyhow!("no commission config saved in {db}; rerun with --save-config"))
}

/// `--target-mrr` as a finite, non-negative number, if given.
fn target_mrr_arg(args: &[String]) -> Result<Option<f64>> {
    if !args.iter().any(|a| a == "--target-mrr") {
        return Ok(None);
    }
    let raw = string_arg(args, "--target-mrr").ok_or_else(|| anyhow!("--target-mrr needs a value"))?;
    let target: f64 = raw
        .parse()
        .map_err(|e| anyhow!("--target-mrr: '{raw}' is not a number: {e}"))?;
    if !target.is_finite() || target < 0.0 {
        return Err(anyhow!("--target-mrr: must be a non-negative number, got {raw}"));
    }
    Ok(Some(target))
}

fn resolve_goal_attainment(
    input: &PeriodInput,
    target_mrr: Option<f64>,
    config: &CommissionConfig,
    input_path: &str,
) -> Result<f64> {
    match (&input.facts, target_mrr) {
        (CommissionInput::Closer { sales }, Some(target)) => {
            Ok(closer_mrr_attainment(sales, target, &config.plans))
        }
        (CommissionInput::Sdr { .. }, Some(_)) => Err(anyhow!(
            "{input_path}: --target-mrr only applies to closer inputs"
        )),
        (_, None) => input.goal_attainment.ok_or_else(|| {
            anyhow!("{input_path}: goal_attainment is required unless --target-mrr is given for a closer")
        }),
    }
}

fn print_summary(config: &CommissionConfig, result: &CommissionResult) {
    println!("=== COMMISSION ({}) ===", result.role());
    println!("  config version:  {}", config.version);
    println!("  goal attainment: {:.2}%", result.goal_attainment());

    match result {
        CommissionResult::Sdr(r) => {
            println!("  qualified:       {}", r.meeting_counts.qualified_count);
            println!("  closed:          {}", r.meeting_counts.closed_venue_count);
            println!("  base:            ${:.2}", r.base_amount);
            println!("  bonus:           ${:.2}", r.bonus_amount);
        }
        CommissionResult::Closer(r) => {
            println!(
                "  checkpoint:      {:?} ({:.1}%)",
                r.checkpoint.tier,
                r.checkpoint.fraction * 100.0
            );
            println!("  total MRR:       ${:.2}", r.total_mrr);
            println!();
            for (i, d) in r.per_sale_detail.iter().enumerate() {
                println!(
                    "  #{:<3} {:<10} ${:>9.2} | base ${:>8.2} | {:>+7.1}% | fixed ${:.2} + bonus ${:.2} = ${:.2}",
                    i + 1,
                    d.plan_tier.as_str(),
                    d.sale_amount,
                    d.base_price_at_sale_time,
                    d.percent_above_base,
                    d.fixed_amount_at_checkpoint,
                    d.bonus_amount,
                    d.sale_commission_total
                );
            }
            println!();
            println!("  sales:           ${:.2}", r.sales_commission_amount);
            println!("  goal bonus:      ${:.2}", r.goal_bonus_amount);
        }
    }

    println!("  TOTAL:           ${:.2}", result.total());
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
