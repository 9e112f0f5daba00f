//! The calculators are pure: identical inputs give identical outputs,
//! regardless of call order or thread.

use commission_core::{
    closer::SaleRecord,
    commission::{calculate, CommissionInput},
    config::CommissionConfig,
    sdr::MeetingCounts,
    types::PlanTier,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

fn random_inputs(seed: u64, count: usize) -> Vec<(CommissionInput, f64)> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let attainment = rng.gen_range(0.0..160.0);
            let input = if rng.gen_bool(0.5) {
                CommissionInput::Sdr {
                    meetings: MeetingCounts {
                        qualified_count: rng.gen_range(0..40),
                        closed_venue_count: rng.gen_range(0..10),
                    },
                }
            } else {
                let sales = (0..rng.gen_range(0..8))
                    .map(|_| {
                        let tier = PlanTier::ALL[rng.gen_range(0..PlanTier::COUNT)];
                        SaleRecord {
                            plan_tier: tier,
                            sale_amount: rng.gen_range(0.0..2500.0),
                            base_price_at_sale_time: rng.gen_range(0.0..1000.0),
                        }
                    })
                    .collect();
                CommissionInput::Closer { sales }
            };
            (input, attainment)
        })
        .collect()
}

#[test]
fn repeated_calls_give_identical_results() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = CommissionConfig::default_test();

    for (input, attainment) in random_inputs(0xDEAD_BEEF, 200) {
        let a = calculate(&input, attainment, &config);
        let b = calculate(&input, attainment, &config);
        assert_eq!(a, b, "divergent results for {input:?} at {attainment}%");
    }
}

#[test]
fn concurrent_calls_share_one_config() {
    let config = CommissionConfig::default_test();
    let inputs = random_inputs(0x5EED, 64);
    let expected: Vec<_> = inputs
        .iter()
        .map(|(input, attainment)| calculate(input, *attainment, &config))
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    inputs
                        .iter()
                        .map(|(input, attainment)| calculate(input, *attainment, &config))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn calculation_does_not_mutate_config() {
    let config = CommissionConfig::default_test();
    let before = config.clone();
    for (input, attainment) in random_inputs(7, 20) {
        let _ = calculate(&input, attainment, &config);
    }
    assert_eq!(config, before);
}
