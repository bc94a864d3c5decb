//! 실행 불변식 속성 테스트
//!
//! 임의의 시장 데이터/주문 조건에서:
//! 1. 체결 합계 <= 총 주문, 체결 합계 == 구간별 체결 합계 == 시장별 합계
//! 2. 잔여 수량은 증가하지 않는다
//! 3. 구간별 체결 <= 구간 계획 수량
//! 4. 억제 조건을 만족하는 구간은 체결 0
//! 5. 같은 시드는 같은 체결 시퀀스

use proptest::prelude::*;
use sor_sim::core::{ChunkRange, RoutingPolicy};
use sor_sim::market_data::InMemoryFeed;
use sor_sim::{MarketSnapshot, SimulationEngine};

#[derive(Debug, Clone)]
struct Scenario {
    series: Vec<Vec<(f64, u64)>>,
    total_order: u64,
    skip_threshold: f64,
    chunk_min: u64,
    chunk_span: u64,
    capped: bool,
    seed: u64,
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (1usize..5, 1usize..30)
        .prop_flat_map(|(venues, intervals)| {
            (
                prop::collection::vec(
                    prop::collection::vec((50.0..150.0_f64, 0u64..20_000), intervals),
                    venues,
                ),
                1u64..200_000,
                0.0..0.02_f64,
                1u64..3_000,
                0u64..5_000,
                any::<bool>(),
                any::<u64>(),
            )
        })
        .prop_map(|(series, total_order, skip_threshold, chunk_min, chunk_span, capped, seed)| Scenario {
            series,
            total_order,
            skip_threshold,
            chunk_min,
            chunk_span,
            capped,
            seed,
        })
}

fn snapshot(scenario: &Scenario) -> MarketSnapshot {
    let mut feed = InMemoryFeed::default();
    for (i, series) in scenario.series.iter().enumerate() {
        feed = feed.with_series(format!("V{}", i), series);
    }
    MarketSnapshot::from_feed(&feed).unwrap()
}

fn engine(scenario: &Scenario) -> SimulationEngine {
    let range = ChunkRange::new(scenario.chunk_min, scenario.chunk_min + scenario.chunk_span).unwrap();
    let policy = if scenario.capped { RoutingPolicy::CapacityCapped } else { RoutingPolicy::Unbounded };
    SimulationEngine::new(scenario.total_order, scenario.skip_threshold, range, policy)
}

fn every_venue_traded(scenario: &Scenario) -> bool {
    scenario.series.iter().all(|s| s.iter().map(|(_, v)| v).sum::<u64>() > 0)
}

proptest! {
    #[test]
    fn quantity_is_conserved(scenario in arb_scenario()) {
        prop_assume!(every_venue_traded(&scenario));

        let report = engine(&scenario).run_seeded(&snapshot(&scenario), scenario.seed).unwrap();

        let by_fill: u64 = report.fills.iter().map(|f| f.quantity).sum();
        let by_interval: u64 = report.interval_executed().iter().sum();
        let by_venue: u64 = report.venue_totals.iter().map(|v| v.executed).sum();

        prop_assert!(by_fill <= scenario.total_order);
        prop_assert_eq!(by_fill, by_interval);
        prop_assert_eq!(by_fill, by_venue);
        prop_assert!(report.plan.planned_total() <= scenario.total_order);
        prop_assert!(report.fills.iter().all(|f| f.quantity > 0));
    }

    #[test]
    fn remaining_quantity_never_increases(scenario in arb_scenario()) {
        prop_assume!(every_venue_traded(&scenario));

        let report = engine(&scenario).run_seeded(&snapshot(&scenario), scenario.seed).unwrap();

        let mut previous = scenario.total_order;
        for remaining in &report.plan.remaining_after {
            prop_assert!(*remaining <= previous);
            previous = *remaining;
        }
    }

    #[test]
    fn executed_within_plan_and_skips_respected(scenario in arb_scenario()) {
        prop_assume!(every_venue_traded(&scenario));

        let snap = snapshot(&scenario);
        let report = engine(&scenario).run_seeded(&snap, scenario.seed).unwrap();

        for row in &report.schedule {
            prop_assert!(row.executed <= report.plan.slices[row.interval]);

            let i = row.interval;
            if i > 0 && snap.mean_price(i) > snap.mean_price(i - 1) * (1.0 + scenario.skip_threshold) {
                prop_assert_eq!(row.executed, 0);
            }
        }
    }

    #[test]
    fn same_seed_same_fills(scenario in arb_scenario()) {
        prop_assume!(every_venue_traded(&scenario));

        let snap = snapshot(&scenario);
        let first = engine(&scenario).run_seeded(&snap, scenario.seed).unwrap();
        let second = engine(&scenario).run_seeded(&snap, scenario.seed).unwrap();

        prop_assert_eq!(
            serde_json::to_string(&first.fills).unwrap(),
            serde_json::to_string(&second.fills).unwrap()
        );
    }
}
