use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::allocation_scheduler::AllocationScheduler;
use crate::core::execution_ledger::ExecutionLedger;
use crate::core::performance_evaluator::PerformanceEvaluator;
use crate::core::skip_guard::{SkipDecision, SkipGuard};
use crate::core::smart_order_router::{ChunkRange, RoutingPolicy, SmartOrderRouter};
use crate::core::vwap_calculator::VwapCalculator;
use crate::error::SimulationError;
use crate::market_data::snapshot::MarketSnapshot;
use crate::utils::logging;
use super::result::{ExecutionReport, ScheduleRow};

/// 시뮬레이션 엔진 - 분할 계획, 실행 억제, 라우팅, 장부 기록을 한 번의 전진 패스로 수행
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    total_order: u64,
    skip_guard: SkipGuard,
    router: SmartOrderRouter,
    iceberg_visible: Option<u64>,
}

impl SimulationEngine {
    /// 새로운 시뮬레이션 엔진 생성
    pub fn new(
        total_order: u64,
        skip_threshold: f64,
        chunk_range: ChunkRange,
        policy: RoutingPolicy,
    ) -> Self {
        SimulationEngine {
            total_order,
            skip_guard: SkipGuard::new(skip_threshold),
            router: SmartOrderRouter::new(chunk_range, policy),
            iceberg_visible: None,
        }
    }

    /// 아이스버그 노출 수량 설정
    ///
    /// 설정 호환을 위해 보관만 하며 라우팅에는 쓰지 않는다.
    pub fn with_iceberg_visible(mut self, visible: u64) -> Self {
        self.iceberg_visible = Some(visible);
        self
    }

    pub fn total_order(&self) -> u64 {
        self.total_order
    }

    pub fn iceberg_visible(&self) -> Option<u64> {
        self.iceberg_visible
    }

    /// 시드로 난수 생성기를 한 번 만들어 실행
    pub fn run_seeded(&self, snapshot: &MarketSnapshot, seed: u64) -> Result<ExecutionReport, SimulationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut report = self.run(snapshot, &mut rng)?;
        report.seed = Some(seed);
        Ok(report)
    }

    /// 시뮬레이션 실행
    pub fn run<R: Rng>(&self, snapshot: &MarketSnapshot, rng: &mut R) -> Result<ExecutionReport, SimulationError> {
        let started_at = Utc::now();
        let num_intervals = snapshot.num_intervals();

        logging::log_run_start(self.total_order, snapshot.venues().len(), num_intervals);
        if let Some(visible) = self.iceberg_visible {
            log::debug!("iceberg_visible = {} (라우팅에 영향 없음)", visible);
        }

        // 분할 계획과 벤치마크는 실행 전에 한 번만 계산 (세션 거래량 0은 설정 오류가 먼저)
        let plan = AllocationScheduler::new(self.total_order, snapshot.aggregate_volumes())?.build_plan();
        let benchmarks = VwapCalculator::compute(snapshot)?;

        let mut ledger = ExecutionLedger::new(snapshot.venues());
        let mut schedule = Vec::with_capacity(num_intervals);
        let mut skipped_intervals = 0;

        for interval in 0..num_intervals {
            let planned = plan.slice(interval);
            let mut skipped = false;

            if planned > 0 {
                match self.skip_guard.evaluate(snapshot, interval) {
                    SkipDecision::Skip { previous_mean, current_mean } => {
                        logging::log_interval_skipped(interval, planned, previous_mean, current_mean);
                        skipped = true;
                        skipped_intervals += 1;
                    }
                    SkipDecision::Proceed => {
                        let fills = self.router.route(interval, planned, &snapshot.quotes_at(interval), rng)?;
                        for fill in fills {
                            logging::log_fill(&fill);
                            ledger.record(fill)?;
                        }
                    }
                }
            }

            let executed = ledger.close_interval(interval, planned)?;
            schedule.push(ScheduleRow {
                interval,
                planned,
                executed,
                avg_market_price: snapshot.mean_price(interval),
                total_liquidity: snapshot.aggregate_volume(interval),
                skipped,
                remaining_after: plan.remaining_after[interval],
            });
        }

        ledger.check_invariants()?;

        let summary = PerformanceEvaluator::evaluate(
            ledger.fills(),
            &benchmarks,
            snapshot,
            self.total_order,
            skipped_intervals,
        );
        logging::log_run_end(&summary);

        Ok(ExecutionReport {
            started_at,
            finished_at: Utc::now(),
            seed: None,
            plan,
            schedule,
            venue_totals: ledger.venue_totals(),
            fills: ledger.fills().to_vec(),
            benchmarks,
            summary,
        })
    }
}
