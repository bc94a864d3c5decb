//! 분할/라우팅 엔진의 핵심 구현체

pub mod allocation_scheduler;
pub mod execution_ledger;
pub mod performance_evaluator;
pub mod skip_guard;
pub mod smart_order_router;
pub mod vwap_calculator;

pub use allocation_scheduler::{AllocationScheduler, SchedulerState};
pub use execution_ledger::{ExecutionLedger, VenueAllocation};
pub use performance_evaluator::{ExecutionSummary, PerformanceEvaluator};
pub use skip_guard::{SkipDecision, SkipGuard};
pub use smart_order_router::{ChunkRange, RoutingPolicy, SmartOrderRouter, VenueScore};
pub use vwap_calculator::{VenueBenchmark, VwapCalculator};
