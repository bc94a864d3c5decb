use crate::config::SimulationConfig;
use crate::core::smart_order_router::{ChunkRange, RoutingPolicy};
use crate::core::vwap_calculator::VwapCalculator;
use crate::error::SimulationError;
use crate::market_data::provider::MarketDataFeed;
use crate::market_data::snapshot::MarketSnapshot;
use crate::market_data::synthetic::SyntheticFeed;
use super::engine::SimulationEngine;
use super::result::ExecutionReport;

/// 실행 준비가 끝난 시뮬레이션 시나리오
pub struct Simulation {
    engine: SimulationEngine,
    snapshot: MarketSnapshot,
    seed: u64,
}

impl Simulation {
    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> &MarketSnapshot {
        &self.snapshot
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 시나리오 실행
    pub fn run(&self) -> Result<ExecutionReport, SimulationError> {
        self.engine.run_seeded(&self.snapshot, self.seed)
    }
}

/// 시뮬레이션 빌더 패턴
pub struct SimulationBuilder {
    feed: Option<Box<dyn MarketDataFeed>>,
    total_order: u64,
    skip_threshold: f64,
    chunk_min: u64,
    chunk_max: u64,
    policy: RoutingPolicy,
    iceberg_visible: Option<u64>,
    seed: u64,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        let chunk = ChunkRange::default();
        SimulationBuilder {
            feed: None,
            total_order: 0,
            skip_threshold: 0.005,
            chunk_min: chunk.min(),
            chunk_max: chunk.max(),
            policy: RoutingPolicy::default(),
            iceberg_visible: None,
            seed: 42,
        }
    }

    /// 설정값으로 빌더 구성 (시장 데이터는 합성 공급자)
    pub fn from_config(config: &SimulationConfig) -> Self {
        let feed = SyntheticFeed::from_config(
            config.venues(),
            config.order.num_intervals,
            config.order.seed,
            &config.market,
        );

        SimulationBuilder::new()
            .feed(Box::new(feed))
            .total_order(config.order.total_order)
            .skip_threshold(config.order.skip_threshold)
            .chunk_range(config.routing.chunk_min, config.routing.chunk_max)
            .routing_policy(config.routing.policy)
            .iceberg_visible(config.order.iceberg_visible)
            .seed(config.order.seed)
    }

    pub fn feed(mut self, feed: Box<dyn MarketDataFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn total_order(mut self, total_order: u64) -> Self {
        self.total_order = total_order;
        self
    }

    pub fn skip_threshold(mut self, threshold: f64) -> Self {
        self.skip_threshold = threshold;
        self
    }

    pub fn chunk_range(mut self, min: u64, max: u64) -> Self {
        self.chunk_min = min;
        self.chunk_max = max;
        self
    }

    pub fn routing_policy(mut self, policy: RoutingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn iceberg_visible(mut self, visible: u64) -> Self {
        self.iceberg_visible = Some(visible);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// 설정 검증 후 시나리오 생성
    ///
    /// 설정/데이터 오류는 모두 여기서 실행 전에 드러난다.
    /// 세션 거래량이 0이면 `ConfigurationError`, 거래량 0인 시장이 있으면 `InvalidBenchmark`.
    pub fn build(self) -> Result<Simulation, SimulationError> {
        if self.total_order == 0 {
            return Err(SimulationError::ConfigurationError("total order must be positive".to_string()));
        }
        if !self.skip_threshold.is_finite() || self.skip_threshold < 0.0 {
            return Err(SimulationError::ConfigurationError(format!(
                "skip threshold must be a non-negative fraction, got {}",
                self.skip_threshold
            )));
        }
        let chunk_range = ChunkRange::new(self.chunk_min, self.chunk_max)?;

        let feed = self.feed
            .ok_or_else(|| SimulationError::ConfigurationError("market data feed is not set".to_string()))?;
        let snapshot = MarketSnapshot::from_feed(feed.as_ref())?;

        if snapshot.aggregate_volumes().iter().all(|&v| v == 0) {
            return Err(SimulationError::ConfigurationError("aggregate session volume is zero".to_string()));
        }
        // 시장별 벤치마크가 정의되지 않으면 실행 전에 실패
        VwapCalculator::compute(&snapshot)?;

        let mut engine = SimulationEngine::new(self.total_order, self.skip_threshold, chunk_range, self.policy);
        if let Some(visible) = self.iceberg_visible {
            engine = engine.with_iceberg_visible(visible);
        }

        Ok(Simulation {
            engine,
            snapshot,
            seed: self.seed,
        })
    }
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
