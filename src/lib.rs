//! 다중 시장 주문 분할/라우팅 시뮬레이터
//!
//! 대량 주문을 유동성 가중 구간 분할로 나누고, 스마트 주문 라우팅으로
//! 시장에 배분한 뒤 VWAP/TWAP 벤치마크 대비 실행 품질을 평가합니다.

pub mod config;
pub mod core;
pub mod error;
pub mod market_data;
pub mod models;
pub mod simulation;
pub mod utils;

// 핵심 타입 재노출
pub use crate::error::SimulationError;
pub use crate::models::fill::Fill;
pub use crate::models::market_data::{IntervalObservation, Venue};
pub use crate::models::order::OrderPlan;
pub use crate::market_data::{MarketDataFeed, MarketSnapshot};
pub use crate::simulation::{ExecutionReport, SimulationBuilder, SimulationEngine};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, SimulationError>;
