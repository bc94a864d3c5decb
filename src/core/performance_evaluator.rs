/**
* filename : performance_evaluator
* author : HAMA
* date: 2025. 5. 8.
* description: 
**/

use serde::{Deserialize, Serialize};

use crate::core::vwap_calculator::VenueBenchmark;
use crate::error::SimulationError;
use crate::market_data::snapshot::MarketSnapshot;
use crate::models::fill::Fill;
use crate::utils::math;

/// 실행 품질 요약
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionSummary {
  /// 총 주문 수량
  pub total_order: u64,
  /// 총 체결 수량
  pub total_executed: u64,
  /// 체결 비율 (체결 / 주문)
  pub fill_rate: f64,
  /// 체결 건수
  pub fill_count: usize,
  /// 억제된 구간 수
  pub skipped_intervals: usize,
  /// 수량 가중 평균 체결가 (체결이 없으면 None)
  pub avg_execution_price: Option<f64>,
  /// 시장별 세션 VWAP의 평균
  pub benchmark_vwap: f64,
  /// 시장별 단순 평균가의 평균
  pub benchmark_twap: f64,
  /// VWAP 대비 슬리피지 (bps, 매수 기준 양수가 불리)
  pub slippage_vs_vwap_bps: Option<f64>,
  /// TWAP 대비 슬리피지 (bps)
  pub slippage_vs_twap_bps: Option<f64>,
}

/// 실행 성능 평가기
pub struct PerformanceEvaluator;

impl PerformanceEvaluator {
  /// 수량 가중 평균 체결가
  pub fn average_execution_price(fills: &[Fill]) -> Result<f64, SimulationError> {
    let prices: Vec<f64> = fills.iter().map(|f| f.price).collect();
    let quantities: Vec<f64> = fills.iter().map(|f| f.quantity as f64).collect();

    math::weighted_average(&prices, &quantities)
      .ok_or_else(|| SimulationError::UndefinedMetric("no executed quantity".to_string()))
  }

  /// 벤치마크 VWAP (시장별 세션 VWAP 평균)
  pub fn benchmark_vwap(benchmarks: &[VenueBenchmark]) -> f64 {
    let values: Vec<f64> = benchmarks.iter().map(|b| b.vwap).collect();
    math::average(&values).unwrap_or(0.0)
  }

  /// 벤치마크 TWAP (시장별 단순 평균가의 평균)
  pub fn benchmark_twap(snapshot: &MarketSnapshot) -> f64 {
    let per_venue: Vec<f64> = (0..snapshot.venues().len())
      .filter_map(|v| math::average(snapshot.price_series(v)))
      .collect();
    math::average(&per_venue).unwrap_or(0.0)
  }

  /// 실행 결과 평가
  pub fn evaluate(
    fills: &[Fill],
    benchmarks: &[VenueBenchmark],
    snapshot: &MarketSnapshot,
    total_order: u64,
    skipped_intervals: usize,
  ) -> ExecutionSummary {
    let total_executed: u64 = fills.iter().map(|f| f.quantity).sum();

    let avg_execution_price = match Self::average_execution_price(fills) {
      Ok(price) => Some(price),
      Err(e) => {
        log::warn!("평균 체결가 계산 불가: {}", e);
        None
      }
    };

    let benchmark_vwap = Self::benchmark_vwap(benchmarks);
    let benchmark_twap = Self::benchmark_twap(snapshot);

    let fill_rate = if total_order > 0 {
      total_executed as f64 / total_order as f64
    } else {
      0.0
    };

    ExecutionSummary {
      total_order,
      total_executed,
      fill_rate,
      fill_count: fills.len(),
      skipped_intervals,
      avg_execution_price,
      benchmark_vwap,
      benchmark_twap,
      slippage_vs_vwap_bps: avg_execution_price.and_then(|p| math::basis_points(p, benchmark_vwap)),
      slippage_vs_twap_bps: avg_execution_price.and_then(|p| math::basis_points(p, benchmark_twap)),
    }
  }
}
