//! 시장별 세션 VWAP 벤치마크 계산

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::market_data::snapshot::MarketSnapshot;
use crate::models::market_data::Venue;

/// 시장별 세션 VWAP (세션 동안 상수)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VenueBenchmark {
  pub venue: Venue,
  pub vwap: f64,
}

/// VWAP (거래량 가중 평균 가격) 계산기
pub struct VwapCalculator;

impl VwapCalculator {
  /// 모든 시장의 세션 VWAP 계산
  ///
  /// 거래량 합이 0인 시장이 있으면 `InvalidBenchmark`.
  pub fn compute(snapshot: &MarketSnapshot) -> Result<Vec<VenueBenchmark>, SimulationError> {
    snapshot
      .venues()
      .iter()
      .enumerate()
      .map(|(v, venue)| {
        let vwap = Self::session_vwap(snapshot.price_series(v), snapshot.volume_series(v))
          .ok_or_else(|| SimulationError::InvalidBenchmark(format!("venue {} has zero session volume", venue)))?;
        Ok(VenueBenchmark {
          venue: venue.clone(),
          vwap,
        })
      })
      .collect()
  }

  /// 가격/거래량 시계열의 VWAP (거래량 합이 0이면 None)
  pub fn session_vwap(prices: &[f64], volumes: &[u64]) -> Option<f64> {
    let total_volume: u64 = volumes.iter().sum();
    if total_volume == 0 || prices.len() != volumes.len() {
      return None;
    }

    let total_value: f64 = prices
      .iter()
      .zip(volumes.iter())
      .map(|(p, v)| p * *v as f64)
      .sum();

    Some(total_value / total_volume as f64)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::market_data::provider::InMemoryFeed;

  #[test]
  fn test_vwap_weighted_by_volume() {
    let prices = vec![100.0, 101.0, 102.0, 103.0];
    let volumes = vec![10, 20, 15, 5];

    let vwap = VwapCalculator::session_vwap(&prices, &volumes).unwrap();
    // (100*10 + 101*20 + 102*15 + 103*5) / 50 = 5065 / 50
    assert!((vwap - 101.3).abs() < 1e-9);
  }

  #[test]
  fn test_constant_price_vwap_equals_price() {
    let feed = InMemoryFeed::default().with_series("A", &[(42.5, 100), (42.5, 7), (42.5, 9_000)]);
    let snapshot = MarketSnapshot::from_feed(&feed).unwrap();

    let benchmarks = VwapCalculator::compute(&snapshot).unwrap();
    assert_eq!(benchmarks.len(), 1);
    assert!((benchmarks[0].vwap - 42.5).abs() < 1e-12);
  }

  #[test]
  fn test_zero_volume_venue_is_invalid_benchmark() {
    let feed = InMemoryFeed::default()
      .with_series("A", &[(100.0, 10), (101.0, 10)])
      .with_series("B", &[(100.0, 0), (101.0, 0)]);
    let snapshot = MarketSnapshot::from_feed(&feed).unwrap();

    let err = VwapCalculator::compute(&snapshot).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidBenchmark(_)));
  }
}
