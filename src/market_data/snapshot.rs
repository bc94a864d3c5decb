//! 검증된 시장 × 구간 관측치 테이블

use std::collections::{HashMap, HashSet};

use crate::error::SimulationError;
use crate::market_data::provider::MarketDataFeed;
use crate::models::market_data::{Venue, VenueQuote};
use crate::utils::math;

/// 세션 전체 관측치를 시장 × 구간 형태로 정리한 읽기 전용 스냅샷
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
  venues: Vec<Venue>,
  /// prices[venue][interval]
  prices: Vec<Vec<f64>>,
  /// volumes[venue][interval]
  volumes: Vec<Vec<u64>>,
  num_intervals: usize,
}

impl MarketSnapshot {
  /// 공급자 관측치를 검증하고 테이블로 변환
  pub fn from_feed(feed: &dyn MarketDataFeed) -> Result<Self, SimulationError> {
    let venues = feed.venues()?;
    if venues.is_empty() {
      return Err(SimulationError::ConfigurationError("venue set is empty".to_string()));
    }

    let mut seen = HashSet::new();
    for venue in &venues {
      if !seen.insert(venue) {
        return Err(SimulationError::ConfigurationError(format!("duplicate venue: {}", venue)));
      }
    }

    let index: HashMap<&Venue, usize> = venues.iter().enumerate().map(|(i, v)| (v, i)).collect();

    let observations = feed.observations()?;
    let last = match observations.iter().map(|o| o.interval).max() {
      Some(last) => last,
      None => {
        return Err(SimulationError::ConfigurationError("market data feed is empty".to_string()));
      }
    };

    // 완전한 테이블은 시장 수 × 구간 수 만큼의 관측치가 필요하다
    let max_intervals = observations.len() / venues.len();
    let num_intervals = match last.checked_add(1) {
      Some(n) if n <= max_intervals => n,
      _ => {
        return Err(SimulationError::ConfigurationError(format!(
          "missing observations: interval {} over {} venues, feed has {} observations",
          last,
          venues.len(),
          observations.len()
        )));
      }
    };

    let mut cells: Vec<Vec<Option<(f64, u64)>>> = vec![vec![None; num_intervals]; venues.len()];

    for obs in &observations {
      let v = *index.get(&obs.venue).ok_or_else(|| {
        SimulationError::ConfigurationError(format!("observation for undeclared venue: {}", obs.venue))
      })?;

      if !obs.price.is_finite() || obs.price <= 0.0 {
        return Err(SimulationError::ConfigurationError(format!(
          "non-positive price {} at {} interval {}",
          obs.price, obs.venue, obs.interval
        )));
      }

      let cell = &mut cells[v][obs.interval];
      if cell.is_some() {
        return Err(SimulationError::ConfigurationError(format!(
          "duplicate observation for {} interval {}",
          obs.venue, obs.interval
        )));
      }
      *cell = Some((obs.price, obs.volume));
    }

    let mut prices = Vec::with_capacity(venues.len());
    let mut volumes = Vec::with_capacity(venues.len());

    for (v, row) in cells.into_iter().enumerate() {
      let mut price_row = Vec::with_capacity(num_intervals);
      let mut volume_row = Vec::with_capacity(num_intervals);
      for (i, cell) in row.into_iter().enumerate() {
        let (price, volume) = cell.ok_or_else(|| {
          SimulationError::ConfigurationError(format!("missing observation for {} interval {}", venues[v], i))
        })?;
        price_row.push(price);
        volume_row.push(volume);
      }
      prices.push(price_row);
      volumes.push(volume_row);
    }

    log::debug!("시장 데이터 스냅샷 생성: 시장 {}개, 구간 {}개", venues.len(), num_intervals);

    Ok(MarketSnapshot {
      venues,
      prices,
      volumes,
      num_intervals,
    })
  }

  pub fn venues(&self) -> &[Venue] {
    &self.venues
  }

  pub fn num_intervals(&self) -> usize {
    self.num_intervals
  }

  pub fn price(&self, venue: usize, interval: usize) -> f64 {
    self.prices[venue][interval]
  }

  pub fn volume(&self, venue: usize, interval: usize) -> u64 {
    self.volumes[venue][interval]
  }

  pub fn price_series(&self, venue: usize) -> &[f64] {
    &self.prices[venue]
  }

  pub fn volume_series(&self, venue: usize) -> &[u64] {
    &self.volumes[venue]
  }

  /// 구간 i의 시장별 호가 (선언 순서)
  pub fn quotes_at(&self, interval: usize) -> Vec<VenueQuote> {
    self.venues
      .iter()
      .enumerate()
      .map(|(v, venue)| VenueQuote::new(venue.clone(), self.prices[v][interval], self.volumes[v][interval]))
      .collect()
  }

  /// 구간 i의 전체 시장 합산 거래량
  pub fn aggregate_volume(&self, interval: usize) -> u64 {
    self.volumes.iter().map(|row| row[interval]).sum()
  }

  pub fn aggregate_volumes(&self) -> Vec<u64> {
    (0..self.num_intervals).map(|i| self.aggregate_volume(i)).collect()
  }

  /// 구간 i의 시장 가격 단순 평균 (거래량 비가중)
  pub fn mean_price(&self, interval: usize) -> f64 {
    let prices: Vec<f64> = self.prices.iter().map(|row| row[interval]).collect();
    // 시장 목록은 비어 있을 수 없다
    math::average(&prices).unwrap_or(0.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::market_data::provider::InMemoryFeed;
  use crate::models::market_data::IntervalObservation;

  fn two_venue_feed() -> InMemoryFeed {
    InMemoryFeed::default()
      .with_series("A", &[(100.0, 10_000), (102.0, 5_000)])
      .with_series("B", &[(104.0, 20_000), (100.0, 15_000)])
  }

  #[test]
  fn test_snapshot_accessors() {
    let snapshot = MarketSnapshot::from_feed(&two_venue_feed()).unwrap();

    assert_eq!(snapshot.num_intervals(), 2);
    assert_eq!(snapshot.aggregate_volumes(), vec![30_000, 20_000]);
    assert!((snapshot.mean_price(0) - 102.0).abs() < 1e-9);
    assert!((snapshot.mean_price(1) - 101.0).abs() < 1e-9);

    let quotes = snapshot.quotes_at(1);
    assert_eq!(quotes[0].venue, Venue::from("A"));
    assert_eq!(quotes[1].volume, 15_000);
  }

  #[test]
  fn test_snapshot_rejects_empty_venue_set() {
    let feed = InMemoryFeed::default();
    let err = MarketSnapshot::from_feed(&feed).unwrap_err();
    assert!(matches!(err, SimulationError::ConfigurationError(_)));
  }

  #[test]
  fn test_snapshot_rejects_non_positive_price() {
    let feed = InMemoryFeed::default().with_series("A", &[(100.0, 10), (0.0, 10)]);
    let err = MarketSnapshot::from_feed(&feed).unwrap_err();
    assert!(matches!(err, SimulationError::ConfigurationError(_)));
  }

  #[test]
  fn test_snapshot_rejects_missing_interval() {
    let feed = InMemoryFeed::new(
      vec![Venue::from("A"), Venue::from("B")],
      vec![
        IntervalObservation::new("A", 0, 100.0, 10),
        IntervalObservation::new("A", 1, 100.0, 10),
        IntervalObservation::new("B", 0, 100.0, 10),
      ],
    );
    let err = MarketSnapshot::from_feed(&feed).unwrap_err();
    assert!(err.to_string().contains("missing observation"));
  }

  #[test]
  fn test_snapshot_rejects_interval_beyond_observation_count() {
    for interval in [usize::MAX, usize::MAX / 2, 1 << 20] {
      let feed = InMemoryFeed::new(
        vec![Venue::from("A")],
        vec![IntervalObservation::new("A", interval, 100.0, 10)],
      );
      let err = MarketSnapshot::from_feed(&feed).unwrap_err();
      assert!(matches!(err, SimulationError::ConfigurationError(_)));
      assert!(err.to_string().contains("missing observation"));
    }
  }

  #[test]
  fn test_snapshot_rejects_undeclared_venue() {
    let feed = InMemoryFeed::new(
      vec![Venue::from("A")],
      vec![
        IntervalObservation::new("A", 0, 100.0, 10),
        IntervalObservation::new("Z", 0, 100.0, 10),
      ],
    );
    let err = MarketSnapshot::from_feed(&feed).unwrap_err();
    assert!(err.to_string().contains("undeclared venue"));
  }
}
