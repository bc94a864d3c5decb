/**
* filename : synthetic
* author : HAMA
* date: 2025. 5. 14.
* description: 
**/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;

use crate::config::MarketConfig;
use crate::error::SimulationError;
use crate::market_data::provider::MarketDataFeed;
use crate::models::market_data::{IntervalObservation, Venue};

/// 랜덤 워크 기반 합성 시장 데이터 공급자
///
/// 가격은 시작가에 정규분포 증분을 누적한 값이고,
/// 거래량은 `[volume_min, volume_max)` 구간의 균등 분포에서 뽑는다.
/// 같은 시드로는 항상 같은 관측치를 만든다.
#[derive(Debug, Clone)]
pub struct SyntheticFeed {
  venues: Vec<Venue>,
  num_intervals: usize,
  start_price: f64,
  price_step_std: f64,
  volume_min: u64,
  volume_max: u64,
  seed: u64,
}

impl SyntheticFeed {
  pub fn new(venues: Vec<Venue>, num_intervals: usize, seed: u64) -> Self {
    let defaults = MarketConfig::default();
    SyntheticFeed {
      venues,
      num_intervals,
      start_price: defaults.start_price,
      price_step_std: defaults.price_step_std,
      volume_min: defaults.volume_min,
      volume_max: defaults.volume_max,
      seed,
    }
  }

  /// 설정값으로 공급자 생성
  pub fn from_config(venues: Vec<Venue>, num_intervals: usize, seed: u64, market: &MarketConfig) -> Self {
    SyntheticFeed {
      venues,
      num_intervals,
      start_price: market.start_price,
      price_step_std: market.price_step_std,
      volume_min: market.volume_min,
      volume_max: market.volume_max,
      seed,
    }
  }

  pub fn with_volume_range(mut self, min: u64, max: u64) -> Self {
    self.volume_min = min;
    self.volume_max = max;
    self
  }

  fn generate(&self) -> Result<Vec<IntervalObservation>, SimulationError> {
    if self.volume_min >= self.volume_max {
      return Err(SimulationError::ConfigurationError(format!(
        "invalid synthetic volume range [{}, {})",
        self.volume_min, self.volume_max
      )));
    }

    let step = Normal::new(0.0, self.price_step_std)
      .map_err(|e| SimulationError::ConfigurationError(format!("invalid price step distribution: {}", e)))?;

    let mut rng = StdRng::seed_from_u64(self.seed);
    let mut observations = Vec::with_capacity(self.venues.len() * self.num_intervals);

    for venue in &self.venues {
      let mut walk = 0.0;
      let prices: Vec<f64> = (0..self.num_intervals)
        .map(|_| {
          walk += rng.sample(&step);
          self.start_price + walk
        })
        .collect();
      let volumes: Vec<u64> = (0..self.num_intervals)
        .map(|_| rng.gen_range(self.volume_min..self.volume_max))
        .collect();

      for (interval, (price, volume)) in prices.into_iter().zip(volumes).enumerate() {
        observations.push(IntervalObservation {
          venue: venue.clone(),
          interval,
          price,
          volume,
        });
      }
    }

    log::debug!(
      "합성 시장 데이터 생성: 시장 {}개 x 구간 {}개 (seed = {})",
      self.venues.len(),
      self.num_intervals,
      self.seed
    );

    Ok(observations)
  }
}

impl MarketDataFeed for SyntheticFeed {
  fn venues(&self) -> Result<Vec<Venue>, SimulationError> {
    Ok(self.venues.clone())
  }

  fn observations(&self) -> Result<Vec<IntervalObservation>, SimulationError> {
    self.generate()
  }
}
