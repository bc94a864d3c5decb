/**
* filename : smart_order_router
* author : HAMA
* date: 2025. 5. 14.
* description: 
**/

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::models::fill::Fill;
use crate::models::market_data::{Venue, VenueQuote};

/// 라우팅 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingPolicy {
  /// 시장 호가 거래량을 확인하지 않는 기본 정책
  #[default]
  Unbounded,
  /// 한 구간에서 시장 호가 거래량을 넘겨 배정하지 않는 정책
  CapacityCapped,
}

/// 무작위 청크 크기 범위 (양끝 포함)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
  min: u64,
  max: u64,
}

impl ChunkRange {
  pub fn new(min: u64, max: u64) -> Result<Self, SimulationError> {
    if min == 0 {
      return Err(SimulationError::ConfigurationError("chunk minimum must be positive".to_string()));
    }
    if min > max {
      return Err(SimulationError::ConfigurationError(format!(
        "chunk range is empty: [{}, {}]",
        min, max
      )));
    }
    Ok(ChunkRange { min, max })
  }

  pub fn min(&self) -> u64 {
    self.min
  }

  pub fn max(&self) -> u64 {
    self.max
  }

  /// 범위 내 청크 크기 추출
  pub fn draw<R: Rng>(&self, rng: &mut R) -> u64 {
    rng.gen_range(self.min..=self.max)
  }
}

impl Default for ChunkRange {
  fn default() -> Self {
    ChunkRange { min: 1_000, max: 5_000 }
  }
}

/// 시장 점수 (거래량 / 가격, 클수록 싸고 깊다)
#[derive(Debug, Clone, PartialEq)]
pub struct VenueScore {
  pub venue: Venue,
  pub price: f64,
  pub volume: u64,
  pub score: f64,
}

/// 스마트 주문 라우터
#[derive(Debug, Clone)]
pub struct SmartOrderRouter {
  chunk_range: ChunkRange,
  policy: RoutingPolicy,
}

impl SmartOrderRouter {
  pub fn new(chunk_range: ChunkRange, policy: RoutingPolicy) -> Self {
    SmartOrderRouter { chunk_range, policy }
  }

  pub fn chunk_range(&self) -> ChunkRange {
    self.chunk_range
  }

  pub fn policy(&self) -> RoutingPolicy {
    self.policy
  }

  /// 시장별 점수 계산 후 내림차순 정렬
  ///
  /// 안정 정렬이므로 점수가 같으면 선언 순서를 유지한다.
  pub fn rank_venues(quotes: &[VenueQuote]) -> Result<Vec<VenueScore>, SimulationError> {
    let mut scores = quotes
      .iter()
      .map(|q| {
        if !q.price.is_finite() || q.price <= 0.0 {
          return Err(SimulationError::ConfigurationError(format!(
            "cannot score venue {} with price {}",
            q.venue, q.price
          )));
        }
        Ok(VenueScore {
          venue: q.venue.clone(),
          price: q.price,
          volume: q.volume,
          score: q.volume as f64 / q.price,
        })
      })
      .collect::<Result<Vec<_>, _>>()?;

    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(scores)
  }

  /// 한 구간의 분할 수량을 시장에 배분
  ///
  /// 점수 순으로 시장마다 청크 하나씩 배정하며, 분할 수량을 모두 쓰거나
  /// 시장을 다 돌면 멈춘다. 다 못 쓴 수량은 체결되지 않는다.
  pub fn route<R: Rng>(
    &self,
    interval: usize,
    slice: u64,
    quotes: &[VenueQuote],
    rng: &mut R,
  ) -> Result<Vec<Fill>, SimulationError> {
    if slice == 0 {
      return Ok(Vec::new());
    }

    let ranked = Self::rank_venues(quotes)?;
    let mut remaining = slice;
    let mut fills = Vec::new();

    for venue in ranked {
      if remaining == 0 {
        break;
      }

      let chunk = self.chunk_range.draw(rng);
      let mut quantity = chunk.min(remaining);
      if self.policy == RoutingPolicy::CapacityCapped {
        quantity = quantity.min(venue.volume);
      }
      if quantity == 0 {
        continue;
      }

      fills.push(Fill::new(venue.venue, interval, quantity, venue.price));
      remaining -= quantity;
    }

    Ok(fills)
  }
}
