//! 체결 기록 장부

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::models::fill::Fill;
use crate::models::market_data::Venue;

/// 시장별 누적 체결 수량
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VenueAllocation {
  pub venue: Venue,
  pub executed: u64,
}

/// 체결 장부
///
/// 체결은 추가만 가능하고, 구간은 0번부터 순서대로 닫는다.
#[derive(Debug, Clone)]
pub struct ExecutionLedger {
  /// 선언 순서의 시장 목록
  venues: Vec<Venue>,
  /// 체결 내역
  fills: Vec<Fill>,
  /// 시장별 누적 체결 수량
  venue_totals: HashMap<Venue, u64>,
  /// 구간별 체결 수량
  interval_executed: Vec<u64>,
  /// 현재 열린 구간에 기록된 수량
  open_quantity: u64,
}

impl ExecutionLedger {
  pub fn new(venues: &[Venue]) -> Self {
    ExecutionLedger {
      venues: venues.to_vec(),
      fills: Vec::new(),
      venue_totals: venues.iter().map(|v| (v.clone(), 0)).collect(),
      interval_executed: Vec::new(),
      open_quantity: 0,
    }
  }

  /// 현재 기록 중인 구간 번호
  pub fn open_interval(&self) -> usize {
    self.interval_executed.len()
  }

  /// 체결 기록
  pub fn record(&mut self, fill: Fill) -> Result<(), SimulationError> {
    if fill.quantity == 0 {
      return Err(SimulationError::LedgerInvariant(format!(
        "zero-quantity fill at {} interval {}",
        fill.venue, fill.interval
      )));
    }
    if fill.interval != self.open_interval() {
      return Err(SimulationError::LedgerInvariant(format!(
        "fill for interval {} while interval {} is open",
        fill.interval,
        self.open_interval()
      )));
    }

    let total = self
      .venue_totals
      .get_mut(&fill.venue)
      .ok_or_else(|| SimulationError::LedgerInvariant(format!("fill for unknown venue {}", fill.venue)))?;
    *total += fill.quantity;

    self.open_quantity += fill.quantity;
    self.fills.push(fill);
    Ok(())
  }

  /// 현재 구간을 닫고 체결 수량 반환
  pub fn close_interval(&mut self, interval: usize, planned: u64) -> Result<u64, SimulationError> {
    if interval != self.open_interval() {
      return Err(SimulationError::LedgerInvariant(format!(
        "closing interval {} while interval {} is open",
        interval,
        self.open_interval()
      )));
    }

    let executed = self.open_quantity;
    if executed > planned {
      return Err(SimulationError::LedgerInvariant(format!(
        "interval {} executed {} above planned {}",
        interval, executed, planned
      )));
    }

    self.interval_executed.push(executed);
    self.open_quantity = 0;
    Ok(executed)
  }

  pub fn fills(&self) -> &[Fill] {
    &self.fills
  }

  pub fn interval_executed(&self) -> &[u64] {
    &self.interval_executed
  }

  pub fn total_executed(&self) -> u64 {
    self.fills.iter().map(|f| f.quantity).sum()
  }

  pub fn venue_total(&self, venue: &Venue) -> u64 {
    self.venue_totals.get(venue).copied().unwrap_or(0)
  }

  /// 선언 순서의 시장별 누적 체결 수량
  pub fn venue_totals(&self) -> Vec<VenueAllocation> {
    self.venues
      .iter()
      .map(|v| VenueAllocation {
        venue: v.clone(),
        executed: self.venue_total(v),
      })
      .collect()
  }

  /// 장부 합계 일치 검증
  pub fn check_invariants(&self) -> Result<(), SimulationError> {
    let by_fill = self.total_executed();
    let by_venue: u64 = self.venue_totals.values().sum();
    let by_interval: u64 = self.interval_executed.iter().sum::<u64>() + self.open_quantity;

    if by_fill != by_venue || by_fill != by_interval {
      return Err(SimulationError::LedgerInvariant(format!(
        "totals disagree: fills {}, venues {}, intervals {}",
        by_fill, by_venue, by_interval
      )));
    }
    Ok(())
  }
}
