//! 유동성 가중 구간 분할 스케줄러
//!
//! 총 주문 수량을 구간별 합산 거래량 비율에 비례하여 나눈다.
//! 단일 전진 패스로 잔여 수량을 소진하며, 잔여 수량을 넘는 배정은 하지 않는다.

use crate::error::SimulationError;
use crate::models::order::OrderPlan;

/// 스케줄러 잔여 수량 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerState {
  pub remaining_quantity: u64,
}

/// 유동성 가중 분할 스케줄러
#[derive(Debug, Clone)]
pub struct AllocationScheduler {
  /// 총 주문 수량
  total_order: u64,
  /// 구간별 전체 시장 합산 거래량
  aggregate_volumes: Vec<u64>,
  /// 세션 전체 거래량
  session_volume: u64,
  /// 잔여 수량
  state: SchedulerState,
  /// 다음에 배정할 구간
  next_interval: usize,
}

impl AllocationScheduler {
  /// 새 스케줄러 생성
  pub fn new(total_order: u64, aggregate_volumes: Vec<u64>) -> Result<Self, SimulationError> {
    if total_order == 0 {
      return Err(SimulationError::ConfigurationError("total order must be positive".to_string()));
    }

    let session_volume: u64 = aggregate_volumes.iter().sum();
    if session_volume == 0 {
      return Err(SimulationError::ConfigurationError("aggregate session volume is zero".to_string()));
    }

    Ok(AllocationScheduler {
      total_order,
      aggregate_volumes,
      session_volume,
      state: SchedulerState {
        remaining_quantity: total_order,
      },
      next_interval: 0,
    })
  }

  pub fn state(&self) -> SchedulerState {
    self.state
  }

  pub fn session_volume(&self) -> u64 {
    self.session_volume
  }

  /// 다음 구간의 분할 수량 계산 및 잔여 수량 차감
  ///
  /// 모든 구간을 소진했으면 None.
  pub fn next_slice(&mut self) -> Option<u64> {
    let volume = *self.aggregate_volumes.get(self.next_interval)?;
    self.next_interval += 1;

    if self.state.remaining_quantity == 0 {
      return Some(0);
    }

    // floor(total_order * volume / session_volume), 정수 연산으로 정확히 내림
    let target = (self.total_order as u128 * volume as u128 / self.session_volume as u128) as u64;
    let slice = target.min(self.state.remaining_quantity);
    self.state.remaining_quantity -= slice;

    Some(slice)
  }

  /// 전체 구간에 대한 분할 계획 생성
  pub fn build_plan(mut self) -> OrderPlan {
    let mut slices = Vec::with_capacity(self.aggregate_volumes.len());
    let mut remaining_after = Vec::with_capacity(self.aggregate_volumes.len());

    while let Some(slice) = self.next_slice() {
      slices.push(slice);
      remaining_after.push(self.state.remaining_quantity);
    }

    log::debug!(
      "분할 계획 생성: 구간 {}개, 배정 {} / {}",
      slices.len(),
      self.total_order - self.state.remaining_quantity,
      self.total_order
    );

    OrderPlan {
      total_order: self.total_order,
      slices,
      remaining_after,
    }
  }
}
