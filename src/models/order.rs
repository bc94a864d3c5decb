use serde::{Deserialize, Serialize};

/// 구간별 목표 분할 수량 계획
///
/// 한 번 계산된 뒤에는 읽기 전용으로만 사용된다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPlan {
    /// 총 주문 수량
    pub total_order: u64,
    /// 구간별 목표 수량
    pub slices: Vec<u64>,
    /// 각 구간 배정 직후의 잔여 수량
    pub remaining_after: Vec<u64>,
}

impl OrderPlan {
    pub fn num_intervals(&self) -> usize {
        self.slices.len()
    }

    pub fn slice(&self, interval: usize) -> u64 {
        self.slices.get(interval).copied().unwrap_or(0)
    }

    pub fn planned_total(&self) -> u64 {
        self.slices.iter().sum()
    }

    /// 계획에 배정되지 못한 수량 (정수 내림으로 생기는 잔량)
    pub fn unallocated(&self) -> u64 {
        self.total_order.saturating_sub(self.planned_total())
    }
}
