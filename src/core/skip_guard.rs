//! 가격 급등 구간 실행 억제

use crate::market_data::snapshot::MarketSnapshot;

/// 구간 실행 억제 판단 결과
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipDecision {
  /// 실행 진행
  Proceed,
  /// 평균가가 임계값 이상 상승하여 실행 억제
  Skip { previous_mean: f64, current_mean: f64 },
}

impl SkipDecision {
  pub fn is_skip(&self) -> bool {
    matches!(self, SkipDecision::Skip { .. })
  }
}

/// 직전 구간 대비 평균가 상승 가드
///
/// 억제된 구간의 계획 수량은 이후 구간으로 이월되지 않고 사라진다.
#[derive(Debug, Clone, Copy)]
pub struct SkipGuard {
  threshold: f64,
}

impl SkipGuard {
  pub fn new(threshold: f64) -> Self {
    SkipGuard { threshold }
  }

  pub fn threshold(&self) -> f64 {
    self.threshold
  }

  /// 구간 i 실행 여부 판단 (구간 0은 항상 진행)
  pub fn evaluate(&self, snapshot: &MarketSnapshot, interval: usize) -> SkipDecision {
    if interval == 0 {
      return SkipDecision::Proceed;
    }

    let previous_mean = snapshot.mean_price(interval - 1);
    let current_mean = snapshot.mean_price(interval);

    if current_mean > previous_mean * (1.0 + self.threshold) {
      SkipDecision::Skip {
        previous_mean,
        current_mean,
      }
    } else {
      SkipDecision::Proceed
    }
  }

  pub fn should_skip(&self, snapshot: &MarketSnapshot, interval: usize) -> bool {
    self.evaluate(snapshot, interval).is_skip()
  }
}
