//! 수학 관련 유틸리티
//!
//! 평균, 가중 평균, 베이시스 포인트 계산

/// 평균 계산
pub fn average(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }
  
  Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 가중 평균 계산 (가중치 합이 0이면 None)
pub fn weighted_average(values: &[f64], weights: &[f64]) -> Option<f64> {
  if values.len() != weights.len() || values.is_empty() {
    return None;
  }
  
  let total_weight: f64 = weights.iter().sum();
  if total_weight == 0.0 {
    return None;
  }
  
  let sum_vw: f64 = values.iter()
    .zip(weights.iter())
    .map(|(v, w)| v * w)
    .sum();
  
  Some(sum_vw / total_weight)
}

/// 기준값 대비 차이 (bps)
pub fn basis_points(value: f64, reference: f64) -> Option<f64> {
  if reference == 0.0 {
    return None;
  }
  
  Some((value - reference) / reference * 10_000.0)
}
