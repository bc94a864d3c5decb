//! 로깅 유틸리티
//!
//! 로그 초기화 및 시뮬레이션 실행 로그 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::core::performance_evaluator::ExecutionSummary;
use crate::error::SimulationError;
use crate::models::fill::Fill;

/// 로깅 시스템 초기화
///
/// `RUST_LOG`가 있으면 설정 파일의 레벨보다 우선한다.
pub fn init(default_level: &str) -> Result<(), SimulationError> {
    let mut builder = Builder::from_default_env();
    
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    
    // 로그 레벨 파싱
    let level_filter = match log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    };
    
    builder
      .filter_level(level_filter)
      .format_timestamp_millis()
      .try_init()
      .map_err(|e| SimulationError::ConfigurationError(format!("logger already initialized: {}", e)))?;
    
    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);
    
    Ok(())
}

/// 시뮬레이션 시작 로그
pub fn log_run_start(total_order: u64, venue_count: usize, num_intervals: usize) {
    log::info!("시뮬레이션 시작: 총 주문 {} - 시장 {}개 - 구간 {}개", total_order, venue_count, num_intervals);
}

/// 구간 실행 억제 로그
pub fn log_interval_skipped(interval: usize, planned: u64, previous_mean: f64, current_mean: f64) {
    log::info!("구간 {} 실행 억제: 평균가 {:.4} -> {:.4}, 계획 수량 {} 소멸",
               interval, previous_mean, current_mean, planned);
}

/// 체결 로그
pub fn log_fill(fill: &Fill) {
    log::debug!("체결: 구간 {} - 시장 {} - 수량 {} - 가격 {:.4}",
                fill.interval, fill.venue, fill.quantity, fill.price);
}

/// 시뮬레이션 종료 로그
pub fn log_run_end(summary: &ExecutionSummary) {
    log::info!("시뮬레이션 종료: 체결 {} / {} - 체결 건수 {} - 억제 구간 {}개",
               summary.total_executed, summary.total_order, summary.fill_count, summary.skipped_intervals);
}

/// 오류 로그
pub fn log_error(context: &str, error: &SimulationError) {
    log::error!("오류 발생 - {}: {}", context, error);
}
