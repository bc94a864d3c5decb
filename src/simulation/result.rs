use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::execution_ledger::VenueAllocation;
use crate::core::performance_evaluator::ExecutionSummary;
use crate::core::vwap_calculator::VenueBenchmark;
use crate::error::SimulationError;
use crate::models::fill::Fill;
use crate::models::order::OrderPlan;

/// 구간별 스케줄 표의 한 행
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScheduleRow {
    pub interval: usize,
    pub planned: u64,
    pub executed: u64,
    pub avg_market_price: f64,
    pub total_liquidity: u64,
    pub skipped: bool,
    pub remaining_after: u64,
}

/// 시뮬레이션 실행 결과
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub seed: Option<u64>,
    pub plan: OrderPlan,
    pub schedule: Vec<ScheduleRow>,
    pub venue_totals: Vec<VenueAllocation>,
    pub fills: Vec<Fill>,
    pub benchmarks: Vec<VenueBenchmark>,
    pub summary: ExecutionSummary,
}

impl ExecutionReport {
    /// 구간별 체결 수량
    pub fn interval_executed(&self) -> Vec<u64> {
        self.schedule.iter().map(|row| row.executed).collect()
    }

    pub fn total_executed(&self) -> u64 {
        self.summary.total_executed
    }

    /// 요약 문자열 (소수점 둘째 자리)
    pub fn summary_text(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();
        out.push_str("Execution Summary:\n");
        out.push_str(&format!("Total Executed Shares: {}\n", s.total_executed));
        out.push_str(&format!("Average Execution Price: {}\n", format_optional(s.avg_execution_price)));
        out.push_str(&format!("Benchmark VWAP: {:.2}\n", s.benchmark_vwap));
        out.push_str(&format!("Benchmark TWAP: {:.2}\n", s.benchmark_twap));
        out.push_str(&format!("Slippage vs VWAP (bps): {}\n", format_optional(s.slippage_vs_vwap_bps)));
        out.push_str(&format!("Slippage vs TWAP (bps): {}\n", format_optional(s.slippage_vs_twap_bps)));
        out.push_str(&format!("Fill Rate: {:.2}%\n", s.fill_rate * 100.0));
        out.push_str(&format!("Skipped Intervals: {}\n", s.skipped_intervals));
        out.push_str("Venue Allocation:\n");
        for allocation in &self.venue_totals {
            out.push_str(&format!("  {}: {}\n", allocation.venue, allocation.executed));
        }
        out
    }

    /// 스케줄 표 CSV 출력
    pub fn write_schedule_csv<W: io::Write>(&self, writer: W) -> Result<(), SimulationError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.schedule {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// 체결 내역 CSV 출력
    pub fn write_fills_csv<W: io::Write>(&self, writer: W) -> Result<(), SimulationError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["venue", "interval", "quantity", "price"])?;
        for fill in &self.fills {
            wtr.write_record(&[
                fill.venue.to_string(),
                fill.interval.to_string(),
                fill.quantity.to_string(),
                fill.price.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// 시장별 누적 체결 수량 CSV 출력
    pub fn write_venue_totals_csv<W: io::Write>(&self, writer: W) -> Result<(), SimulationError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["venue", "executed"])?;
        for allocation in &self.venue_totals {
            wtr.write_record(&[allocation.venue.to_string(), allocation.executed.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// 파일 경로로 CSV 저장
    pub fn save_csv<F>(&self, path: &Path, write: F) -> Result<(), SimulationError>
    where
        F: Fn(&Self, std::fs::File) -> Result<(), SimulationError>,
    {
        let file = std::fs::File::create(path)?;
        write(self, file)?;
        log::info!("CSV 저장 완료: {}", path.display());
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::market_data::Venue;

    fn report() -> ExecutionReport {
        let now = Utc::now();
        ExecutionReport {
            started_at: now,
            finished_at: now,
            seed: Some(42),
            plan: OrderPlan { total_order: 1_000, slices: vec![600, 400], remaining_after: vec![400, 0] },
            schedule: vec![
                ScheduleRow { interval: 0, planned: 600, executed: 600, avg_market_price: 100.0, total_liquidity: 3_000, skipped: false, remaining_after: 400 },
                ScheduleRow { interval: 1, planned: 400, executed: 0, avg_market_price: 101.0, total_liquidity: 2_000, skipped: true, remaining_after: 0 },
            ],
            venue_totals: vec![
                VenueAllocation { venue: Venue::from("A"), executed: 600 },
                VenueAllocation { venue: Venue::from("B"), executed: 0 },
            ],
            fills: vec![Fill::new(Venue::from("A"), 0, 600, 100.123)],
            benchmarks: vec![],
            summary: ExecutionSummary {
                total_order: 1_000,
                total_executed: 600,
                fill_rate: 0.6,
                fill_count: 1,
                skipped_intervals: 1,
                avg_execution_price: Some(100.123),
                benchmark_vwap: 100.4567,
                benchmark_twap: 100.5,
                slippage_vs_vwap_bps: Some(-33.15),
                slippage_vs_twap_bps: None,
            },
        }
    }

    #[test]
    fn test_summary_text_two_decimals() {
        let text = report().summary_text();
        assert!(text.contains("Total Executed Shares: 600"));
        assert!(text.contains("Average Execution Price: 100.12"));
        assert!(text.contains("Benchmark VWAP: 100.46"));
        assert!(text.contains("Benchmark TWAP: 100.50"));
        assert!(text.contains("Slippage vs TWAP (bps): N/A"));
        assert!(text.contains("  A: 600"));
    }

    #[test]
    fn test_schedule_csv_has_header_and_rows() {
        let mut buf = Vec::new();
        report().write_schedule_csv(&mut buf).unwrap();
        let csv_text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = csv_text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "interval,planned,executed,avg_market_price,total_liquidity,skipped,remaining_after");
        assert!(lines[2].starts_with("1,400,0,"));
    }

    #[test]
    fn test_fills_and_venue_csv() {
        let mut buf = Vec::new();
        report().write_fills_csv(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "venue,interval,quantity,price\nA,0,600,100.123\n");

        let mut buf = Vec::new();
        report().write_venue_totals_csv(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "venue,executed\nA,600\nB,0\n");
    }

    #[test]
    fn test_report_json_roundtrip_keeps_summary() {
        let json = report().to_json().unwrap();
        let parsed: ExecutionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary, report().summary);
    }
}
