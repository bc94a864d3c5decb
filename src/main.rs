/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description: 
**/

use std::path::{Path, PathBuf};

use clap::Parser;

use sor_sim::config::SimulationConfig;
use sor_sim::market_data::CsvFeed;
use sor_sim::simulation::{ExecutionReport, SimulationBuilder};
use sor_sim::utils::logging;

/// 유동성 가중 분할 + 스마트 주문 라우팅 시뮬레이터
#[derive(Parser, Debug)]
#[command(name = "sor_sim", version, about)]
struct Args {
    /// 설정 파일 경로 (없으면 ./sor.{toml,json,yaml})
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 난수 시드 덮어쓰기
    #[arg(long)]
    seed: Option<u64>,

    /// 합성 데이터 대신 사용할 관측치 CSV (venue,interval,price,volume)
    #[arg(long)]
    feed_csv: Option<PathBuf>,

    /// 구간별 스케줄 CSV 출력 경로
    #[arg(long)]
    schedule_csv: Option<PathBuf>,

    /// 체결 내역 CSV 출력 경로
    #[arg(long)]
    fills_csv: Option<PathBuf>,

    /// 시장별 배분 CSV 출력 경로
    #[arg(long)]
    venues_csv: Option<PathBuf>,

    /// 전체 결과 JSON 출력 경로
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    // 설정 로드
    let mut config = SimulationConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.order.seed = seed;
    }

    // 로깅 초기화
    logging::init(&config.logging.level)?;
    log::info!("설정 로드 완료 (sor_sim {})", sor_sim::VERSION);

    let mut builder = SimulationBuilder::from_config(&config);
    if let Some(path) = &args.feed_csv {
        log::info!("CSV 시장 데이터 사용: {}", path.display());
        builder = builder.feed(Box::new(CsvFeed::new(path)));
    }

    let simulation = builder.build().map_err(|e| {
        logging::log_error("시뮬레이션 준비", &e);
        e
    })?;
    let report = simulation.run()?;

    println!("{}", report.summary_text());

    if let Some(path) = &args.schedule_csv {
        report.save_csv(path, |r, f| r.write_schedule_csv(f))?;
    }
    if let Some(path) = &args.fills_csv {
        report.save_csv(path, |r, f| r.write_fills_csv(f))?;
    }
    if let Some(path) = &args.venues_csv {
        report.save_csv(path, |r, f| r.write_venue_totals_csv(f))?;
    }
    if let Some(path) = &args.json {
        write_json(&report, path)?;
    }

    Ok(())
}

fn write_json(report: &ExecutionReport, path: &Path) -> Result<(), anyhow::Error> {
    std::fs::write(path, report.to_json()?)?;
    log::info!("JSON 저장 완료: {}", path.display());
    Ok(())
}
