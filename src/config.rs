/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description: 
**/

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::core::smart_order_router::{ChunkRange, RoutingPolicy};
use crate::error::SimulationError;
use crate::models::market_data::Venue;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub order: OrderConfig,
    pub routing: RoutingConfig,
    pub market: MarketConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// 시장 목록 (순서가 동점 처리 기준)
    pub venues: Vec<String>,
    /// 총 주문 수량
    pub total_order: u64,
    /// 직전 구간 대비 평균가 상승 허용 비율
    pub skip_threshold: f64,
    /// 아이스버그 노출 수량 (라우팅에는 영향 없음)
    pub iceberg_visible: u64,
    /// 구간 수
    pub num_intervals: usize,
    /// 난수 시드
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub chunk_min: u64,
    pub chunk_max: u64,
    pub policy: RoutingPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub start_price: f64,
    pub price_step_std: f64,
    pub volume_min: u64,
    pub volume_max: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl SimulationConfig {
    /// 설정 파일 로드
    ///
    /// 경로가 없으면 작업 디렉터리의 `sor.{toml,json,yaml}`을 찾고,
    /// 그것도 없으면 기본값을 쓴다. 이후 환경 변수로 덮어쓴다.
    pub fn load(path: Option<&Path>) -> Result<Self, SimulationError> {
        let builder = config::Config::builder();
        let builder = match path {
            Some(p) => builder.add_source(config::File::from(p).required(true)),
            None => builder.add_source(config::File::with_name("sor").required(false)),
        };

        let mut cfg: SimulationConfig = builder.build()?.try_deserialize()?;
        // environment overrides
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// 환경 변수 덮어쓰기
    fn apply_env_overrides(&mut self) {
        use std::env;
        if let Ok(v) = env::var("SOR_VENUES") {
            let venues: Vec<String> = v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
            if !venues.is_empty() { self.order.venues = venues; }
        }
        if let Ok(v) = env::var("SOR_TOTAL_ORDER") { override_parsed("SOR_TOTAL_ORDER", &v, &mut self.order.total_order); }
        if let Ok(v) = env::var("SOR_SKIP_THRESHOLD") { override_parsed("SOR_SKIP_THRESHOLD", &v, &mut self.order.skip_threshold); }
        if let Ok(v) = env::var("SOR_NUM_INTERVALS") { override_parsed("SOR_NUM_INTERVALS", &v, &mut self.order.num_intervals); }
        if let Ok(v) = env::var("SOR_SEED") { override_parsed("SOR_SEED", &v, &mut self.order.seed); }
        if let Ok(v) = env::var("SOR_ROUTING_POLICY") {
            match v.to_lowercase().as_str() {
                "unbounded" => self.routing.policy = RoutingPolicy::Unbounded,
                "capacity_capped" | "capped" => self.routing.policy = RoutingPolicy::CapacityCapped,
                other => log::warn!("알 수 없는 SOR_ROUTING_POLICY 값 무시: {}", other),
            }
        }
    }

    /// 실행 전 설정 검증
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.order.venues.is_empty() {
            return Err(SimulationError::ConfigurationError("venue set is empty".to_string()));
        }
        let mut seen = HashSet::new();
        for venue in &self.order.venues {
            if !seen.insert(venue) {
                return Err(SimulationError::ConfigurationError(format!("duplicate venue: {}", venue)));
            }
        }
        if self.order.total_order == 0 {
            return Err(SimulationError::ConfigurationError("total order must be positive".to_string()));
        }
        if !self.order.skip_threshold.is_finite() || self.order.skip_threshold < 0.0 {
            return Err(SimulationError::ConfigurationError(format!(
                "skip threshold must be a non-negative fraction, got {}",
                self.order.skip_threshold
            )));
        }
        if self.order.num_intervals == 0 {
            return Err(SimulationError::ConfigurationError("number of intervals must be positive".to_string()));
        }
        self.chunk_range()?;
        Ok(())
    }

    pub fn venues(&self) -> Vec<Venue> {
        self.order.venues.iter().map(Venue::new).collect()
    }

    pub fn chunk_range(&self) -> Result<ChunkRange, SimulationError> {
        ChunkRange::new(self.routing.chunk_min, self.routing.chunk_max)
    }
}

fn override_parsed<T: std::str::FromStr>(key: &str, raw: &str, target: &mut T) {
    match raw.trim().parse::<T>() {
        Ok(value) => *target = value,
        Err(_) => log::warn!("환경 변수 {} 값 파싱 실패, 무시: {}", key, raw),
    }
}

impl Default for OrderConfig {
    fn default() -> Self {
        OrderConfig {
            venues: vec!["VenueA".to_string(), "VenueB".to_string(), "VenueC".to_string()],
            total_order: 100_000,
            skip_threshold: 0.005,
            iceberg_visible: 1_000,
            num_intervals: 50,
            seed: 42,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        let chunk = ChunkRange::default();
        RoutingConfig {
            chunk_min: chunk.min(),
            chunk_max: chunk.max(),
            policy: RoutingPolicy::default(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            start_price: 100.0,
            price_step_std: 0.2,
            volume_min: 5_000,
            volume_max: 20_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = SimulationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.venues().len(), 3);
        assert_eq!(cfg.routing.chunk_min, 1_000);
        assert_eq!(cfg.routing.chunk_max, 5_000);
        assert_eq!(cfg.routing.policy, RoutingPolicy::Unbounded);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = SimulationConfig::default();
        cfg.order.total_order = 0;
        assert!(matches!(cfg.validate(), Err(SimulationError::ConfigurationError(_))));

        let mut cfg = SimulationConfig::default();
        cfg.order.venues.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = SimulationConfig::default();
        cfg.order.venues.push("VenueA".to_string());
        assert!(cfg.validate().is_err());

        let mut cfg = SimulationConfig::default();
        cfg.routing.chunk_min = 6_000;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_load_from_file_keeps_missing_sections_default() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "order": {{ "venues": ["X", "Y"], "total_order": 2500, "iceberg_visible": 50 }},
                 "routing": {{ "policy": "capacity_capped" }} }}"#
        )
        .unwrap();
        file.flush().unwrap();

        let cfg = SimulationConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.order.venues, vec!["X".to_string(), "Y".to_string()]);
        assert_eq!(cfg.order.total_order, 2_500);
        assert_eq!(cfg.order.iceberg_visible, 50);
        assert_eq!(cfg.order.num_intervals, 50);
        assert_eq!(cfg.routing.policy, RoutingPolicy::CapacityCapped);
        assert_eq!(cfg.routing.chunk_max, 5_000);
    }
}
