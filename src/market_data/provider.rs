use crate::error::SimulationError;
use crate::models::market_data::{IntervalObservation, Venue};

/// 시장 데이터 공급자 인터페이스
///
/// 시장별/구간별 (가격, 거래량) 관측치를 한 번에 제공한다.
/// 엔진은 이미 생성된 고정 시퀀스만 소비한다.
pub trait MarketDataFeed {
    /// 선언 순서가 보존된 시장 목록
    fn venues(&self) -> Result<Vec<Venue>, SimulationError>;

    /// 전체 세션의 관측치
    fn observations(&self) -> Result<Vec<IntervalObservation>, SimulationError>;
}

/// 메모리 상의 고정 관측치 공급자
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeed {
    venues: Vec<Venue>,
    observations: Vec<IntervalObservation>,
}

impl InMemoryFeed {
    pub fn new(venues: Vec<Venue>, observations: Vec<IntervalObservation>) -> Self {
        InMemoryFeed { venues, observations }
    }

    /// 시장 하나의 (가격, 거래량) 시계열 추가
    pub fn with_series(mut self, venue: impl Into<String>, series: &[(f64, u64)]) -> Self {
        let venue = Venue::new(venue);
        for (interval, &(price, volume)) in series.iter().enumerate() {
            self.observations.push(IntervalObservation {
                venue: venue.clone(),
                interval,
                price,
                volume,
            });
        }
        if !self.venues.contains(&venue) {
            self.venues.push(venue);
        }
        self
    }
}

impl MarketDataFeed for InMemoryFeed {
    fn venues(&self) -> Result<Vec<Venue>, SimulationError> {
        Ok(self.venues.clone())
    }

    fn observations(&self) -> Result<Vec<IntervalObservation>, SimulationError> {
        Ok(self.observations.clone())
    }
}
