use serde::{Deserialize, Serialize};
use std::fmt;

/// 거래 시장 식별자 (세션 내에서 유일)
#[derive(Debug, Clone, Serialize, Deserialize, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Venue(pub String);

impl Venue {
    pub fn new(name: impl Into<String>) -> Self {
        Venue(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Venue {
    fn from(name: &str) -> Self {
        Venue(name.to_string())
    }
}

/// 시장/구간별 관측치 (가격, 거래량)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntervalObservation {
    pub venue: Venue,
    pub interval: usize,
    pub price: f64,
    pub volume: u64,
}

impl IntervalObservation {
    pub fn new(venue: impl Into<String>, interval: usize, price: f64, volume: u64) -> Self {
        IntervalObservation {
            venue: Venue::new(venue),
            interval,
            price,
            volume,
        }
    }

    pub fn notional(&self) -> f64 {
        self.price * self.volume as f64
    }
}

/// 라우터에 넘기는 한 구간의 시장 호가
#[derive(Debug, Clone, PartialEq)]
pub struct VenueQuote {
    pub venue: Venue,
    pub price: f64,
    pub volume: u64,
}

impl VenueQuote {
    pub fn new(venue: Venue, price: f64, volume: u64) -> Self {
        VenueQuote { venue, price, volume }
    }
}
