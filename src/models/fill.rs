use serde::{Deserialize, Serialize};

use crate::models::market_data::Venue;

/// 라우터가 생성한 단일 체결
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fill {
    pub venue: Venue,
    pub interval: usize,
    pub quantity: u64,
    pub price: f64,
}

impl Fill {
    pub fn new(venue: Venue, interval: usize, quantity: u64, price: f64) -> Self {
        Fill {
            venue,
            interval,
            quantity,
            price,
        }
    }

    pub fn value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
