//! 시장 데이터 공급 및 검증

pub mod csv_feed;
pub mod provider;
pub mod snapshot;
pub mod synthetic;

pub use csv_feed::CsvFeed;
pub use provider::{InMemoryFeed, MarketDataFeed};
pub use snapshot::MarketSnapshot;
pub use synthetic::SyntheticFeed;
