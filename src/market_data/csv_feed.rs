use std::path::{Path, PathBuf};

use crate::error::SimulationError;
use crate::market_data::provider::MarketDataFeed;
use crate::models::market_data::{IntervalObservation, Venue};

/// CSV 파일 기반 관측치 공급자
///
/// 헤더: `venue,interval,price,volume`
pub struct CsvFeed {
    path: PathBuf,
    delimiter: u8,
    venues: Option<Vec<Venue>>,
}

impl CsvFeed {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CsvFeed {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
            venues: None,
        }
    }

    /// 구분자 지정 (ASCII 한 바이트)
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 시장 선언 순서 지정 (없으면 파일 내 첫 등장 순서)
    pub fn with_venues(mut self, venues: Vec<Venue>) -> Self {
        self.venues = Some(venues);
        self
    }

    fn read_rows(&self) -> Result<Vec<IntervalObservation>, SimulationError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_path(&self.path)?;

        let mut result = Vec::new();
        for (line, rec) in rdr.deserialize().enumerate() {
            let row: CsvRow = rec.map_err(|e| SimulationError::ParseError(format!("row {}: {}", line + 1, e)))?;
            result.push(IntervalObservation {
                venue: Venue(row.venue),
                interval: row.interval,
                price: row.price,
                volume: row.volume,
            });
        }
        Ok(result)
    }
}

impl MarketDataFeed for CsvFeed {
    fn venues(&self) -> Result<Vec<Venue>, SimulationError> {
        if let Some(venues) = &self.venues {
            return Ok(venues.clone());
        }

        let mut venues: Vec<Venue> = Vec::new();
        for row in self.read_rows()? {
            if !venues.contains(&row.venue) {
                venues.push(row.venue);
            }
        }
        Ok(venues)
    }

    fn observations(&self) -> Result<Vec<IntervalObservation>, SimulationError> {
        let rows = self.read_rows()?;
        if rows.is_empty() {
            return Err(SimulationError::DataNotFound(self.path.display().to_string()));
        }
        Ok(rows)
    }
}

#[derive(serde::Deserialize)]
struct CsvRow {
    venue: String,
    interval: usize,
    price: f64,
    volume: u64,
}
