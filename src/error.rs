/**
* filename : error
* author : HAMA
* date: 2025. 5. 8.
* description: 
**/

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid benchmark: {0}")]
    InvalidBenchmark(String),

    #[error("Undefined metric: {0}")]
    UndefinedMetric(String),

    #[error("Ledger invariant violated: {0}")]
    LedgerInvariant(String),

    #[error("Data not found: {0}")]
    DataNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Config load error: {0}")]
    ConfigLoadError(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
