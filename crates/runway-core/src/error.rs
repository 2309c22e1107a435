//! Configuration errors. Bad aircraft data is never an error here; it is
//! carried through the models as unknown geometry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("no runway table for airport {0}")]
    UnknownAirport(String),
    #[error("runway table for {0} is empty")]
    EmptyTable(String),
    #[error("runway {0} appears more than once")]
    DuplicateRunway(String),
    #[error("runway {id:?} is invalid: {reason}")]
    InvalidRunway { id: String, reason: String },
    #[error("invalid scoring parameters: {0}")]
    InvalidParams(String),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
