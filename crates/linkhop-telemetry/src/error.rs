use std::result::Result as StdResult;
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("failed to open journal: {0}")]
    Journal(#[from] std::io::Error),

    #[error("failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

pub type Result<T> = StdResult<T, TelemetryError>;
