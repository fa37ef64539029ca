use jiff::Timestamp;
use thiserror::Error;

/// Result type for persistent store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("snapshot version conflict: expected {expected}, found {actual}")]
    VersionConflict { expected: u64, actual: u64 },
    #[error("stored snapshot is corrupt: {0}")]
    Corrupt(String),
    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors raised while constructing a [`LinkRecord`](crate::LinkRecord).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expiry time {expiry_time} must be after creation time {created_at}")]
    ExpiryNotAfterCreation {
        created_at: Timestamp,
        expiry_time: Timestamp,
    },
    #[error("click count {clicks} does not match {logged} logged clicks")]
    ClickCountMismatch { clicks: u64, logged: usize },
}
