use linkhop_core::{ShortCode, StorageError};
use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("short code already exists: {0}")]
    Conflict(ShortCode),
    #[error("snapshot kept changing underneath us; gave up after {attempts} attempts")]
    Contended { attempts: usize },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
