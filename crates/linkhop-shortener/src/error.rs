use crate::shortener::MAX_BATCH_SIZE;
use linkhop_core::ShortCode;
use linkhop_storage::RegistryError;
use thiserror::Error;

/// Why a single shortening request was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShortenerError {
    #[error("url is required")]
    MissingUrl,
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("alias/shortcode already taken: {0}")]
    AliasTaken(ShortCode),
    #[error("no free short code after {attempts} generated candidates")]
    GeneratorExhausted { attempts: usize },
    #[error("validity of {minutes} minutes is out of range")]
    InvalidValidity { minutes: u32 },
}

/// Why a batch was rejected. A rejected batch commits nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("a batch holds 1 to {max} urls, got {0}", max = MAX_BATCH_SIZE)]
    Size(usize),
    #[error("entry {}: {source}", .index + 1)]
    Entry {
        /// Zero-based position of the offending request.
        index: usize,
        source: ShortenerError,
    },
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl BatchError {
    /// The offending request's error, when the batch failed on one entry.
    pub fn entry_error(&self) -> Option<&ShortenerError> {
        match self {
            BatchError::Entry { source, .. } => Some(source),
            _ => None,
        }
    }
}
