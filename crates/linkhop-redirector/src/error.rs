use jiff::Timestamp;
use linkhop_core::ShortCode;
use linkhop_storage::RegistryError;
use std::result::Result as StdResult;
use thiserror::Error;

/// Why a short code could not be resolved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RedirectError {
    #[error("URL not found: {0}")]
    NotFound(ShortCode),

    #[error("URL expired: {code} (at {expired_at})")]
    Expired {
        code: ShortCode,
        expired_at: Timestamp,
    },

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

pub type Result<T> = StdResult<T, RedirectError>;
