use crate::error::BatchError;
use linkhop_core::LinkRecord;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use typed_builder::TypedBuilder;

/// Largest number of requests accepted in one batch.
pub const MAX_BATCH_SIZE: usize = 5;

/// One URL to shorten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The long URL. Must be an absolute URL.
    #[builder(setter(into))]
    pub original_url: String,
    /// Optional custom short code. Blank means "generate one".
    #[builder(default, setter(strip_option, into))]
    #[serde(default)]
    pub alias: Option<String>,
    /// Minutes the link stays valid. `None` or `0` means the default.
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub validity_minutes: Option<u32>,
}

/// The records created by a successful batch, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReceipt {
    pub records: Vec<LinkRecord>,
}

impl BatchReceipt {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

impl Display for BatchReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} URL(s) shortened successfully!", self.count())
    }
}

pub trait Shortener: Send + Sync + 'static {
    /// Validates and commits a batch of 1 to [`MAX_BATCH_SIZE`] requests.
    ///
    /// Either every request becomes a link record or none does.
    fn submit(&self, batch: &[ShortenRequest]) -> Result<BatchReceipt, BatchError>;

    /// Shortens a single URL; a batch of one.
    fn shorten(&self, request: ShortenRequest) -> Result<LinkRecord, BatchError> {
        let receipt = self.submit(std::slice::from_ref(&request))?;
        receipt
            .records
            .into_iter()
            .next()
            .ok_or(BatchError::Size(0))
    }
}
