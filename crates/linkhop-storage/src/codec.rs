//! JSON encoding of the persisted link collection.

use linkhop_core::error::Result;
use linkhop_core::{LinkRecord, StorageError};
use tracing::error;

/// Serializes the collection as a JSON array.
pub fn encode(records: &[LinkRecord]) -> Result<String> {
    serde_json::to_string(records).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parses a JSON array of link records.
pub fn decode(payload: &str) -> Result<Vec<LinkRecord>> {
    serde_json::from_str(payload).map_err(|e| StorageError::Corrupt(e.to_string()))
}

/// Parses a stored payload, treating an absent or corrupt payload as an
/// empty collection.
///
/// Corrupt data is discarded here and only reported through the log.
pub fn decode_or_empty(payload: Option<&str>) -> Vec<LinkRecord> {
    let Some(payload) = payload else {
        return Vec::new();
    };

    match decode(payload) {
        Ok(records) => records,
        Err(err) => {
            error!(error = %err, bytes = payload.len(), "discarding corrupt link snapshot");
            Vec::new()
        }
    }
}
