use crate::codec;
use linkhop_core::error::Result;
use linkhop_core::{LinkRecord, Snapshot, StorageError, Store};
use parking_lot::Mutex;
use tracing::trace;

#[derive(Debug, Default)]
struct Slot {
    version: u64,
    payload: Option<String>,
}

/// In-memory implementation of the [`Store`] contract.
///
/// The collection is held in its serialized form, exactly as a durable
/// backend would keep it, so corruption recovery and round-tripping behave
/// the same as on disk.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slot: Mutex<Slot>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a raw payload, as if it had been
    /// written once. The payload is not checked.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Slot {
                version: 1,
                payload: Some(payload.into()),
            }),
        }
    }

    /// Returns the raw stored payload, if anything has been written.
    pub fn payload(&self) -> Option<String> {
        self.slot.lock().payload.clone()
    }

    fn write(&self, expected_version: Option<u64>, records: &[LinkRecord]) -> Result<u64> {
        let payload = codec::encode(records)?;
        let mut slot = self.slot.lock();

        if let Some(expected) = expected_version {
            if slot.version != expected {
                return Err(StorageError::VersionConflict {
                    expected,
                    actual: slot.version,
                });
            }
        }

        slot.version += 1;
        slot.payload = Some(payload);
        trace!(version = slot.version, records = records.len(), "stored link snapshot");
        Ok(slot.version)
    }
}

impl Store for InMemoryStore {
    fn load(&self) -> Result<Snapshot> {
        let (version, payload) = {
            let slot = self.slot.lock();
            (slot.version, slot.payload.clone())
        };

        Ok(Snapshot {
            version,
            records: codec::decode_or_empty(payload.as_deref()),
        })
    }

    fn save(&self, records: &[LinkRecord]) -> Result<u64> {
        self.write(None, records)
    }

    fn save_if(&self, expected_version: u64, records: &[LinkRecord]) -> Result<u64> {
        self.write(Some(expected_version), records)
    }
}
