use crate::error::Result;
use crate::record::LinkRecord;
use std::sync::Arc;

/// The full persisted collection together with its write version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Incremented by every successful write. A store that has never been
    /// written reports version `0`.
    pub version: u64,
    /// All link records, in insertion order.
    pub records: Vec<LinkRecord>,
}

/// Durable key-value storage for the link collection.
///
/// A store holds exactly one serialized collection. It performs no
/// validation of the records it is given.
pub trait Store: Send + Sync + 'static {
    /// Loads the current collection.
    ///
    /// An absent collection loads as an empty snapshot. A malformed payload
    /// also loads as empty; implementations log the corruption instead of
    /// returning it.
    fn load(&self) -> Result<Snapshot>;

    /// Replaces the collection unconditionally and returns the new version.
    fn save(&self, records: &[LinkRecord]) -> Result<u64>;

    /// Replaces the collection only if nobody has written since
    /// `expected_version` was loaded.
    ///
    /// Returns `Err(VersionConflict)` when the stored version has moved on.
    fn save_if(&self, expected_version: u64, records: &[LinkRecord]) -> Result<u64>;
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn load(&self) -> Result<Snapshot> {
        (**self).load()
    }

    fn save(&self, records: &[LinkRecord]) -> Result<u64> {
        (**self).save(records)
    }

    fn save_if(&self, expected_version: u64, records: &[LinkRecord]) -> Result<u64> {
        (**self).save_if(expected_version, records)
    }
}
