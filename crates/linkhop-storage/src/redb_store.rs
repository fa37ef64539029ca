use crate::codec;
use linkhop_core::error::Result;
use linkhop_core::{LinkRecord, Snapshot, StorageError, Store};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use tracing::{debug, trace};

/// Well-known key under which the link collection is stored.
pub const STORAGE_KEY: &str = "shortenedUrls";

/// Serialized link collections.
///
/// Key: storage key (always [`STORAGE_KEY`])
/// Value: JSON array of link records
pub const TABLE_LINKS: TableDefinition<&str, &str> = TableDefinition::new("links_v1");

/// Write versions of the collections in [`TABLE_LINKS`], under the same key.
pub const TABLE_META: TableDefinition<&str, u64> = TableDefinition::new("meta_v1");

/// Durable [`Store`] backed by a single-file redb database.
///
/// Versioned writes check and bump the version inside one redb write
/// transaction. redb runs write transactions one at a time, so two writers
/// sharing a `RedbStore` cannot both commit against the same version.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

fn map_redb_error(err: impl Into<redb::Error>) -> StorageError {
    let err: redb::Error = err.into();
    let message = err.to_string();

    match err {
        redb::Error::DatabaseAlreadyOpen | redb::Error::Io(_) => StorageError::Unavailable(message),
        _ => StorageError::Operation(message),
    }
}

impl RedbStore {
    /// Creates or opens the database file at `path` and makes sure both
    /// tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(map_redb_error)?;

        let write_txn = db.begin_write().map_err(map_redb_error)?;
        {
            write_txn.open_table(TABLE_LINKS).map_err(map_redb_error)?;
            write_txn.open_table(TABLE_META).map_err(map_redb_error)?;
        }
        write_txn.commit().map_err(map_redb_error)?;

        debug!(path = %path.display(), "opened link store");
        Ok(Self { db })
    }

    /// Returns the raw stored payload, if anything has been written.
    pub fn payload(&self) -> Result<Option<String>> {
        let read_txn = self.db.begin_read().map_err(map_redb_error)?;
        let links = read_txn.open_table(TABLE_LINKS).map_err(map_redb_error)?;
        let payload = links
            .get(STORAGE_KEY)
            .map_err(map_redb_error)?
            .map(|guard| guard.value().to_owned());
        Ok(payload)
    }

    fn write(&self, expected_version: Option<u64>, records: &[LinkRecord]) -> Result<u64> {
        let payload = codec::encode(records)?;

        let write_txn = self.db.begin_write().map_err(map_redb_error)?;
        let next_version = {
            let mut meta = write_txn.open_table(TABLE_META).map_err(map_redb_error)?;
            let current = meta
                .get(STORAGE_KEY)
                .map_err(map_redb_error)?
                .map(|guard| guard.value())
                .unwrap_or(0);

            if let Some(expected) = expected_version {
                if current != expected {
                    // dropping the transaction aborts it
                    return Err(StorageError::VersionConflict {
                        expected,
                        actual: current,
                    });
                }
            }

            let next_version = current + 1;
            meta.insert(STORAGE_KEY, next_version)
                .map_err(map_redb_error)?;

            let mut links = write_txn.open_table(TABLE_LINKS).map_err(map_redb_error)?;
            links
                .insert(STORAGE_KEY, payload.as_str())
                .map_err(map_redb_error)?;

            next_version
        };
        write_txn.commit().map_err(map_redb_error)?;

        trace!(version = next_version, records = records.len(), "stored link snapshot");
        Ok(next_version)
    }
}

impl Store for RedbStore {
    fn load(&self) -> Result<Snapshot> {
        let read_txn = self.db.begin_read().map_err(map_redb_error)?;

        let meta = read_txn.open_table(TABLE_META).map_err(map_redb_error)?;
        let version = meta
            .get(STORAGE_KEY)
            .map_err(map_redb_error)?
            .map(|guard| guard.value())
            .unwrap_or(0);

        let links = read_txn.open_table(TABLE_LINKS).map_err(map_redb_error)?;
        let payload = links
            .get(STORAGE_KEY)
            .map_err(map_redb_error)?
            .map(|guard| guard.value().to_owned());

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
