use crate::error::{RegistryError, Result};
use linkhop_core::{ClickEvent, LinkRecord, ShortCode, Snapshot, StorageError, Store};
use std::collections::HashSet;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Tuning knobs for [`LinkRegistry`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RegistrySettings {
    /// How many times a mutation is replayed against a fresh snapshot when
    /// another writer commits first. Zero is treated as one.
    #[builder(default = 8)]
    pub max_write_attempts: usize,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Outcome of applying a mutation to a loaded collection.
enum Mutation<T> {
    /// The collection changed and must be written back.
    Changed(T),
    /// Nothing to write.
    Unchanged(T),
}

/// The source of truth for all link records.
///
/// Every mutation is a fresh read-modify-write cycle over the whole
/// collection, finished with a versioned write. Records handed out are owned
/// copies; changing one has no effect on the store.
#[derive(Debug, Clone)]
pub struct LinkRegistry<S> {
    store: S,
    settings: RegistrySettings,
}

impl<S: Store> LinkRegistry<S> {
    /// Creates a registry over `store` with default settings.
    pub fn new(store: S) -> Self {
        Self::with_settings(store, RegistrySettings::default())
    }

    pub fn with_settings(store: S, settings: RegistrySettings) -> Self {
        Self { store, settings }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Looks up the record for `code`.
    pub fn find_by_shortcode(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        let Snapshot { records, .. } = self.store.load()?;
        Ok(records.into_iter().find(|r| r.shortcode() == code))
    }

    /// Checks whether `code` is already taken.
    pub fn exists_shortcode(&self, code: &ShortCode) -> Result<bool> {
        let snapshot = self.store.load()?;
        Ok(snapshot.records.iter().any(|r| r.shortcode() == code))
    }

    /// Returns every code currently in the registry.
    pub fn shortcodes(&self) -> Result<HashSet<ShortCode>> {
        let snapshot = self.store.load()?;
        Ok(snapshot
            .records
            .into_iter()
            .map(|r| r.shortcode().clone())
            .collect())
    }

    /// Returns all records in insertion order.
    pub fn list(&self) -> Result<Vec<LinkRecord>> {
        Ok(self.store.load()?.records)
    }

    /// Appends `records` in a single write.
    ///
    /// Fails with [`RegistryError::Conflict`] and writes nothing if any code
    /// is already present, or appears twice in `records`.
    pub fn insert_all(&self, records: Vec<LinkRecord>) -> Result<()> {
        let count = records.len();

        self.update("insert_all", |current| {
            let mut taken: HashSet<&ShortCode> = current.iter().map(|r| r.shortcode()).collect();
            for record in &records {
                if !taken.insert(record.shortcode()) {
                    return Err(RegistryError::Conflict(record.shortcode().clone()));
                }
            }

            current.extend(records.iter().cloned());
            Ok(Mutation::Changed(()))
        })?;

        debug!(count, "inserted link records");
        Ok(())
    }

    /// Appends `event` to the visit history of `code`.
    ///
    /// Returns the updated record, or `None` if the code does not exist.
    pub fn record_click(&self, code: &ShortCode, event: ClickEvent) -> Result<Option<LinkRecord>> {
        self.update("record_click", |current| {
            let Some(slot) = current.iter_mut().find(|r| r.shortcode() == code) else {
                return Ok(Mutation::Unchanged(None));
            };

            let updated = slot.clone().with_click(event.clone());
            *slot = updated.clone();
            Ok(Mutation::Changed(Some(updated)))
        })
    }

    /// Runs `apply` against a freshly loaded collection and writes the result
    /// back with a versioned write, replaying on version conflicts.
    fn update<T>(
        &self,
        operation: &'static str,
        mut apply: impl FnMut(&mut Vec<LinkRecord>) -> Result<Mutation<T>>,
    ) -> Result<T> {
        let attempts = self.settings.max_write_attempts.max(1);

        for attempt in 1..=attempts {
            let Snapshot {
                version,
                mut records,
            } = self.store.load()?;

            let value = match apply(&mut records)? {
                Mutation::Unchanged(value) => return Ok(value),
                Mutation::Changed(value) => value,
            };

            match self.store.save_if(version, &records) {
                Ok(new_version) => {
                    trace!(operation, version = new_version, "registry write committed");
                    return Ok(value);
                }
                Err(StorageError::VersionConflict { expected, actual }) => {
                    debug!(
                        operation,
                        attempt, expected, actual, "concurrent write detected, replaying"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        warn!(operation, attempts, "giving up on contended registry write");
        Err(RegistryError::Contended { attempts })
    }
}
