use crate::Result;
use linkhop_storage::RedbStore;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A [`RedbStore`] living in a temporary directory that is removed on drop.
pub struct TempRedbStore {
    store: Arc<RedbStore>,
    path: PathBuf,
    // declared last so the database closes before the directory goes away
    _dir: TempDir,
}

impl TempRedbStore {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join("linkhop.redb");
        let store = Arc::new(RedbStore::open(&path)?);

        Ok(Self {
            store,
            path,
            _dir: dir,
        })
    }

    /// Returns a shared handle to the store.
    pub fn store(&self) -> Arc<RedbStore> {
        Arc::clone(&self.store)
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Deref for TempRedbStore {
    type Target = RedbStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkhop_core::Store;

    #[test]
    fn starts_empty() {
        let temp = TempRedbStore::new().unwrap();
        assert!(temp.path().exists());
        assert!(temp.load().unwrap().records.is_empty());
    }
}
