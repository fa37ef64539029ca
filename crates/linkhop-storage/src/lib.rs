//! Persistent stores and the link registry.
//!
//! [`RedbStore`] keeps the link collection in a single-file embedded
//! database; [`InMemoryStore`] keeps it in process memory. Both implement
//! [`linkhop_core::Store`] and are driven by [`LinkRegistry`], the only
//! component that writes link records.

pub mod codec;
pub mod error;
pub mod memory;
pub mod redb_store;
pub mod registry;

pub use error::{RegistryError, Result};
pub use memory::InMemoryStore;
pub use redb_store::RedbStore;
pub use registry::{LinkRegistry, RegistrySettings};

pub use linkhop_core::{Snapshot, StorageError, Store};
