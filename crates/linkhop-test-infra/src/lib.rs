//! Shared fixtures for linkhop tests: a controllable clock, throwaway redb
//! databases and ready-made link records.

mod clock;
mod error;
mod fixtures;
mod redb;

pub use clock::TestClock;
pub use error::{Result, TestInfraError};
pub use fixtures::LinkFixture;
pub use redb::TempRedbStore;
