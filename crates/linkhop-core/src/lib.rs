//! Core types and traits for the linkhop link shortener.
//!
//! This crate holds the data model shared by every other crate: the
//! [`LinkRecord`] and [`ClickEvent`] types, the [`ShortCode`] key, the
//! [`Store`] persistence contract and the [`Clock`] used for expiry.

pub mod clock;
pub mod error;
pub mod record;
pub mod shortcode;
pub mod stats;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use error::{RecordError, StorageError};
pub use record::{ClickEvent, LinkRecord, DIRECT_REFERRER};
pub use shortcode::ShortCode;
pub use stats::LinkStats;
pub use store::{Snapshot, Store};
