//! Link creation: short code allocation and the batch submission pipeline.
//!
//! [`ShortenerService`] validates up to [`MAX_BATCH_SIZE`] requests, gives
//! each a unique short code through the [`Allocator`], and commits the
//! whole batch to the registry in one write, or nothing at all.

pub mod allocator;
pub mod error;
pub mod service;
pub mod shortener;

pub use allocator::Allocator;
pub use error::{BatchError, ShortenerError};
pub use service::{ShortenerService, ShortenerSettings};
pub use shortener::{BatchReceipt, ShortenRequest, Shortener, MAX_BATCH_SIZE};
