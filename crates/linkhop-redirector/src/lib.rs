//! Redirect resolution for linkhop short codes.
//!
//! [`RedirectorService`] looks a code up in the [`LinkRegistry`], rejects
//! unknown and expired links, and records a [`ClickEvent`] for every
//! successful visit before handing back the target URL.
//!
//! ```rust
//! use linkhop_core::{ShortCode, SystemClock};
//! use linkhop_redirector::{Redirector, RedirectorService, Visit};
//! use linkhop_storage::{InMemoryStore, LinkRegistry};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = LinkRegistry::new(InMemoryStore::new());
//! let service = RedirectorService::new(registry, SystemClock);
//!
//! let code = ShortCode::new_unchecked("ex1");
//! match service.resolve(&code, &Visit::direct()) {
//!     Ok(url) => println!("Redirect to: {url}"),
//!     Err(e) => println!("{e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`LinkRegistry`]: linkhop_storage::LinkRegistry
//! [`ClickEvent`]: linkhop_core::ClickEvent

pub mod error;
pub mod location;
pub mod redirector;
pub mod service;

pub use error::{RedirectError, Result};
pub use location::{FixedLocation, LocationProvider, PlaceholderLocation, UNKNOWN_LOCATION};
pub use redirector::{Redirector, Visit};
pub use service::RedirectorService;
