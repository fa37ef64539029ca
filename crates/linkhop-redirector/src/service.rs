use crate::error::{RedirectError, Result};
use crate::location::{LocationProvider, PlaceholderLocation, UNKNOWN_LOCATION};
use crate::redirector::{Redirector, Visit};
use jiff::Timestamp;
use linkhop_core::{ClickEvent, Clock, ShortCode, Store};
use linkhop_storage::LinkRegistry;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// Service for handling short link visits.
///
/// Lookup, expiry check and click recording all go through the
/// [`LinkRegistry`]; expired records are left in place.
#[derive(Debug, Clone)]
pub struct RedirectorService<S, C, L = PlaceholderLocation> {
    registry: Arc<LinkRegistry<S>>,
    clock: C,
    location: L,
}

impl<S: Store, C: Clock> RedirectorService<S, C> {
    /// Creates a service that tags visits with the placeholder location.
    pub fn new(registry: LinkRegistry<S>, clock: C) -> Self {
        Self::with_location(registry, clock, PlaceholderLocation)
    }
}

impl<S: Store, C: Clock, L: LocationProvider> RedirectorService<S, C, L> {
    pub fn with_location(registry: LinkRegistry<S>, clock: C, location: L) -> Self {
        debug!(provider = location.name(), "redirector location provider");
        Self {
            registry: Arc::new(registry),
            clock,
            location,
        }
    }

    pub fn registry(&self) -> &LinkRegistry<S> {
        &self.registry
    }

    fn click_for(&self, visit: &Visit, now: Timestamp) -> ClickEvent {
        let location = self
            .location
            .locate(visit.client)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_owned());

        ClickEvent::new(now, visit.referrer.as_deref(), location)
    }
}

impl<S: Store, C: Clock, L: LocationProvider> Redirector for RedirectorService<S, C, L> {
    fn resolve(&self, code: &ShortCode, visit: &Visit) -> Result<String> {
        trace!(code = %code, "resolving short code");

        let record = match self.registry.find_by_shortcode(code) {
            Ok(Some(record)) => record,
            Ok(None) => {
                error!(shortcode = %code, "URL not found");
                return Err(RedirectError::NotFound(code.clone()));
            }
            Err(err) => {
                error!(shortcode = %code, error = %err, "Error during redirect");
                return Err(err.into());
            }
        };

        // one instant drives both the expiry check and the recorded click
        let now = self.clock.now();
        if record.is_expired_at(now) {
            error!(shortcode = %code, "URL expired");
            return Err(RedirectError::Expired {
                code: code.clone(),
                expired_at: record.expiry_time(),
            });
        }

        let updated = match self.registry.record_click(code, self.click_for(visit, now)) {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                error!(shortcode = %code, "URL not found");
                return Err(RedirectError::NotFound(code.clone()));
            }
            Err(err) => {
                error!(shortcode = %code, error = %err, "Error during redirect");
                return Err(err.into());
            }
        };

        info!(
            shortcode = %code,
            "originalUrl" = updated.original_url(),
            "Redirecting to URL"
        );
        Ok(updated.original_url().to_owned())
    }
}
