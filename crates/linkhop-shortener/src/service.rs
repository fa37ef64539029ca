use crate::allocator::Allocator;
use crate::error::{BatchError, ShortenerError};
use crate::shortener::{BatchReceipt, ShortenRequest, Shortener, MAX_BATCH_SIZE};
use jiff::{SignedDuration, Timestamp};
use linkhop_core::{Clock, LinkRecord, ShortCode, Store};
use linkhop_generator::Generator;
use linkhop_storage::{LinkRegistry, RegistryError};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;
use url::Url;

/// Tuning knobs for [`ShortenerService`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerSettings {
    /// Validity applied when a request gives none (or zero).
    #[builder(default = 30)]
    pub default_validity_minutes: u32,
    /// Generated candidates tried per request before giving up.
    #[builder(default = 5)]
    pub max_generation_attempts: usize,
    /// Times a batch is revalidated when a concurrent writer claims one of
    /// its codes between validation and commit.
    #[builder(default = 3)]
    pub commit_attempts: usize,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the [`Shortener`] trait.
///
/// For each batch the service:
/// - validates every URL
/// - allocates a short code per request against the registry and the
///   codes handed out earlier in the same batch
/// - commits all records with a single registry write
///
/// Validation stops at the first bad request and nothing is written.
#[derive(Debug, Clone)]
pub struct ShortenerService<S, G, C> {
    registry: Arc<LinkRegistry<S>>,
    allocator: Arc<Allocator<G>>,
    clock: C,
    settings: ShortenerSettings,
}

impl<S: Store, G: Generator, C: Clock> ShortenerService<S, G, C> {
    /// Creates a service with default settings.
    pub fn new(registry: LinkRegistry<S>, generator: G, clock: C) -> Self {
        Self::with_settings(registry, generator, clock, ShortenerSettings::default())
    }

    pub fn with_settings(
        registry: LinkRegistry<S>,
        generator: G,
        clock: C,
        settings: ShortenerSettings,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            allocator: Arc::new(Allocator::new(generator, settings.max_generation_attempts)),
            clock,
            settings,
        }
    }

    /// Returns the registry this service commits to.
    pub fn registry(&self) -> &LinkRegistry<S> {
        &self.registry
    }

    /// Checks that `raw` is present and parses as an absolute URL.
    ///
    /// Returns the trimmed URL, which is what gets stored.
    fn validate_url(raw: &str) -> Result<&str, ShortenerError> {
        let url = raw.trim();
        if url.is_empty() {
            return Err(ShortenerError::MissingUrl);
        }

        Url::parse(url).map_err(|e| ShortenerError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(url)
    }

    fn expiry_for(&self, now: Timestamp, requested: Option<u32>) -> Result<Timestamp, ShortenerError> {
        let minutes = match requested {
            Some(0) | None => self.settings.default_validity_minutes,
            Some(minutes) => minutes,
        };

        now.checked_add(SignedDuration::from_mins(i64::from(minutes)))
            .ok()
            .filter(|expiry| *expiry > now)
            .ok_or(ShortenerError::InvalidValidity { minutes })
    }

    fn build_entry(
        &self,
        request: &ShortenRequest,
        reserved: &HashSet<ShortCode>,
        now: Timestamp,
    ) -> Result<LinkRecord, ShortenerError> {
        let url = Self::validate_url(&request.original_url)?;
        let code = self.allocator.allocate(request.alias.as_deref(), reserved)?;
        let expiry = self.expiry_for(now, request.validity_minutes)?;

        LinkRecord::new(code, url, now, expiry).map_err(|_| ShortenerError::InvalidValidity {
            minutes: request.validity_minutes.unwrap_or_default(),
        })
    }

    /// Turns the whole batch into records, or reports the first bad entry.
    fn build_records(
        &self,
        batch: &[ShortenRequest],
        mut reserved: HashSet<ShortCode>,
    ) -> Result<Vec<LinkRecord>, BatchError> {
        let now = self.clock.now();
        let mut records = Vec::with_capacity(batch.len());

        for (index, request) in batch.iter().enumerate() {
            let record = self.build_entry(request, &reserved, now).map_err(|source| {
                warn!(entry = index + 1, error = %source, "rejecting batch");
                BatchError::Entry { index, source }
            })?;

            reserved.insert(record.shortcode().clone());
            records.push(record);
        }

        Ok(records)
    }
}

impl<S: Store, G: Generator, C: Clock> Shortener for ShortenerService<S, G, C> {
    fn submit(&self, batch: &[ShortenRequest]) -> Result<BatchReceipt, BatchError> {
        if batch.is_empty() || batch.len() > MAX_BATCH_SIZE {
            return Err(BatchError::Size(batch.len()));
        }

        let attempts = self.settings.commit_attempts.max(1);
        for attempt in 1..=attempts {
            let reserved = self.registry.shortcodes()?;
            let records = self.build_records(batch, reserved)?;

            match self.registry.insert_all(records.clone()) {
                Ok(()) => {
                    info!(count = records.len(), "URL(s) shortened successfully");
                    return Ok(BatchReceipt { records });
                }
                Err(RegistryError::Conflict(code)) => {
                    debug!(code = %code, attempt, "code claimed by a concurrent writer, revalidating");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(RegistryError::Contended { attempts }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkhop_generator::SeqGenerator;
    use linkhop_storage::InMemoryStore;
    use linkhop_test_infra::TestClock;

    type TestService = ShortenerService<InMemoryStore, SeqGenerator, TestClock>;

    fn test_service() -> (TestService, TestClock) {
        let clock = TestClock::at_second(1_700_000_000);
        let service = ShortenerService::new(
            LinkRegistry::new(InMemoryStore::new()),
            SeqGenerator::with_prefix("lh"),
            clock.clone(),
        );
        (service, clock)
    }

    fn request(url: &str) -> ShortenRequest {
        ShortenRequest::builder().original_url(url).build()
    }

    fn aliased(url: &str, alias: &str) -> ShortenRequest {
        ShortenRequest::builder()
            .original_url(url)
            .alias(alias)
            .build()
    }

    #[test]
    fn shorten_with_auto_generated_code() {
        let (service, _) = test_service();
        let record = service.shorten(request("https://example.com")).unwrap();

        assert_eq!(record.shortcode().as_str(), "lh000000");
        assert_eq!(record.original_url(), "https://example.com");
        assert_eq!(record.clicks(), 0);
    }

    #[test]
    fn shorten_with_custom_alias() {
        let (service, _) = test_service();
        let record = service
            .shorten(aliased("https://example.com", " my-alias "))
            .unwrap();

        assert_eq!(record.shortcode().as_str(), "my-alias");
    }

    #[test]
    fn default_validity_is_thirty_minutes() {
        let (service, clock) = test_service();
        let record = service.shorten(request("https://example.com")).unwrap();

        assert_eq!(record.created_at(), clock.now());
        assert_eq!(
            record.expiry_time(),
            clock.now() + SignedDuration::from_mins(30)
        );
    }

    #[test]
    fn zero_validity_falls_back_to_default() {
        let (service, clock) = test_service();
        let record = service
            .shorten(
                ShortenRequest::builder()
                    .original_url("https://example.com")
                    .validity_minutes(0)
                    .build(),
            )
            .unwrap();

        assert_eq!(
            record.expiry_time(),
            clock.now() + SignedDuration::from_mins(30)
        );
    }

    #[test]
    fn custom_validity() {
        let (service, clock) = test_service();
        let record = service
            .shorten(
                ShortenRequest::builder()
                    .original_url("https://example.com")
                    .validity_minutes(1)
                    .build(),
            )
            .unwrap();

        assert_eq!(record.expiry_time(), clock.now() + SignedDuration::from_mins(1));
    }

    #[test]
    fn unrepresentable_validity_fails() {
        let (service, _) = test_service();
        let err = service
            .shorten(
                ShortenRequest::builder()
                    .original_url("https://example.com")
                    .validity_minutes(u32::MAX)
                    .build(),
            )
            .unwrap_err();

        assert_eq!(
            err.entry_error(),
            Some(&ShortenerError::InvalidValidity { minutes: u32::MAX })
        );
    }

    #[test]
    fn blank_url_is_missing() {
        let (service, _) = test_service();
        let err = service.shorten(request("   ")).unwrap_err();
        assert_eq!(err.entry_error(), Some(&ShortenerError::MissingUrl));
    }

    #[test]
    fn relative_url_is_invalid() {
        let (service, _) = test_service();
        let err = service.shorten(request("not-a-valid-url")).unwrap_err();
        assert!(matches!(
            err.entry_error(),
            Some(ShortenerError::InvalidUrl { url, .. }) if url == "not-a-valid-url"
        ));
    }

    #[test]
    fn url_is_stored_trimmed() {
        let (service, _) = test_service();
        let record = service.shorten(request("  https://example.com/x  ")).unwrap();
        assert_eq!(record.original_url(), "https://example.com/x");
    }

    #[test]
    fn empty_and_oversized_batches_are_rejected() {
        let (service, _) = test_service();
        assert_eq!(service.submit(&[]).unwrap_err(), BatchError::Size(0));

        let six: Vec<_> = (0..6).map(|_| request("https://example.com")).collect();
        assert_eq!(service.submit(&six).unwrap_err(), BatchError::Size(6));
        assert!(service.registry().list().unwrap().is_empty());
    }

    #[test]
    fn full_batch_commits_in_one_write() {
        let (service, _) = test_service();
        let batch: Vec<_> = (0..5)
            .map(|i| request(&format!("https://example.com/{i}")))
            .collect();

        let receipt = service.submit(&batch).unwrap();
        assert_eq!(receipt.count(), 5);
        assert_eq!(receipt.to_string(), "5 URL(s) shortened successfully!");

        let snapshot = service.registry().store().load().unwrap();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.records, receipt.records);
    }

    #[test]
    fn duplicate_alias_with_existing_link_fails() {
        let (service, _) = test_service();
        service.shorten(aliased("https://one.example", "mine")).unwrap();

        let err = service
            .shorten(aliased("https://two.example", "mine"))
            .unwrap_err();
        assert_eq!(
            err,
            BatchError::Entry {
                index: 0,
                source: ShortenerError::AliasTaken(ShortCode::new_unchecked("mine")),
            }
        );
    }

    #[test]
    fn duplicate_alias_within_batch_commits_nothing() {
        let (service, _) = test_service();
        let err = service
            .submit(&[
                aliased("https://one.example", "dup"),
                aliased("https://two.example", "dup"),
            ])
            .unwrap_err();

        assert_eq!(
            err,
            BatchError::Entry {
                index: 1,
                source: ShortenerError::AliasTaken(ShortCode::new_unchecked("dup")),
            }
        );

        let snapshot = service.registry().store().load().unwrap();
        assert_eq!(snapshot.version, 0);
        assert!(snapshot.records.is_empty());
    }

    #[test]
    fn generated_codes_skip_existing_aliases() {
        let (service, _) = test_service();
        service
            .shorten(aliased("https://one.example", "lh000000"))
            .unwrap();

        let record = service.shorten(request("https://two.example")).unwrap();
        assert_eq!(record.shortcode().as_str(), "lh000001");
    }

    #[test]
    fn generated_codes_skip_earlier_batch_aliases() {
        let (service, _) = test_service();
        let receipt = service
            .submit(&[
                aliased("https://one.example", "lh000000"),
                request("https://two.example"),
            ])
            .unwrap();

        let codes: Vec<&str> = receipt
            .records
            .iter()
            .map(|r| r.shortcode().as_str())
            .collect();
        assert_eq!(codes, ["lh000000", "lh000001"]);
    }

    #[test]
    fn error_reports_offending_entry() {
        let (service, _) = test_service();
        let err = service
            .submit(&[request("https://ok.example"), request("")])
            .unwrap_err();

        assert_eq!(err.to_string(), "entry 2: url is required");
    }
}
