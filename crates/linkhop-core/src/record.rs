use crate::error::RecordError;
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Referrer recorded when a visit arrives without one.
pub const DIRECT_REFERRER: &str = "Direct";

/// One recorded visit to a resolved short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// When the visit happened.
    pub timestamp: Timestamp,
    /// Where the visit came from, or [`DIRECT_REFERRER`].
    pub referrer: String,
    /// Coarse geographic label. Best-effort; may be a placeholder.
    pub location: String,
}

impl ClickEvent {
    /// Creates a click event, substituting [`DIRECT_REFERRER`] for a missing
    /// or blank referrer.
    pub fn new(timestamp: Timestamp, referrer: Option<&str>, location: impl Into<String>) -> Self {
        let referrer = referrer
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DIRECT_REFERRER);

        Self {
            timestamp,
            referrer: referrer.to_owned(),
            location: location.into(),
        }
    }
}

/// A stored short link and its visit history.
///
/// Fields are read-only from the outside. The identity fields
/// (`shortcode`, `original_url`, `created_at`, `expiry_time`) are fixed at
/// construction, and the visit history only grows through
/// [`LinkRecord::with_click`], which keeps `clicks` equal to the number of
/// logged events.
///
/// Deserialization applies the same checks, so stored data that breaks
/// either rule fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredLinkRecord")]
pub struct LinkRecord {
    shortcode: ShortCode,
    original_url: String,
    created_at: Timestamp,
    expiry_time: Timestamp,
    clicks: u64,
    click_logs: Vec<ClickEvent>,
}

/// A [`LinkRecord`] as read from storage, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLinkRecord {
    shortcode: ShortCode,
    original_url: String,
    created_at: Timestamp,
    expiry_time: Timestamp,
    #[serde(default)]
    clicks: u64,
    #[serde(default)]
    click_logs: Vec<ClickEvent>,
}

impl TryFrom<StoredLinkRecord> for LinkRecord {
    type Error = RecordError;

    fn try_from(stored: StoredLinkRecord) -> Result<Self, Self::Error> {
        if stored.clicks != stored.click_logs.len() as u64 {
            return Err(RecordError::ClickCountMismatch {
                clicks: stored.clicks,
                logged: stored.click_logs.len(),
            });
        }

        let mut record = LinkRecord::new(
            stored.shortcode,
            stored.original_url,
            stored.created_at,
            stored.expiry_time,
        )?;
        record.clicks = stored.clicks;
        record.click_logs = stored.click_logs;
        Ok(record)
    }
}

impl LinkRecord {
    /// Creates a record with no visits yet.
    ///
    /// Fails if `expiry_time` is not strictly after `created_at`.
    pub fn new(
        shortcode: ShortCode,
        original_url: impl Into<String>,
        created_at: Timestamp,
        expiry_time: Timestamp,
    ) -> Result<Self, RecordError> {
        if expiry_time <= created_at {
            return Err(RecordError::ExpiryNotAfterCreation {
                created_at,
                expiry_time,
            });
        }

        Ok(Self {
            shortcode,
            original_url: original_url.into(),
            created_at,
            expiry_time,
            clicks: 0,
            click_logs: Vec::new(),
        })
    }

    pub fn shortcode(&self) -> &ShortCode {
        &self.shortcode
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn expiry_time(&self) -> Timestamp {
        self.expiry_time
    }

    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    pub fn click_logs(&self) -> &[ClickEvent] {
        &self.click_logs
    }

    /// Whether the link is expired at `now`. The expiry instant itself
    /// already counts as expired.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expiry_time
    }

    /// Returns this record with `event` appended to its visit history.
    pub fn with_click(mut self, event: ClickEvent) -> Self {
        self.click_logs.push(event);
        self.clicks += 1;
        self
    }
}
