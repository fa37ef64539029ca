use jiff::{SignedDuration, Timestamp};
use linkhop_core::{LinkRecord, ShortCode};
use typed_builder::TypedBuilder;

/// Builds a [`LinkRecord`] with sensible defaults for tests.
///
/// ```ignore
/// let record = LinkFixture::builder().shortcode("ex1").build().record();
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct LinkFixture {
    #[builder(setter(into))]
    shortcode: String,
    #[builder(default = "https://example.com".to_string(), setter(into))]
    original_url: String,
    #[builder(default = Timestamp::UNIX_EPOCH)]
    created_at: Timestamp,
    #[builder(default = 30)]
    validity_minutes: i64,
}

impl LinkFixture {
    /// # Panics
    ///
    /// Panics if `validity_minutes` is not positive.
    pub fn record(&self) -> LinkRecord {
        let expiry = self.created_at + SignedDuration::from_mins(self.validity_minutes);
        LinkRecord::new(
            ShortCode::new_unchecked(self.shortcode.as_str()),
            self.original_url.as_str(),
            self.created_at,
            expiry,
        )
        .expect("fixture expiry after creation")
    }
}
