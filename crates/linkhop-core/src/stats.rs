use crate::record::{ClickEvent, LinkRecord};
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::Serialize;

/// Read-only summary of one link as shown by the statistics view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub shortcode: ShortCode,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expiry_time: Timestamp,
    pub clicks: u64,
    pub expired: bool,
    pub click_logs: Vec<ClickEvent>,
}

impl LinkStats {
    /// Summarizes `record` as seen at `now`.
    pub fn at(record: &LinkRecord, now: Timestamp) -> Self {
        Self {
            shortcode: record.shortcode().clone(),
            original_url: record.original_url().to_owned(),
            created_at: record.created_at(),
            expiry_time: record.expiry_time(),
            clicks: record.clicks(),
            expired: record.is_expired_at(now),
            click_logs: record.click_logs().to_vec(),
        }
    }
}
