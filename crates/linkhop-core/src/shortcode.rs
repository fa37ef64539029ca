use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::Display;

/// The unique key of a [`LinkRecord`](crate::LinkRecord).
///
/// A short code is either a caller-supplied alias or a system-generated
/// identifier. Aliases are kept verbatim apart from surrounding whitespace,
/// so no character set is enforced here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Parses a user-supplied alias.
    ///
    /// Surrounding whitespace is trimmed. A blank alias yields `None`, which
    /// callers treat as "generate a code for me".
    pub fn alias(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Creates a `ShortCode` without trimming or checking for blank input.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators, or codes read back from the store).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ShortCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}
