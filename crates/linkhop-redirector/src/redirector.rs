use crate::Result;
use linkhop_core::ShortCode;
use std::net::IpAddr;
use typed_builder::TypedBuilder;

/// What is known about the visitor following a short link.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct Visit {
    /// Page the visitor came from. Missing or blank means a direct visit.
    #[builder(default, setter(strip_option, into))]
    pub referrer: Option<String>,
    /// Visitor address, handed to the location provider.
    #[builder(default, setter(strip_option))]
    pub client: Option<IpAddr>,
}

impl Visit {
    /// A visit with no referrer and no address.
    pub fn direct() -> Self {
        Self::default()
    }
}

pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short code to its original URL, recording the visit.
    ///
    /// Unknown and expired codes fail and record nothing.
    fn resolve(&self, code: &ShortCode, visit: &Visit) -> Result<String>;
}
