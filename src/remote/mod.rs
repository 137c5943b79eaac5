//! Hosted-repository addresses derived from git remotes.
//!
//! - [`parse`] turns one remote URL (SSH or HTTP(S) shape) into an [`Address`]
//! - [`select`] picks the remote that belongs to the hosted service
//! - [`Address`] builds web and API URLs for the repository and its entities

mod address;
mod select;
mod url;

pub use address::{Address, EntityKind};
pub use select::select;
pub use url::{ParseError, parse};

use serde::Serialize;

/// A locally configured remote (alias → URL) and its parsed address, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteCandidate {
    /// Local alias, e.g. `origin`.
    pub name: String,
    /// URL string as configured.
    pub raw_url: String,
    /// Present only when `raw_url` parsed.
    pub address: Option<Address>,
}

impl RemoteCandidate {
    /// Create a candidate, parsing its URL eagerly.
    #[must_use]
    pub fn new(name: impl Into<String>, raw_url: impl Into<String>) -> Self {
        let raw_url = raw_url.into();
        let address = parse(&raw_url).ok();
        Self {
            name: name.into(),
            raw_url,
            address,
        }
    }

    /// Build candidates from ordered `(name, url)` pairs.
    #[must_use]
    pub fn from_pairs<I, N, U>(pairs: I) -> Vec<Self>
    where
        I: IntoIterator<Item = (N, U)>,
        N: Into<String>,
        U: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(name, url)| Self::new(name, url))
            .collect()
    }

    /// Whether the parsed address lives on `host` (case-insensitive).
    #[must_use]
    pub fn is_on_host(&self, host: &str) -> bool {
        self.address
            .as_ref()
            .is_some_and(|address| address.host().eq_ignore_ascii_case(host))
    }
}
