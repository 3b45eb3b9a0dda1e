//! Page location and realtime URL resolution.
//!
//! The client stands in for a page served by the quiz site. The page location
//! is fixed at startup and every realtime endpoint is resolved against it.

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Invalid page location `{raw}`: {source}")]
    Invalid {
        raw: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Page location `{0}` has no host")]
    MissingHost(String),

    #[error("Unsupported page protocol `{0}`")]
    UnsupportedScheme(String),
}

/// The location of the page the client is running on.
///
/// Always absolute, with a host and an `http`, `https`, `ws` or `wss` scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation(Url);

impl PageLocation {
    pub fn parse(raw: &str) -> Result<Self, LocationError> {
        let url = Url::parse(raw).map_err(|source| LocationError::Invalid {
            raw: raw.to_string(),
            source,
        })?;

        if !matches!(url.scheme(), "http" | "https" | "ws" | "wss") {
            return Err(LocationError::UnsupportedScheme(url.scheme().to_string()));
        }
        if url.host_str().is_none() {
            return Err(LocationError::MissingHost(raw.to_string()));
        }

        Ok(Self(url))
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

/// Resolve a root-relative path into a realtime URL on the page's host.
///
/// An `https` page maps to `wss`; any other page protocol maps to `ws`. The
/// host and port are kept; query and fragment are dropped.
pub fn resolve_realtime_url(location: &PageLocation, relative_path: &str) -> Url {
    let scheme = if location.url().scheme() == "https" {
        "wss"
    } else {
        "ws"
    };

    let mut url = location.url().clone();
    // All accepted page schemes are special, so switching between them succeeds.
    if url.set_scheme(scheme).is_err() {
        tracing::warn!(page = %location.url(), scheme, "Could not switch page scheme");
    }
    url.set_path(relative_path);
    url.set_query(None);
    url.set_fragment(None);
    url
}
