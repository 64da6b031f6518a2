use std::fmt;

use url::Url;

use crate::errors::{CmdError, ErrorKind};
use crate::types::CmdResult;

/// Where a transport dispatches its requests.
///
/// Endpoints are parsed once when the transport is configured and treated
/// as read-only afterwards.  The one place the core itself uses them is
/// connectivity-error enrichment, so a failure names the endpoint it could
/// not reach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// The host component of the endpoint.
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    /// The underlying URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.url.fmt(f)
    }
}

/// Converts an object into an endpoint.  This trait is the recommended
/// seam for transport constructors, so callers can pass plain URL strings:
///
/// ```rust
/// use cachectl::IntoEndpoint;
///
/// let endpoint = "https://cache.us-east-1.example.test".into_endpoint().unwrap();
/// assert_eq!(endpoint.host(), "cache.us-east-1.example.test");
/// ```
pub trait IntoEndpoint {
    /// Converts the object into an endpoint.
    fn into_endpoint(self) -> CmdResult<Endpoint>;
}

impl IntoEndpoint for Endpoint {
    fn into_endpoint(self) -> CmdResult<Endpoint> {
        Ok(self)
    }
}

impl IntoEndpoint for Url {
    fn into_endpoint(self) -> CmdResult<Endpoint> {
        if self.scheme() != "https" && self.scheme() != "http" {
            fail!(CmdError::from((
                ErrorKind::InvalidClientConfig,
                "Endpoint URL has an unsupported scheme",
                self.scheme().to_string(),
            )));
        }
        if self.host_str().is_none() {
            fail!(CmdError::from((
                ErrorKind::InvalidClientConfig,
                "Endpoint URL has no host",
                self.to_string(),
            )));
        }
        Ok(Endpoint { url: self })
    }
}

impl IntoEndpoint for &str {
    fn into_endpoint(self) -> CmdResult<Endpoint> {
        Url::parse(self)?.into_endpoint()
    }
}

impl IntoEndpoint for String {
    fn into_endpoint(self) -> CmdResult<Endpoint> {
        self.as_str().into_endpoint()
    }
}
