//! Public origin of an inbound request
//!
//! Used to build absolute URLs when `PUBLIC_BASE_URL` is not configured.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap, Uri};

const DEFAULT_SCHEME: &str = "http";
const DEFAULT_HOST: &str = "localhost";

/// Scheme and host the client used to reach us
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

/// First entry of a possibly comma-separated forwarding header
fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl RequestOrigin {
    /// Resolve scheme and host from proxy headers, then `Host`, then the request URI.
    pub fn from_request(headers: &HeaderMap, uri: &Uri) -> Self {
        let scheme = first_header_value(headers, "x-forwarded-proto")
            .map(|s| s.to_lowercase())
            .filter(|s| s == "http" || s == "https")
            .or_else(|| uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_SCHEME.to_string());

        let host = first_header_value(headers, "x-forwarded-host")
            .or_else(|| first_header_value(headers, header::HOST.as_str()))
            .map(str::to_string)
            .or_else(|| uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Self { scheme, host }
    }

    /// `scheme://host`, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestOrigin::from_request(&parts.headers, &parts.uri))
    }
}
