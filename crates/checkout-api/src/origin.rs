//! # Trusted Origin
//!
//! Exact-origin allowlisting for the payment endpoint. The trusted origin
//! is the scheme, host and port of `BASE_URL`; a request passes only when
//! its `Origin` header (or, failing that, the origin of its `Referer`) is
//! that same origin.

use axum::http::{header, HeaderMap, Uri};
use checkout_core::{CheckoutError, CheckoutResult};

#[derive(Debug, Clone)]
pub struct TrustedOrigin {
    origin: String,
}

impl TrustedOrigin {
    /// Derive the trusted origin from the configured base URL
    pub fn from_base_url(base_url: &str) -> CheckoutResult<Self> {
        let origin = origin_of(base_url).ok_or_else(|| {
            CheckoutError::Configuration(format!(
                "BASE_URL must be an absolute http(s) URL, got {:?}",
                base_url
            ))
        })?;

        Ok(Self { origin })
    }

    pub fn as_str(&self) -> &str {
        &self.origin
    }

    /// Whether `url` is on the trusted origin
    pub fn matches_url(&self, url: &str) -> bool {
        origin_of(url).as_deref() == Some(self.origin.as_str())
    }

    /// Check the request headers against the trusted origin
    pub fn verify(&self, headers: &HeaderMap) -> CheckoutResult<()> {
        let claimed = match headers.get(header::ORIGIN) {
            Some(origin) => origin.to_str().ok(),
            None => headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
        };

        match claimed {
            Some(url) if self.matches_url(url) => Ok(()),
            _ => Err(CheckoutError::Forbidden("Invalid request origin".to_string())),
        }
    }
}

/// Serialized origin (`scheme://host[:port]`) of an absolute http(s) URL.
/// Default ports are dropped and scheme/host are lowercased.
fn origin_of(url: &str) -> Option<String> {
    let uri: Uri = url.trim().parse().ok()?;
    let scheme = uri.scheme_str()?.to_ascii_lowercase();
    let default_port = match scheme.as_str() {
        "http" => 80,
        "https" => 443,
        _ => return None,
    };

    let authority = uri.authority()?;
    let host = authority.host().to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }

    match authority.port_u16() {
        Some(port) if port != default_port => Some(format!("{}://{}:{}", scheme, host, port)),
        _ => Some(format!("{}://{}", scheme, host)),
    }
}
