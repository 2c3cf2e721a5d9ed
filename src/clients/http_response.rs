//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] returned by every
//! [`Transport`](crate::clients::Transport), plus the GitHub-specific header
//! values the client inspects.

use std::collections::HashMap;

/// Deprecation notice carried by the `Deprecation` and `Sunset` headers.
///
/// # Example
///
/// ```rust
/// use github_graphql::clients::HttpResponse;
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let headers = HashMap::from([
///     ("deprecation".to_string(), "true".to_string()),
///     ("sunset".to_string(), "Sat, 01 Nov 2025 00:00:00 GMT".to_string()),
/// ]);
///
/// let response = HttpResponse::new(200, headers, json!({}));
/// let info = response.deprecation().unwrap();
/// assert_eq!(info.sunset.as_deref(), Some("Sat, 01 Nov 2025 00:00:00 GMT"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDeprecationInfo {
    /// The raw `Deprecation` header value.
    pub deprecation: String,
    /// The scheduled removal date from the `Sunset` header, if any.
    pub sunset: Option<String>,
}

/// An HTTP response from the API.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers with lower-cased names. Repeated headers are
    /// joined with `", "`.
    pub headers: HashMap<String, String>,
    /// The parsed JSON response body.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, normalizing header names and parsing
    /// `Retry-After`.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, String>, body: serde_json::Value) -> Self {
        let headers: HashMap<String, String> = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();

        let retry_request_after = headers
            .get("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite());

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-GitHub-Request-Id` header value, if present.
    ///
    /// Include this ID when reporting errors to GitHub.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get("x-github-request-id").map(String::as_str)
    }

    /// Returns deprecation information if the response carries a
    /// `Deprecation` header.
    #[must_use]
    pub fn deprecation(&self) -> Option<ApiDeprecationInfo> {
        self.headers
            .get("deprecation")
            .map(|deprecation| ApiDeprecationInfo {
                deprecation: deprecation.clone(),
                sunset: self.headers.get("sunset").cloned(),
            })
    }
}
