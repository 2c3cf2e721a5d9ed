//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type produced by
//! [`Endpoint::parse`](crate::clients::Endpoint::parse), its builder, and the
//! small value types carried by the `method`, `mediaType` and `request`
//! transport fields.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods supported by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method.
    Get,
    /// HTTP POST method.
    Post,
    /// HTTP PUT method.
    Put,
    /// HTTP PATCH method.
    Patch,
    /// HTTP DELETE method.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if requests with this method must carry a body.
    #[must_use]
    pub const fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidHttpRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(InvalidHttpRequestError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl Serialize for HttpMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Format and preview negotiation carried by the `mediaType` field.
///
/// # Example
///
/// ```rust
/// use github_graphql::clients::MediaType;
///
/// let media_type: MediaType = serde_json::from_value(serde_json::json!({
///     "format": "raw",
///     "previews": ["starfox"]
/// })).unwrap();
///
/// assert_eq!(media_type.format.as_deref(), Some("raw"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaType {
    /// Response format, e.g. `raw` or `html`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// API previews to opt into.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previews: Vec<String>,
}

impl MediaType {
    /// Layers `other` on top of `self`.
    ///
    /// A format set in `other` replaces the current one. Previews are
    /// combined, keeping first-seen order and dropping duplicates.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut previews = self.previews.clone();
        for preview in &other.previews {
            if !previews.contains(preview) {
                previews.push(preview.clone());
            }
        }

        Self {
            format: other.format.clone().or_else(|| self.format.clone()),
            previews,
        }
    }

    /// Returns `true` if neither a format nor previews are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.format.is_none() && self.previews.is_empty()
    }
}

/// Transport behaviour carried by the `request` field.
///
/// Unknown keys are ignored so callers can pass through settings meant for
/// other transports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Number of times to attempt the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tries: Option<u32>,
    /// Request timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl RequestConfig {
    /// Layers `other` on top of `self`, field by field.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            tries: other.tries.or(self.tries),
            timeout: other.timeout.or(self.timeout),
        }
    }
}

/// A fully resolved HTTP request.
///
/// Use [`HttpRequest::builder`] to construct requests by hand; transports
/// obtain them from [`Endpoint::parse`](crate::clients::Endpoint::parse).
///
/// # Example
///
/// ```rust
/// use github_graphql::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "https://api.github.com/graphql")
///     .header("authorization", "token secret123")
///     .body(json!({"query": "{ viewer { login } }"}))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.tries, 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The absolute request URL.
    pub url: String,
    /// Request headers with lower-cased names.
    pub headers: HashMap<String, String>,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Number of times to attempt the request (default: 1).
    pub tries: u32,
    /// Per-attempt timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `url` is empty
    /// - `method` is `Post`, `Put` or `Patch` but `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.url.is_empty() {
            return Err(InvalidHttpRequestError::MissingUrl);
        }

        if self.method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    url: String,
    headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
    tries: u32,
    timeout: Option<Duration>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            tries: 1,
            timeout: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a single header. Names are lower-cased.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Adds every header from `headers`.
    #[must_use]
    pub fn headers(mut self, headers: &HashMap<String, String>) -> Self {
        for (name, value) in headers {
            self.headers.insert(name.to_ascii_lowercase(), value.clone());
        }
        self
    }

    /// Sets the number of times to attempt the request.
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub fn tries(mut self, tries: u32) -> Self {
        self.tries = tries.max(1);
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            tries: self.tries,
            timeout: self.timeout,
        };
        request.verify()?;
        Ok(request)
    }
}
