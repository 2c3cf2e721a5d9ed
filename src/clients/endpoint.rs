//! Transport configuration and request resolution.
//!
//! An [`Endpoint`] is the effective configuration of a transport: base URL,
//! default headers, method, and so on. Layering options on top never mutates
//! an existing endpoint; [`Endpoint::with_defaults`] returns a new one.
//! [`Endpoint::parse`] turns an endpoint plus per-call options into the
//! concrete [`HttpRequest`] without touching the network.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::errors::InvalidHttpRequestError;
use crate::clients::graphql::GraphqlEndpointOptions;
use crate::clients::http_request::{HttpMethod, HttpRequest, MediaType, RequestConfig};
use crate::config::BaseUrl;

/// Default `accept` header for the GitHub API.
pub const DEFAULT_ACCEPT: &str = "application/vnd.github.v3+json";

/// Effective transport configuration.
///
/// # Example
///
/// ```rust
/// use github_graphql::clients::{EndpointDefaults, HttpMethod};
///
/// let defaults = EndpointDefaults::default();
/// assert_eq!(defaults.method, HttpMethod::Get);
/// assert_eq!(defaults.base_url, "https://api.github.com");
/// assert_eq!(defaults.headers["accept"], "application/vnd.github.v3+json");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDefaults {
    /// HTTP method.
    pub method: HttpMethod,
    /// API base URL without trailing slash.
    pub base_url: String,
    /// Request URL, if one has been bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Headers with lower-cased names.
    pub headers: HashMap<String, String>,
    /// Format and preview negotiation.
    #[serde(skip_serializing_if = "MediaType::is_empty")]
    pub media_type: MediaType,
    /// Retry and timeout settings.
    pub request: RequestConfig,
    /// A bound GraphQL document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Bound GraphQL variables; never an empty map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl Default for EndpointDefaults {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            base_url: BaseUrl::GITHUB.to_string(),
            url: None,
            headers: HashMap::from([("accept".to_string(), DEFAULT_ACCEPT.to_string())]),
            media_type: MediaType::default(),
            request: RequestConfig::default(),
            query: None,
            variables: None,
        }
    }
}

impl EndpointDefaults {
    /// Layers `options` on top of these defaults.
    ///
    /// Set fields in `options` win. Headers and variables merge per key,
    /// media-type previews are combined, and request settings merge per
    /// field.
    #[must_use]
    pub fn merge(&self, options: &GraphqlEndpointOptions) -> Self {
        let mut merged = self.clone();

        if let Some(method) = options.method {
            merged.method = method;
        }
        if let Some(base_url) = &options.base_url {
            merged.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(url) = &options.url {
            merged.url = Some(url.clone());
        }
        if let Some(headers) = &options.headers {
            for (name, value) in headers {
                merged
                    .headers
                    .insert(name.to_ascii_lowercase(), value.clone());
            }
        }
        if let Some(media_type) = &options.media_type {
            merged.media_type = merged.media_type.merge(media_type);
        }
        if let Some(request) = &options.request {
            merged.request = merged.request.merge(request);
        }
        if let Some(query) = &options.query {
            merged.query = Some(query.clone());
        }
        if let Some(variables) = options.variables.as_ref().filter(|v| !v.is_empty()) {
            let target = merged.variables.get_or_insert_with(Map::new);
            for (key, value) in variables {
                target.insert(key.clone(), value.clone());
            }
        }

        merged
    }

    /// The JSON body for these settings: `{query, variables}`, omitting
    /// absent fields. `None` when both are absent.
    #[must_use]
    pub fn body(&self) -> Option<Value> {
        let mut body = Map::new();
        if let Some(query) = &self.query {
            body.insert("query".to_string(), Value::String(query.clone()));
        }
        if let Some(variables) = &self.variables {
            body.insert("variables".to_string(), Value::Object(variables.clone()));
        }
        (!body.is_empty()).then_some(Value::Object(body))
    }
}

/// An immutable, cheaply cloneable transport configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Endpoint {
    defaults: Arc<EndpointDefaults>,
}

impl Endpoint {
    /// Creates an endpoint from explicit defaults.
    #[must_use]
    pub fn new(defaults: EndpointDefaults) -> Self {
        Self {
            defaults: Arc::new(defaults),
        }
    }

    /// Returns the current defaults.
    #[must_use]
    pub fn defaults(&self) -> &EndpointDefaults {
        &self.defaults
    }

    /// Returns a new endpoint with `options` layered on top.
    #[must_use]
    pub fn with_defaults(&self, options: &GraphqlEndpointOptions) -> Self {
        Self::new(self.defaults.merge(options))
    }

    /// Returns the effective configuration for a call with `options`.
    #[must_use]
    pub fn merge(&self, options: &GraphqlEndpointOptions) -> EndpointDefaults {
        self.defaults.merge(options)
    }

    /// Resolves a call with `options` into a concrete request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if no URL is bound or a body is
    /// required but neither `query` nor `variables` is set.
    pub fn parse(&self, options: &GraphqlEndpointOptions) -> Result<HttpRequest, InvalidHttpRequestError> {
        let merged = self.merge(options);

        let url = merged
            .url
            .as_deref()
            .map(|url| resolve_url(&merged.base_url, url))
            .ok_or(InvalidHttpRequestError::MissingUrl)?;

        let mut builder = HttpRequest::builder(merged.method, url)
            .headers(&merged.headers)
            .tries(merged.request.tries.unwrap_or(1));

        if let Some(accept) = merged.headers.get("accept") {
            builder = builder.header("accept", apply_media_type(accept, &merged.media_type));
        }
        if let Some(timeout) = merged.request.timeout {
            builder = builder.timeout(Duration::from_millis(timeout));
        }
        if let Some(body) = merged.body() {
            builder = builder.body(body);
        }

        builder.build()
    }
}

fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }

    let base_url = base_url.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{base_url}{url}")
    } else {
        format!("{base_url}/{url}")
    }
}

fn vendor_format_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"application/vnd(\.\w+)(\.v3)?(\.\w+)?(\+json)?$").expect("valid vendor regex")
    })
}

fn preview_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([\w-]+)-preview").expect("valid preview regex"))
}

/// Rewrites an `accept` header for the requested format and previews.
fn apply_media_type(accept: &str, media_type: &MediaType) -> String {
    let mut accept = accept.to_string();

    if let Some(format) = &media_type.format {
        let replacement = format!("application/vnd${{1}}${{2}}.{format}");
        accept = accept
            .split(',')
            .map(|entry| {
                vendor_format_regex()
                    .replace(entry.trim(), replacement.as_str())
                    .into_owned()
            })
            .collect::<Vec<_>>()
            .join(",");
    }

    if !media_type.previews.is_empty() {
        let suffix = media_type
            .format
            .as_ref()
            .map_or_else(|| "+json".to_string(), |format| format!(".{format}"));
        let mut previews: Vec<String> = preview_regex()
            .captures_iter(&accept)
            .map(|captures| captures[1].to_string())
            .collect();
        for preview in &media_type.previews {
            if !previews.contains(preview) {
                previews.push(preview.clone());
            }
        }
        accept = previews
            .iter()
            .map(|preview| format!("application/vnd.github.{preview}-preview{suffix}"))
            .collect::<Vec<_>>()
            .join(",");
    }

    accept
}
