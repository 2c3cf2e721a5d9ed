//! HTTP transport backed by `reqwest`.
//!
//! This module provides the [`HttpClient`] type, the default
//! [`Transport`] used by [`GraphqlClient::new`](crate::GraphqlClient::new).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::endpoint::{Endpoint, EndpointDefaults};
use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::graphql::GraphqlEndpointOptions;
use crate::clients::http_request::{HttpMethod, HttpRequest, MediaType};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::GraphqlConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport for the GitHub API.
///
/// The client handles:
/// - Default headers including `user-agent`, `accept` and `authorization`
/// - URL resolution against the configured base URL
/// - Automatic retry logic for 429 and 500 responses
/// - Deprecation header logging
///
/// Cloning is cheap; clones share the connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use github_graphql::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(None);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "https://api.github.com/zen")
///     .build()
///     .unwrap();
///
/// let response = client.send(request).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The effective request configuration.
    endpoint: Endpoint,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `config` - Optional configuration for base URL, token, user agent
    ///   prefix and previews
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: Option<&GraphqlConfig>) -> Self {
        let mut defaults = EndpointDefaults::default();

        defaults
            .headers
            .insert("user-agent".to_string(), user_agent(config));

        if let Some(config) = config {
            defaults.base_url = config.base_url().to_string();
            if let Some(token) = config.auth_token() {
                defaults
                    .headers
                    .insert("authorization".to_string(), token.authorization());
            }
            defaults.media_type = MediaType {
                format: None,
                previews: config.previews().to_vec(),
            };
        }

        Self::with_defaults(defaults)
    }

    /// Creates a client bound to explicit endpoint defaults.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn with_defaults(defaults: EndpointDefaults) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: Endpoint::new(defaults),
        }
    }

    /// Sends a resolved request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    /// - A 2xx body is not valid JSON (`Decode`)
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Patch => reqwest::Method::PATCH,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };
            let mut req_builder = self.client.request(method, &request.url);

            for (name, value) in &request.headers {
                req_builder = req_builder.header(name, value);
            }
            if let Some(body) = &request.body {
                req_builder = req_builder.json(body);
            }
            if let Some(timeout) = request.timeout {
                req_builder = req_builder.timeout(timeout);
            }

            tracing::debug!(method = %request.method, url = %request.url, tries, "Sending request");
            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;

            let body = if (200..300).contains(&code) {
                if body_text.trim().is_empty() {
                    serde_json::Value::Null
                } else {
                    serde_json::from_str(&body_text)?
                }
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "message": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);

            if let Some(info) = response.deprecation() {
                let sunset = info
                    .sunset
                    .map_or_else(String::new, |sunset| format!(" It is scheduled to be removed on {sunset}"));
                tracing::warn!(
                    "\"{} {}\" is deprecated.{}",
                    request.method,
                    request.url,
                    sunset
                );
            }

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);
            let error_reference = response.request_id().map(String::from);

            let should_retry = code == 429 || code == 500;
            if !should_retry || request.tries == 1 {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference,
                }));
            }
            if tries >= request.tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error_message,
                    error_reference,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::debug!(code, ?delay, tries, "Retrying request");
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`, joining repeated values.
    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        let mut result: HashMap<String, String> = HashMap::new();
        for (name, value) in headers {
            let value = value.to_str().unwrap_or_default();
            result
                .entry(name.as_str().to_lowercase())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> std::time::Duration {
        // For 429: use Retry-After if present, otherwise fixed delay
        // For 500: always use fixed delay
        if status == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|secs| std::time::Duration::try_from_secs_f64(secs.max(0.0)).ok())
            {
                return delay;
            }
        }
        std::time::Duration::from_secs(RETRY_WAIT_TIME)
    }

    /// Serializes the relevant error fields of a response body to JSON.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for field in ["message", "errors", "documentation_url"] {
            if let Some(value) = response.body.get(field) {
                error_body.insert(field.to_string(), value.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[async_trait]
impl Transport for HttpClient {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn with_endpoint(&self, endpoint: Endpoint) -> Self {
        Self {
            client: self.client.clone(),
            endpoint,
        }
    }

    async fn request(&self, options: GraphqlEndpointOptions) -> Result<HttpResponse, HttpError> {
        let request = self.endpoint.parse(&options)?;
        self.send(request).await
    }
}

/// Builds the `user-agent` header value.
fn user_agent(config: Option<&GraphqlConfig>) -> String {
    let prefix = config
        .and_then(GraphqlConfig::user_agent_prefix)
        .map_or(String::new(), |prefix| format!("{prefix} "));
    let rust_version = env!("CARGO_PKG_RUST_VERSION");
    format!("{prefix}github-graphql.rs/{SDK_VERSION} rust/{rust_version}")
}
