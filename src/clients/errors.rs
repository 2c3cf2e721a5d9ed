//! Transport-level error types.
//!
//! These errors describe failures of the HTTP layer itself: the request could
//! not be built, the network call failed, the server answered with a non-2xx
//! status, or the body was not valid JSON. They are propagated unchanged
//! through the GraphQL layer as [`GraphqlError::Http`](crate::GraphqlError::Http).
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use github_graphql::clients::HttpError;
//!
//! match transport.request(options).await {
//!     Ok(response) => println!("Body: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::MaxRetries(e)) => println!("Retries exhausted after {} tries", e.tries),
//!     Err(e) => println!("Transport error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message field contains JSON with any of these fields from the response:
/// - `message`: The API error message
/// - `errors`: Array of error details
/// - `documentation_url`: Link to the relevant API documentation
/// - `error_reference`: Debugging reference including `X-GitHub-Request-Id`
///
/// # Example
///
/// ```rust
/// use github_graphql::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 401,
///     message: r#"{"message":"Bad credentials"}"#.to_string(),
///     error_reference: Some("C5E6:259A".to_string()),
/// };
///
/// assert_eq!(error.to_string(), r#"{"message":"Bad credentials"}"#);
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from `X-GitHub-Request-Id`).
    pub error_reference: Option<String>,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request keeps failing with 429 or 500 responses after all
/// configured tries.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from `X-GitHub-Request-Id`).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The HTTP method is not one of the supported methods.
    #[error("Invalid Http method {method}.")]
    InvalidMethod {
        /// The invalid method that was provided.
        method: String,
    },

    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// No request URL could be resolved.
    #[error("Cannot send a request without a url.")]
    MissingUrl,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
