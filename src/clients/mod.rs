//! HTTP client types for GitHub API communication.
//!
//! This module provides the transport layer the GraphQL client sits on. It
//! handles endpoint defaults, request/response processing, retry logic, and
//! GitHub-specific header parsing.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: The request capability the GraphQL layer depends on
//! - [`Endpoint`]: An immutable stack of request defaults
//! - [`HttpClient`]: The default `reqwest`-backed transport
//! - [`HttpRequest`]: A fully resolved request
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`graphql::GraphqlClient`]: GraphQL API client over any transport
//! - [`graphql::GraphqlError`]: GraphQL-specific error types
//!
//! # Example
//!
//! ```rust,ignore
//! use github_graphql::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(None);
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "https://api.github.com/zen")
//!     .build()
//!     .unwrap();
//!
//! let response = client.send(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The client implements automatic retry logic for transient failures:
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **500 (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Bind
//! `request: { "tries": n }` as a default, or use [`HttpRequest::builder`]
//! with `.tries(n)`, to enable retries.

mod endpoint;
mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use endpoint::{Endpoint, EndpointDefaults, DEFAULT_ACCEPT};
pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, MediaType, RequestConfig};
pub use http_response::{ApiDeprecationInfo, HttpResponse};
pub use transport::Transport;

// Re-export GraphQL client types at the clients module level
pub use graphql::{GraphqlClient, GraphqlEndpointOptions, GraphqlError};
