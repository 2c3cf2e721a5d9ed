//! GraphQL-specific error types.
//!
//! The GraphQL layer distinguishes three kinds of failure:
//!
//! - [`GraphqlError::Usage`]: the call itself was malformed. Raised before
//!   any network activity.
//! - [`GraphqlError::Http`]: the transport failed (network, non-2xx status,
//!   malformed body). Passed through unchanged.
//! - [`GraphqlError::Response`]: HTTP succeeded but the envelope carried a
//!   non-empty `errors` array. `data` may still be partially populated.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_graphql::GraphqlError;
//!
//! match client.graphql("{ viewer { login } }", None).await {
//!     Ok(data) => println!("Data: {data}"),
//!     Err(GraphqlError::Response(e)) => {
//!         for detail in &e.errors {
//!             println!("GraphQL error: {}", detail.message);
//!         }
//!         println!("Partial data: {}", e.data);
//!     }
//!     Err(GraphqlError::Http(e)) => println!("HTTP error: {e}"),
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::clients::graphql::options::GraphqlEndpointOptions;
use crate::clients::graphql::response::GraphqlErrorDetail;
use crate::clients::HttpError;

/// Caller misuse detected before a request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// A transport field name was passed where only variables are allowed.
    #[error("\"{key}\" cannot be used as variable name")]
    ForbiddenVariable {
        /// The offending key.
        key: String,
    },

    /// A transport field holds a value of the wrong shape.
    #[error("Invalid value for \"{key}\": {reason}")]
    InvalidOption {
        /// The transport field.
        key: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// Request parameters were built from a non-object JSON value.
    #[error("Request parameters must be a JSON object, got {kind}")]
    NotAnObject {
        /// The JSON kind that was supplied.
        kind: &'static str,
    },
}

/// The server answered with GraphQL-level errors.
///
/// The message lists every error in the order received:
///
/// ```text
/// Request failed due to following response errors:
///  - <message 1>
///  - <message 2>
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct GraphqlResponseError {
    /// Message derived from `errors`.
    pub message: String,
    /// The partitioned options that were sent.
    pub request: GraphqlEndpointOptions,
    /// Response headers with lower-cased names.
    pub headers: HashMap<String, String>,
    /// The errors, exactly as received.
    pub errors: Vec<GraphqlErrorDetail>,
    /// The (possibly partial) `data` payload.
    pub data: serde_json::Value,
}

impl GraphqlResponseError {
    const MESSAGE_PREFIX: &'static str = "Request failed due to following response errors:";

    /// Creates the error, deriving its message from `errors`.
    #[must_use]
    pub fn new(
        request: GraphqlEndpointOptions,
        headers: HashMap<String, String>,
        errors: Vec<GraphqlErrorDetail>,
        data: serde_json::Value,
    ) -> Self {
        let mut message = Self::MESSAGE_PREFIX.to_string();
        for detail in &errors {
            message.push_str("\n - ");
            message.push_str(&detail.message);
        }

        Self {
            message,
            request,
            headers,
            errors,
            data,
        }
    }

    /// Returns the `X-GitHub-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get("x-github-request-id").map(String::as_str)
    }

    /// Returns `true` if some data resolved despite the errors.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.data.is_null()
    }
}

/// Error type for GraphQL operations.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// The call was malformed; nothing was sent.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The response envelope carried GraphQL errors.
    #[error(transparent)]
    Response(Box<GraphqlResponseError>),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The `data` payload did not match the requested type.
    #[error("Failed to deserialize GraphQL response data: {0}")]
    InvalidData(#[source] serde_json::Error),
}

impl GraphqlError {
    /// Returns the GraphQL response error, if this is one.
    #[must_use]
    pub fn as_response(&self) -> Option<&GraphqlResponseError> {
        match self {
            Self::Response(error) => Some(error),
            _ => None,
        }
    }
}

impl From<GraphqlResponseError> for GraphqlError {
    fn from(error: GraphqlResponseError) -> Self {
        Self::Response(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use serde_json::json;

    fn detail(message: &str) -> GraphqlErrorDetail {
        GraphqlErrorDetail {
            message: message.to_string(),
            path: None,
            kind: None,
            extensions: None,
            locations: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_message_lists_errors_in_order() {
        let error = GraphqlResponseError::new(
            GraphqlEndpointOptions::default(),
            HashMap::new(),
            vec![detail("first"), detail("second")],
            json!(null),
        );

        assert_eq!(
            error.to_string(),
            "Request failed due to following response errors:\n - first\n - second"
        );
    }

    #[test]
    fn test_partial_data_and_request_id() {
        let headers = HashMap::from([(
            "x-github-request-id".to_string(),
            "C5E6:259A:1351B40:2E88B87:5F1F9C41".to_string(),
        )]);
        let error = GraphqlResponseError::new(
            GraphqlEndpointOptions::default(),
            headers,
            vec![detail("boom")],
            json!({"repository": {"name": "probot", "ref": null}}),
        );

        assert!(error.is_partial());
        assert_eq!(error.request_id(), Some("C5E6:259A:1351B40:2E88B87:5F1F9C41"));
    }

    #[test]
    fn test_usage_error_names_key() {
        let error = UsageError::ForbiddenVariable {
            key: "method".to_string(),
        };
        assert_eq!(error.to_string(), r#""method" cannot be used as variable name"#);
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        let usage: GraphqlError = UsageError::ForbiddenVariable {
            key: "url".to_string(),
        }
        .into();
        let http: GraphqlError = HttpError::Response(HttpResponseError {
            code: 502,
            message: "Bad Gateway".to_string(),
            error_reference: None,
        })
        .into();
        let response: GraphqlError = GraphqlResponseError::new(
            GraphqlEndpointOptions::default(),
            HashMap::new(),
            vec![detail("boom")],
            json!(null),
        )
        .into();

        assert!(matches!(usage, GraphqlError::Usage(_)));
        assert!(matches!(http, GraphqlError::Http(_)));
        assert!(response.as_response().is_some());
        assert!(usage.as_response().is_none());
    }

    #[test]
    fn test_error_sources_are_exposed() {
        use std::error::Error as _;

        let invalid_data = GraphqlError::InvalidData(
            serde_json::from_str::<u32>("\"x\"").unwrap_err(),
        );
        assert!(invalid_data.source().is_some());
        assert!(invalid_data
            .to_string()
            .starts_with("Failed to deserialize GraphQL response data:"));

        let usage = GraphqlError::Usage(UsageError::NotAnObject { kind: "a string" });
        assert_eq!(
            usage.to_string(),
            "Request parameters must be a JSON object, got a string"
        );
    }
}
