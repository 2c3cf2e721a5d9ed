//! GraphQL client with composable defaults.
//!
//! This module provides the [`GraphqlClient`] type: a transport bound to a
//! stack of request defaults, plus the call surface on top of it.

use serde::de::DeserializeOwned;

use crate::clients::graphql::errors::{GraphqlError, UsageError};
use crate::clients::graphql::invoke;
use crate::clients::graphql::options::{GraphqlEndpointOptions, QueryInput, RequestParameters};
use crate::clients::http_request::HttpMethod;
use crate::clients::{Endpoint, HttpClient, Transport};
use crate::config::GraphqlConfig;

/// GraphQL API client.
///
/// Every client owns its own transport configuration. [`defaults`](Self::defaults)
/// produces a new client with more defaults layered on top and never changes
/// the client it was called on.
///
/// # Thread Safety
///
/// `GraphqlClient<HttpClient>` is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```rust,ignore
/// use github_graphql::{GraphqlClient, RequestParameters};
///
/// let client = GraphqlClient::new(None).defaults(
///     RequestParameters::new().header("authorization", "token secret123"),
/// )?;
///
/// // Simple query
/// let data = client.graphql("{ viewer { login } }", None).await?;
/// println!("Login: {}", data["viewer"]["login"]);
///
/// // Query with variables
/// let data = client
///     .graphql(
///         "query Q($owner: String!) { repositoryOwner(login: $owner) { login } }",
///         Some(RequestParameters::new().set("owner", "octokit")),
///     )
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct GraphqlClient<T = HttpClient> {
    transport: T,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient<HttpClient> {
    /// Creates a client over the default HTTP transport.
    ///
    /// The transport is configured from `config` (base URL, token, user
    /// agent prefix, previews); the client then binds `POST /graphql`.
    #[must_use]
    pub fn new(config: Option<&GraphqlConfig>) -> Self {
        Self::with_custom_request(HttpClient::new(config))
    }
}

impl Default for GraphqlClient<HttpClient> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T: Transport> GraphqlClient<T> {
    /// Creates a client bound to an arbitrary transport.
    ///
    /// Only `method: POST` and `url: /graphql` are layered on top of the
    /// transport's own configuration.
    #[must_use]
    pub fn with_custom_request(transport: T) -> Self {
        let graphql_defaults = GraphqlEndpointOptions {
            method: Some(HttpMethod::Post),
            url: Some("/graphql".to_string()),
            ..Default::default()
        };
        tracing::debug!(
            base_url = %transport.endpoint().defaults().base_url,
            "Creating GraphQL client"
        );

        Self {
            transport: transport.defaults(&graphql_defaults),
        }
    }

    /// Returns a new client with `defaults` layered on top of this one's.
    ///
    /// Call-time options still win over anything bound here. Defaults are
    /// not checked for reserved variable names.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::InvalidOption`] if a transport field holds a
    /// value of the wrong shape.
    pub fn defaults(&self, defaults: RequestParameters) -> Result<Self, UsageError> {
        let options = GraphqlEndpointOptions::from_parameters(defaults)?;
        Ok(self.with_options(&options))
    }

    /// Typed counterpart of [`defaults`](Self::defaults).
    #[must_use]
    pub fn with_options(&self, options: &GraphqlEndpointOptions) -> Self {
        Self {
            transport: self.transport.defaults(options),
        }
    }

    /// Returns the bound transport's effective configuration.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        self.transport.endpoint()
    }

    /// Returns the bound transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes a GraphQL query and returns the `data` payload.
    ///
    /// # Arguments
    ///
    /// * `query` - The document text, or [`RequestParameters`] containing `query`
    /// * `options` - Transport fields and variables; ignored when `query` is
    ///   already a parameter map
    ///
    /// # Errors
    ///
    /// See [`graphql`](crate::clients::graphql::graphql) for the error kinds.
    pub async fn graphql(
        &self,
        query: impl Into<QueryInput>,
        options: Option<RequestParameters>,
    ) -> Result<serde_json::Value, GraphqlError> {
        invoke::graphql(&self.transport, query, options).await
    }

    /// Executes a GraphQL query and deserializes the `data` payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::InvalidData`] if `data` does not match `D`,
    /// plus every error [`graphql`](Self::graphql) can return.
    pub async fn graphql_as<D: DeserializeOwned>(
        &self,
        query: impl Into<QueryInput>,
        options: Option<RequestParameters>,
    ) -> Result<D, GraphqlError> {
        let data = self.graphql(query, options).await?;
        serde_json::from_value(data).map_err(GraphqlError::InvalidData)
    }
}
