//! The transport seam.
//!
//! The GraphQL layer never builds HTTP requests itself. It shapes a
//! [`GraphqlEndpointOptions`] and hands it to a [`Transport`], which owns the
//! network call, retries, authentication, and timeouts.

use async_trait::async_trait;

use crate::clients::endpoint::Endpoint;
use crate::clients::errors::HttpError;
use crate::clients::graphql::GraphqlEndpointOptions;
use crate::clients::http_response::HttpResponse;

/// A request capability with composable defaults.
///
/// Implementors are cheap to clone and immutable: [`defaults`](Self::defaults)
/// returns a new transport and leaves `self` untouched.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use github_graphql::clients::{Endpoint, GraphqlEndpointOptions, HttpError, HttpResponse, Transport};
///
/// #[derive(Clone)]
/// struct Recorded {
///     endpoint: Endpoint,
/// }
///
/// #[async_trait]
/// impl Transport for Recorded {
///     fn endpoint(&self) -> &Endpoint {
///         &self.endpoint
///     }
///
///     fn with_endpoint(&self, endpoint: Endpoint) -> Self {
///         Self { endpoint }
///     }
///
///     async fn request(&self, options: GraphqlEndpointOptions) -> Result<HttpResponse, HttpError> {
///         let request = self.endpoint.parse(&options)?;
///         // ... send `request` somewhere ...
///         # unimplemented!()
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Clone + Send + Sync {
    /// Returns the effective configuration.
    fn endpoint(&self) -> &Endpoint;

    /// Returns a copy of this transport bound to `endpoint`.
    #[must_use]
    fn with_endpoint(&self, endpoint: Endpoint) -> Self;

    /// Returns a copy of this transport with `options` layered on top of its
    /// configuration.
    #[must_use]
    fn defaults(&self, options: &GraphqlEndpointOptions) -> Self {
        self.with_endpoint(self.endpoint().with_defaults(options))
    }

    /// Sends one request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for network failures, non-2xx responses,
    /// exhausted retries, invalid requests, and undecodable bodies.
    async fn request(&self, options: GraphqlEndpointOptions) -> Result<HttpResponse, HttpError>;
}
