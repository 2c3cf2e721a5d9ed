//! Configuration types for the GraphQL client.
//!
//! This module provides the configuration used to build a top-level
//! [`GraphqlClient`](crate::GraphqlClient) over the default HTTP transport.
//!
//! # Overview
//!
//! - [`GraphqlConfig`]: The configuration struct
//! - [`GraphqlConfigBuilder`]: A builder for constructing [`GraphqlConfig`] instances
//! - [`BaseUrl`]: A validated API base URL
//! - [`AuthToken`]: A validated access token with masked debug output
//!
//! Configuration only seeds the first layer of request defaults. Anything
//! set here can still be overridden with
//! [`GraphqlClient::defaults`](crate::GraphqlClient::defaults) or per call.
//!
//! # Example
//!
//! ```rust
//! use github_graphql::{AuthToken, BaseUrl, GraphqlConfig};
//!
//! let config = GraphqlConfig::builder()
//!     .base_url(BaseUrl::new("https://github.acme-inc.com/api/v3").unwrap())
//!     .auth_token(AuthToken::new("secret123").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AuthToken, BaseUrl};

use crate::error::ConfigError;

/// Configuration for the default GraphQL client.
///
/// # Thread Safety
///
/// `GraphqlConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, Default)]
pub struct GraphqlConfig {
    base_url: BaseUrl,
    auth_token: Option<AuthToken>,
    user_agent_prefix: Option<String>,
    previews: Vec<String>,
}

impl GraphqlConfig {
    /// Creates a new builder for constructing a `GraphqlConfig`.
    #[must_use]
    pub fn builder() -> GraphqlConfigBuilder {
        GraphqlConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn auth_token(&self) -> Option<&AuthToken> {
        self.auth_token.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the API previews enabled by default.
    #[must_use]
    pub fn previews(&self) -> &[String] {
        &self.previews
    }
}

// Verify GraphqlConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlConfig>();
};

/// Builder for constructing [`GraphqlConfig`] instances.
///
/// # Defaults
///
/// - `base_url`: `https://api.github.com`
/// - `auth_token`: `None`
/// - `user_agent_prefix`: `None`
/// - `previews`: empty
#[derive(Debug, Default)]
pub struct GraphqlConfigBuilder {
    base_url: Option<BaseUrl>,
    auth_token: Option<AuthToken>,
    user_agent_prefix: Option<String>,
    previews: Vec<String>,
}

impl GraphqlConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the access token sent in the `authorization` header.
    #[must_use]
    pub fn auth_token(mut self, token: AuthToken) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Enables an API preview for every request.
    #[must_use]
    pub fn preview(mut self, name: impl Into<String>) -> Self {
        self.previews.push(name.into());
        self
    }

    /// Builds the [`GraphqlConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUserAgentPrefix`] if a blank user agent
    /// prefix was set.
    pub fn build(self) -> Result<GraphqlConfig, ConfigError> {
        if self
            .user_agent_prefix
            .as_deref()
            .is_some_and(|prefix| prefix.trim().is_empty())
        {
            return Err(ConfigError::EmptyUserAgentPrefix);
        }

        Ok(GraphqlConfig {
            base_url: self.base_url.unwrap_or_default(),
            auth_token: self.auth_token,
            user_agent_prefix: self.user_agent_prefix,
            previews: self.previews,
        })
    }
}
