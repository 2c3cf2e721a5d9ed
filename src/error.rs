//! Error types for client configuration.
//!
//! This module contains the error type returned when building a
//! [`GraphqlConfig`](crate::GraphqlConfig) or one of its validated newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use github_graphql::{AuthToken, ConfigError};
//!
//! let result = AuthToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAuthToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Authentication token cannot be empty.
    #[error("Authentication token cannot be empty. Please provide a valid GitHub token.")]
    EmptyAuthToken,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute URL with scheme (e.g., 'https://api.github.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// User agent prefix is empty.
    #[error("User agent prefix cannot be empty. Omit it or provide a product token (e.g., 'my-app/1.0').")]
    EmptyUserAgentPrefix,
}
