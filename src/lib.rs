//! # GitHub GraphQL API Client
//!
//! A GraphQL client for the GitHub API, layered over a composable HTTP
//! transport.
//!
//! ## Overview
//!
//! This crate provides:
//! - A [`GraphqlClient`] that sends queries and returns only the `data` payload
//! - A flat options map ([`RequestParameters`]) that mixes transport fields
//!   and GraphQL variables
//! - Immutable, chainable request defaults via [`GraphqlClient::defaults`]
//! - Automatic GraphQL endpoint selection for GitHub Enterprise Server
//! - Structured errors carrying partial data and response headers
//! - Type-safe configuration via [`GraphqlConfig`] and [`GraphqlConfigBuilder`]
//! - A pluggable [`Transport`] trait with a `reqwest`-backed default
//!
//! ## Quick Start
//!
//! ```rust
//! use github_graphql::{AuthToken, GraphqlClient, GraphqlConfig};
//!
//! let config = GraphqlConfig::builder()
//!     .auth_token(AuthToken::new("secret123").unwrap())
//!     .user_agent_prefix("my-app/1.0")
//!     .build()
//!     .unwrap();
//!
//! let client = GraphqlClient::new(Some(&config));
//! assert_eq!(client.endpoint().defaults().url.as_deref(), Some("/graphql"));
//! ```
//!
//! ## Making Queries
//!
//! ```rust,ignore
//! use github_graphql::{GraphqlClient, RequestParameters};
//!
//! let client = GraphqlClient::new(None)
//!     .defaults(RequestParameters::new().header("authorization", "token secret123"))?;
//!
//! let data = client
//!     .graphql(
//!         "query Q($owner: String!) { repositoryOwner(login: $owner) { login } }",
//!         Some(RequestParameters::new().set("owner", "octokit")),
//!     )
//!     .await?;
//! println!("{}", data["repositoryOwner"]["login"]);
//! ```
//!
//! ## Handling Errors
//!
//! ```rust,ignore
//! use github_graphql::GraphqlError;
//!
//! match client.graphql("{ viewer { bio } }", None).await {
//!     Ok(data) => println!("{data}"),
//!     Err(GraphqlError::Response(error)) => {
//!         for detail in &error.errors {
//!             eprintln!("{}", detail.message);
//!         }
//!         if error.is_partial() {
//!             println!("partial data: {}", error.data);
//!         }
//!     }
//!     Err(other) => return Err(other.into()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction and option
//!   misuse is reported before any request is sent
//! - **Thread-safe**: All clients are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Immutable defaults**: Binding defaults always yields a new client

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{AuthToken, BaseUrl, GraphqlConfig, GraphqlConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    Endpoint, EndpointDefaults, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError,
    MaxHttpRetriesExceededError, Transport,
};

// Re-export GraphQL types for convenience
pub use clients::graphql::{
    graphql, GraphqlClient, GraphqlEndpointOptions, GraphqlError, GraphqlErrorDetail,
    GraphqlResponseError, QueryInput, RequestParameters, UsageError,
};
