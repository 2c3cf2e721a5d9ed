//! GraphQL API client for GitHub.
//!
//! This module layers GraphQL request shaping and response interpretation on
//! top of any [`Transport`](crate::clients::Transport). It never talks to the
//! network itself.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GraphqlClient`]: A transport bound to request defaults, with `graphql()`
//!   and `defaults()` methods
//! - [`graphql()`]: The free-standing call, usable with any transport
//! - [`RequestParameters`]: The flat options map mixing transport fields and
//!   GraphQL variables
//! - [`GraphqlError`]: Error type for GraphQL API operations
//! - [`GraphqlResponseError`]: A response whose body carried `errors`
//!
//! # Options
//!
//! Call options are one flat map. The keys in [`NON_VARIABLE_OPTIONS`]
//! (`method`, `baseUrl`, `url`, `headers`, `request`, `query`, `mediaType`)
//! configure the HTTP request; every other key becomes a GraphQL variable.
//! Passing `query`, `method` or `url` alongside a query string is a usage
//! error, reported before anything is sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_graphql::{GraphqlClient, RequestParameters};
//!
//! let client = GraphqlClient::new(None)
//!     .defaults(RequestParameters::new().header("authorization", "token secret123"))?;
//!
//! let data = client
//!     .graphql(
//!         "query Q($owner: String!, $repo: String!) { repository(owner: $owner, name: $repo) { issues(last: 3) { edges { node { title } } } } }",
//!         Some(
//!             RequestParameters::new()
//!                 .set("owner", "octokit")
//!                 .set("repo", "graphql.js"),
//!         ),
//!     )
//!     .await?;
//! ```
//!
//! # GitHub Enterprise Server
//!
//! A base URL ending in `/api/v3` is a REST endpoint. Requests against it are
//! sent to the sibling `/api/graphql` instead; the bound base URL is left as is.
//!
//! # Errors in the Response
//!
//! A response with a non-empty `errors` array fails with
//! [`GraphqlError::Response`], which keeps any partial `data` alongside the
//! error list and the response headers.

mod client;
mod errors;
mod invoke;
mod options;
mod response;

pub use client::GraphqlClient;
pub use errors::{GraphqlError, GraphqlResponseError, UsageError};
pub use invoke::{enterprise_graphql_url, graphql};
pub use options::{
    is_transport_key, partition, validate, GraphqlEndpointOptions, QueryInput, RequestParameters,
    FORBIDDEN_VARIABLE_OPTIONS, NON_VARIABLE_OPTIONS,
};
pub use response::{GraphqlErrorDetail, GraphqlResponseEnvelope, PathSegment, SourceLocation};
