//! One GraphQL request/response cycle.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::clients::graphql::errors::{GraphqlError, GraphqlResponseError};
use crate::clients::graphql::options::{partition, validate, QueryInput, RequestParameters};
use crate::clients::graphql::response::GraphqlResponseEnvelope;
use crate::clients::graphql::GraphqlEndpointOptions;
use crate::clients::{HttpError, HttpResponse, Transport};

fn rest_api_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/api/v3/?$").expect("valid suffix regex"))
}

/// Maps a REST base URL ending in `/api/v3` to its GraphQL sibling.
///
/// Returns `None` when `base_url` has no such suffix.
///
/// # Example
///
/// ```rust
/// use github_graphql::clients::graphql::enterprise_graphql_url;
///
/// assert_eq!(
///     enterprise_graphql_url("https://github.acme-inc.com/api/v3/").as_deref(),
///     Some("https://github.acme-inc.com/api/graphql")
/// );
/// assert_eq!(enterprise_graphql_url("https://github.acme-inc.com/api"), None);
/// ```
#[must_use]
pub fn enterprise_graphql_url(base_url: &str) -> Option<String> {
    let re = rest_api_suffix();
    re.is_match(base_url)
        .then(|| re.replace(base_url, "/api/graphql").into_owned())
}

/// Sends one GraphQL request through `transport` and returns `data`.
///
/// `query` is either the document text, with `options` carrying transport
/// fields and variables, or a full [`RequestParameters`] containing `query`
/// (in which case `options` is ignored).
///
/// # Errors
///
/// - [`GraphqlError::Usage`] if `options` uses a reserved name or a
///   transport field has the wrong shape. Nothing is sent.
/// - [`GraphqlError::Http`] if the transport fails.
/// - [`GraphqlError::Response`] if the envelope carries a non-empty
///   `errors` array.
pub async fn graphql<T: Transport>(
    transport: &T,
    query: impl Into<QueryInput>,
    options: Option<RequestParameters>,
) -> Result<Value, GraphqlError> {
    let query = query.into();
    validate(&query, options.as_ref())?;

    let mut request_options = partition(query, options)?;

    let base_url = request_options
        .base_url
        .clone()
        .unwrap_or_else(|| transport.endpoint().defaults().base_url.clone());
    if let Some(url) = enterprise_graphql_url(&base_url) {
        tracing::debug!(%base_url, %url, "Using GraphQL endpoint for REST base URL");
        request_options.url = Some(url);
    }

    let response = transport.request(request_options.clone()).await?;
    interpret(request_options, response)
}

/// Turns a transport response into the `data` payload or a
/// [`GraphqlResponseError`].
fn interpret(request: GraphqlEndpointOptions, response: HttpResponse) -> Result<Value, GraphqlError> {
    let HttpResponse { headers, body, .. } = response;
    let GraphqlResponseEnvelope { data, errors } =
        serde_json::from_value(body).map_err(HttpError::from)?;

    match errors {
        Some(errors) if !errors.is_empty() => {
            tracing::warn!(
                errors = errors.len(),
                request_id = headers.get("x-github-request-id").map(String::as_str),
                "GraphQL response contained errors"
            );
            Err(GraphqlResponseError::new(request, headers, errors, data).into())
        }
        _ => Ok(data),
    }
}
