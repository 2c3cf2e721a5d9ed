//! Request parameters and the variable/transport partitioner.
//!
//! Callers hand the client one flat map of options. Keys in
//! [`NON_VARIABLE_OPTIONS`] configure the HTTP call; every other key is a
//! GraphQL variable. [`partition`] performs that split and produces the typed
//! [`GraphqlEndpointOptions`] handed to the transport.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::graphql::errors::UsageError;
use crate::clients::http_request::{HttpMethod, MediaType, RequestConfig};

/// Keys that configure the HTTP call rather than naming a GraphQL variable.
pub const NON_VARIABLE_OPTIONS: [&str; 7] = [
    "method",
    "baseUrl",
    "url",
    "headers",
    "request",
    "query",
    "mediaType",
];

/// Transport keys rejected in the separate options argument of a call.
pub const FORBIDDEN_VARIABLE_OPTIONS: [&str; 3] = ["query", "method", "url"];

/// Returns `true` if `key` is a transport field.
#[must_use]
pub fn is_transport_key(key: &str) -> bool {
    NON_VARIABLE_OPTIONS.contains(&key)
}

/// A flat, caller-supplied options map.
///
/// Transport fields and GraphQL variables share one namespace; see
/// [`NON_VARIABLE_OPTIONS`].
///
/// # Example
///
/// ```rust
/// use github_graphql::RequestParameters;
///
/// let params = RequestParameters::new()
///     .header("authorization", "token secret123")
///     .set("owner", "octokit")
///     .set("num", 3);
///
/// assert!(params.contains_key("headers"));
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParameters(Map<String, Value>);

impl RequestParameters {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Adds a single header to the `headers` field.
    ///
    /// A `headers` value that is not an object is replaced.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        let headers = self
            .0
            .entry("headers")
            .or_insert_with(|| Value::Object(Map::new()));
        if !headers.is_object() {
            *headers = Value::Object(Map::new());
        }
        if let Value::Object(headers) = headers {
            headers.insert(
                name.as_ref().to_ascii_lowercase(),
                Value::String(value.into()),
            );
        }
        self
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the parameters, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RequestParameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RequestParameters {
    type Error = UsageError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(UsageError::NotAnObject {
                kind: json_kind(&other),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RequestParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// The first argument of a GraphQL call: query text, or a full options
/// object that carries its own `query`.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryInput {
    /// A GraphQL document.
    Text(String),
    /// Options including `query`; any separate options argument is ignored.
    Parameters(RequestParameters),
}

impl From<&str> for QueryInput {
    fn from(query: &str) -> Self {
        Self::Text(query.to_string())
    }
}

impl From<String> for QueryInput {
    fn from(query: String) -> Self {
        Self::Text(query)
    }
}

impl From<&String> for QueryInput {
    fn from(query: &String) -> Self {
        Self::Text(query.clone())
    }
}

impl From<RequestParameters> for QueryInput {
    fn from(params: RequestParameters) -> Self {
        Self::Parameters(params)
    }
}

/// Partitioned options passed to a [`Transport`](crate::clients::Transport).
///
/// Transport fields are typed; everything else lives in `variables`, which
/// is either `None` or non-empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlEndpointOptions {
    /// HTTP method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// API base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request URL, relative to `base_url` or absolute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Request headers with lower-cased names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Transport behaviour such as retries and timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestConfig>,
    /// The GraphQL document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Format and preview negotiation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    /// GraphQL variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl GraphqlEndpointOptions {
    /// Splits a flat parameter map into transport fields and variables.
    ///
    /// Keys are classified by name only. `null` transport values count as
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::InvalidOption`] if a transport field holds a
    /// value of the wrong shape.
    pub fn from_parameters(params: RequestParameters) -> Result<Self, UsageError> {
        let mut options = Self::default();

        for (key, value) in params.into_inner() {
            if !is_transport_key(&key) {
                options
                    .variables
                    .get_or_insert_with(Map::new)
                    .insert(key, value);
                continue;
            }
            if value.is_null() {
                continue;
            }

            match key.as_str() {
                "method" => {
                    let method = expect_string(&key, value)?;
                    options.method = Some(
                        method
                            .parse::<HttpMethod>()
                            .map_err(|e| invalid(&key, e.to_string()))?,
                    );
                }
                "baseUrl" => options.base_url = Some(expect_string(&key, value)?),
                "url" => options.url = Some(expect_string(&key, value)?),
                "query" => options.query = Some(expect_string(&key, value)?),
                "headers" => options.headers = Some(parse_headers(&key, value)?),
                "request" => options.request = Some(decode(&key, value)?),
                _ => options.media_type = Some(decode(&key, value)?),
            }
        }

        Ok(options)
    }
}

/// Rejects option keys that collide with transport fields.
///
/// Only the separate options argument is checked. In the string call form a
/// `query` key is ambiguous, and any of [`FORBIDDEN_VARIABLE_OPTIONS`] would
/// silently shadow a transport field.
///
/// # Errors
///
/// Returns [`UsageError::ForbiddenVariable`] naming the offending key.
pub fn validate(
    query: &QueryInput,
    options: Option<&RequestParameters>,
) -> Result<(), UsageError> {
    let Some(options) = options else {
        return Ok(());
    };

    if matches!(query, QueryInput::Text(_)) && options.contains_key("query") {
        return Err(UsageError::ForbiddenVariable {
            key: "query".to_string(),
        });
    }

    match options
        .keys()
        .find(|key| FORBIDDEN_VARIABLE_OPTIONS.contains(key))
    {
        Some(key) => Err(UsageError::ForbiddenVariable {
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}

/// Merges the call arguments and partitions the result.
///
/// A string query becomes the `query` field of the options argument. An
/// options-object query is used as-is and `options` is ignored.
///
/// # Errors
///
/// Returns [`UsageError::InvalidOption`] if a transport field holds a value
/// of the wrong shape.
pub fn partition(
    query: QueryInput,
    options: Option<RequestParameters>,
) -> Result<GraphqlEndpointOptions, UsageError> {
    let merged = match query {
        QueryInput::Text(text) => {
            let mut merged = Map::new();
            merged.insert("query".to_string(), Value::String(text));
            merged.extend(options.unwrap_or_default().into_inner());
            RequestParameters(merged)
        }
        QueryInput::Parameters(params) => params,
    };

    GraphqlEndpointOptions::from_parameters(merged)
}

fn invalid(key: &str, reason: impl Into<String>) -> UsageError {
    UsageError::InvalidOption {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn expect_string(key: &str, value: Value) -> Result<String, UsageError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(invalid(
            key,
            format!("expected a string, got {}", json_kind(&other)),
        )),
    }
}

fn parse_headers(key: &str, value: Value) -> Result<HashMap<String, String>, UsageError> {
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(invalid(
                key,
                format!("expected an object, got {}", json_kind(&other)),
            ))
        }
    };

    map.into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(invalid(
                        key,
                        format!("header '{name}' must be a string, got {}", json_kind(&other)),
                    ))
                }
            };
            Ok((name.to_ascii_lowercase(), value))
        })
        .collect()
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, value: Value) -> Result<T, UsageError> {
    serde_json::from_value(value).map_err(|e| invalid(key, e.to_string()))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
