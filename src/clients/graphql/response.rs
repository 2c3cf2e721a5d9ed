//! The GraphQL response envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The decoded response body: `{ data, errors? }`.
///
/// `data` may be populated even when `errors` is non-empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponseEnvelope {
    /// The query result, `null` when nothing resolved.
    #[serde(default)]
    pub data: Value,
    /// GraphQL-level errors in the order the server reported them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphqlErrorDetail>>,
}

/// A single GraphQL error.
///
/// # Example
///
/// ```rust
/// use github_graphql::GraphqlErrorDetail;
///
/// let detail: GraphqlErrorDetail = serde_json::from_value(serde_json::json!({
///     "message": "Field 'bioHtml' doesn't exist on type 'User'",
///     "locations": [{"line": 3, "column": 5}]
/// })).unwrap();
///
/// assert_eq!(detail.locations.unwrap()[0].line, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlErrorDetail {
    /// Human-readable description. Empty when the server sent none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Response path to the failing field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    /// Error classification, e.g. `NOT_FOUND`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Server-specific extra information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
    /// Positions in the query document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<SourceLocation>>,
    /// Any other fields, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One step of an error path: a field name or a list index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A field name or alias.
    Key(String),
    /// A list index.
    Index(u64),
}

/// A line/column position in the query document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}
