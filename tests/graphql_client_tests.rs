//! Integration tests for the GraphQL API client functionality.
//!
//! These tests run the client against a local mock server and verify the
//! request shape, defaults composition, and error handling behavior.

use github_graphql::clients::graphql::{GraphqlClient, GraphqlError, UsageError};
use github_graphql::clients::{GraphqlEndpointOptions, HttpClient, HttpError, Transport};
use github_graphql::{AuthToken, BaseUrl, GraphqlConfig, RequestParameters};
use serde::Deserialize;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ISSUES_QUERY: &str = r"query lastIssues($owner: String!, $repo: String!, $num: Int = 3) {
  repository(owner: $owner, name: $repo) {
    issues(last: $num) {
      edges {
        node {
          title
        }
      }
    }
  }
}";

/// Creates a client pointed at the mock server with the given token.
fn create_test_client(server: &MockServer, token: &str) -> GraphqlClient {
    let config = GraphqlConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .auth_token(AuthToken::new(token).unwrap())
        .build()
        .unwrap();
    GraphqlClient::new(Some(&config))
}

fn issues_data() -> Value {
    json!({
        "repository": {
            "issues": {
                "edges": [
                    {"node": {"title": "Foo"}},
                    {"node": {"title": "Bar"}},
                    {"node": {"title": "Baz"}}
                ]
            }
        }
    })
}

/// Decodes the JSON body of the `index`-th request the server received.
async fn received_body(server: &MockServer, index: usize) -> Value {
    let requests = server.received_requests().await.unwrap();
    serde_json::from_slice(&requests[index].body).unwrap()
}

// ============================================================================
// Request Shape Tests
// ============================================================================

#[tokio::test]
async fn test_query_resolves_to_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "token secret123"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .and(body_json(json!({ "query": "{ viewer { login } }" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"viewer": {"login": "octocat"}}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123");
    let data = client.graphql("{ viewer { login } }", None).await.unwrap();

    assert_eq!(data, json!({"viewer": {"login": "octocat"}}));
}

#[tokio::test]
async fn test_non_transport_options_become_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("x-custom", "yes"))
        .and(body_json(json!({
            "query": ISSUES_QUERY,
            "variables": {"owner": "octokit", "repo": "graphql.js"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": issues_data() })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123");
    let options = RequestParameters::new()
        .header("X-Custom", "yes")
        .set("owner", "octokit")
        .set("repo", "graphql.js");

    let data = client.graphql(ISSUES_QUERY, Some(options)).await.unwrap();

    assert_eq!(data, issues_data());
}

#[tokio::test]
async fn test_object_form_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({
            "query": ISSUES_QUERY,
            "variables": {"owner": "octokit", "repo": "graphql.js"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": issues_data() })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123");
    let params = RequestParameters::new()
        .set("query", ISSUES_QUERY)
        .set("owner", "octokit")
        .set("repo", "graphql.js");

    let data = client.graphql(params, None).await.unwrap();

    assert_eq!(data, issues_data());
}

#[tokio::test]
async fn test_no_variables_key_without_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123");
    client
        .graphql("{ viewer { login } }", Some(RequestParameters::new()))
        .await
        .unwrap();

    let body = received_body(&server, 0).await;
    assert_eq!(body, json!({ "query": "{ viewer { login } }" }));
}

#[tokio::test]
async fn test_graphql_as_deserializes_data() {
    #[derive(Debug, Deserialize)]
    struct Viewer {
        login: String,
    }
    #[derive(Debug, Deserialize)]
    struct Data {
        viewer: Viewer,
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"viewer": {"login": "octocat"}}})),
        )
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123");
    let data: Data = client.graphql_as("{ viewer { login } }", None).await.unwrap();
    assert_eq!(data.viewer.login, "octocat");

    let result: Result<Vec<String>, _> = client.graphql_as("{ viewer { login } }", None).await;
    assert!(matches!(result, Err(GraphqlError::InvalidData(_))));
}

// ============================================================================
// Usage Error Tests
// ============================================================================

#[tokio::test]
async fn test_forbidden_option_names_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123");

    for key in ["query", "method", "url"] {
        let options = RequestParameters::new().set(key, "x");
        let error = client.graphql("{ viewer { login } }", Some(options)).await.unwrap_err();

        assert!(matches!(
            &error,
            GraphqlError::Usage(UsageError::ForbiddenVariable { key: k }) if k == key
        ));
        assert_eq!(
            error.to_string(),
            format!("\"{key}\" cannot be used as variable name")
        );
    }
}

#[tokio::test]
async fn test_malformed_transport_option_is_usage_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123");
    let options = RequestParameters::new().set("headers", json!(["not", "a", "map"]));

    let result = client.graphql("{ viewer { login } }", Some(options)).await;

    assert!(matches!(
        result,
        Err(GraphqlError::Usage(UsageError::InvalidOption { ref key, .. })) if key == "headers"
    ));
}

// ============================================================================
// Response Error Tests
// ============================================================================

#[tokio::test]
async fn test_response_errors_are_reported_with_context() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-github-request-id", "C5E6:259A:1351B40:2E88B87:5F1F9C41")
                .set_body_json(json!({
                    "data": null,
                    "errors": [{
                        "type": "NOT_FOUND",
                        "path": ["repository"],
                        "locations": [{"line": 2, "column": 3}],
                        "message": "Could not resolve to a Repository with the name 'octokit/unknown'."
                    }]
                })),
        )
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123");
    let options = RequestParameters::new()
        .set("owner", "octokit")
        .set("repo", "unknown");

    let error = client.graphql(ISSUES_QUERY, Some(options)).await.unwrap_err();
    let response = error.as_response().unwrap();

    assert_eq!(
        error.to_string(),
        "Request failed due to following response errors:\n - Could not resolve to a Repository with the name 'octokit/unknown'."
    );
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].kind.as_deref(), Some("NOT_FOUND"));
    assert_eq!(
        response.request_id(),
        Some("C5E6:259A:1351B40:2E88B87:5F1F9C41")
    );
    assert_eq!(response.request.query.as_deref(), Some(ISSUES_QUERY));
    assert_eq!(
        response.request.variables.as_ref().unwrap()["repo"],
        json!("unknown")
    );
    assert!(!response.is_partial());
}

#[tokio::test]
async fn test_response_error_keeps_errors_and_headers_as_received() {
    let input_errors = json!([
        {
            "type": "NOT_FOUND",
            "path": ["repository", "issues", 0],
            "locations": [{"line": 2, "column": 3}],
            "extensions": {"code": "undefinedField"},
            "message": "first",
            "nodeId": "MDQ6VXNlcjE="
        },
        {"message": "second", "code": "X1"},
        {"path": ["viewer"]}
    ]);
    let mounted_headers = [
        ("x-github-request-id", "C5E6:259A:1351B40:2E88B87:5F1F9C41"),
        ("x-ratelimit-remaining", "4999"),
        ("x-ratelimit-resource", "graphql"),
    ];

    let server = MockServer::start().await;
    let mut template = ResponseTemplate::new(200).set_body_json(json!({
        "data": {"viewer": {"login": "octocat"}},
        "errors": input_errors.clone()
    }));
    for (name, value) in mounted_headers {
        template = template.insert_header(name, value);
    }
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(template)
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123");
    let error = client.graphql("{ viewer { login } }", None).await.unwrap_err();
    let response = error.as_response().unwrap();

    assert_eq!(serde_json::to_value(&response.errors).unwrap(), input_errors);
    for (name, value) in mounted_headers {
        assert_eq!(response.headers.get(name).map(String::as_str), Some(value));
    }
    assert_eq!(response.data["viewer"]["login"], "octocat");
    assert_eq!(
        response.message,
        "Request failed due to following response errors:\n - first\n - second\n - "
    );
}

#[tokio::test]
async fn test_partial_data_is_kept_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"viewer": {"login": "octocat", "bio": null}},
            "errors": [
                {"message": "first"},
                {"message": "second"}
            ]
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123");
    let error = client
        .graphql("{ viewer { login bio } }", None)
        .await
        .unwrap_err();

    let GraphqlError::Response(response) = error else {
        panic!("expected a response error");
    };
    assert_eq!(
        response.message,
        "Request failed due to following response errors:\n - first\n - second"
    );
    assert!(response.is_partial());
    assert_eq!(response.data["viewer"]["login"], "octocat");
}

#[tokio::test]
async fn test_http_error_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/graphql"
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server, "wrong");
    let error = client.graphql("{ viewer { login } }", None).await.unwrap_err();

    match error {
        GraphqlError::Http(HttpError::Response(response)) => {
            assert_eq!(response.code, 401);
            assert!(response.message.contains("Bad credentials"));
        }
        other => panic!("expected an HTTP response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_retries_are_configured_through_request_option() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_json(json!({"message": "rate limited"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123")
        .defaults(RequestParameters::new().set("request", json!({"tries": 2})))
        .unwrap();

    let data = client.graphql("{ ok }", None).await.unwrap();

    assert_eq!(data, json!({"ok": true}));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

// ============================================================================
// GitHub Enterprise Server Tests
// ============================================================================

#[tokio::test]
async fn test_enterprise_rest_base_url_targets_graphql_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = GraphqlConfig::builder()
        .base_url(BaseUrl::new(format!("{}/api/v3", server.uri())).unwrap())
        .build()
        .unwrap();
    let client = GraphqlClient::new(Some(&config));

    let data = client.graphql("{ ok }", None).await.unwrap();

    assert_eq!(data, json!({"ok": true}));
    assert_eq!(
        client.endpoint().defaults().base_url,
        format!("{}/api/v3", server.uri())
    );
}

#[tokio::test]
async fn test_enterprise_base_url_passed_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphqlClient::new(None);
    let options = RequestParameters::new().set("baseUrl", format!("{}/api/v3/", server.uri()));

    client.graphql("{ ok }", Some(options)).await.unwrap();
}

#[tokio::test]
async fn test_non_rest_base_url_is_used_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphqlClient::new(None)
        .defaults(RequestParameters::new().set("baseUrl", format!("{}/api", server.uri())))
        .unwrap();

    client.graphql("{ ok }", None).await.unwrap();
}

// ============================================================================
// Defaults Tests
// ============================================================================

#[tokio::test]
async fn test_defaults_bind_headers_and_variables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "token bound"))
        .and(body_json(json!({
            "query": ISSUES_QUERY,
            "variables": {"owner": "octokit", "repo": "graphql.js"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": issues_data() })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123")
        .defaults(
            RequestParameters::new()
                .header("authorization", "token bound")
                .set("owner", "octokit"),
        )
        .unwrap();

    let data = client
        .graphql(ISSUES_QUERY, Some(RequestParameters::new().set("repo", "graphql.js")))
        .await
        .unwrap();

    assert_eq!(data, issues_data());
}

#[tokio::test]
async fn test_call_options_override_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "token per-call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server, "secret123")
        .defaults(RequestParameters::new().header("authorization", "token bound"))
        .unwrap();

    client
        .graphql(
            "{ ok }",
            Some(RequestParameters::new().header("authorization", "token per-call")),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_defaults_leave_parent_untouched() {
    let server = MockServer::start().await;
    for token in ["token secret123", "token child"] {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", token))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let parent = create_test_client(&server, "secret123");
    let child = parent
        .defaults(
            RequestParameters::new()
                .header("authorization", "token child")
                .set("owner", "octokit"),
        )
        .unwrap();

    parent.graphql("{ ok }", None).await.unwrap();
    child.graphql("{ ok }", None).await.unwrap();

    assert_eq!(received_body(&server, 0).await, json!({ "query": "{ ok }" }));
    assert_eq!(
        received_body(&server, 1).await,
        json!({ "query": "{ ok }", "variables": {"owner": "octokit"} })
    );
}

#[tokio::test]
async fn test_with_custom_request_uses_transport_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "token custom"))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpClient::new(None).defaults(&GraphqlEndpointOptions {
        base_url: Some(server.uri()),
        headers: Some(
            [
                ("authorization".to_string(), "token custom".to_string()),
                ("x-trace".to_string(), "abc".to_string()),
            ]
            .into(),
        ),
        ..Default::default()
    });
    let client = GraphqlClient::with_custom_request(transport);

    let data = client.graphql("{ ok }", None).await.unwrap();

    assert_eq!(data, json!({"ok": true}));
}

#[test]
fn test_graphql_client_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
}
