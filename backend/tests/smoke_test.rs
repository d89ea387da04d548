use std::sync::Arc;

use academy_backend::graph::Row;
use academy_backend::test_util::{
    create_test_state, sign_token, test_jwks, FakeCategories, FakeEnrolments, FakeGraph, TEST_KID,
};
use academy_backend::{app, AppState, JwksClient};
use academy_common::{Category, EnrolmentsResponse};
use bytes::Bytes;
use http::{Method, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog() -> Vec<Category> {
    vec![
        Category::new("paths", "Learning Paths").with_children(vec![
            Category::new("developer", "Developer"),
            Category::new("admin", "Administrator"),
        ]),
        Category::new("certification", "Certification"),
    ]
}

fn sitemap_rows() -> Vec<Row> {
    vec![
        Row::from_pairs([
            ("kind", json!("course")),
            ("slug", json!("neo4j-fundamentals")),
            ("status", json!("active")),
        ]),
        Row::from_pairs([
            ("kind", json!("course")),
            ("slug", json!("secret-course")),
            ("status", json!("draft")),
        ]),
        Row::from_pairs([
            ("kind", json!("category")),
            ("slug", json!("paths")),
            ("status", Value::Null),
        ]),
    ]
}

fn state_with(graph: FakeGraph, categories: FakeCategories) -> Arc<AppState> {
    Arc::new(create_test_state(
        Arc::new(graph),
        Arc::new(categories),
        Arc::new(FakeEnrolments::ok(EnrolmentsResponse::default())),
    ))
}

fn default_state() -> Arc<AppState> {
    state_with(FakeGraph::with_rows(sitemap_rows()), FakeCategories::new(catalog()))
}

async fn mock_issuer() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/.well-known/openid-configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jwks_uri": format!("{}/.well-known/jwks.json", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/.well-known/jwks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_jwks(TEST_KID)))
        .mount(&server)
        .await;

    server
}

/// Two in-progress courses, listed oldest first.
fn in_progress() -> EnrolmentsResponse {
    serde_json::from_value(json!({
        "enrolments": {
            "enrolled": [
                {"slug": "older", "title": "Older", "status": "active", "enrolled": true,
                 "lastSeenAt": 1_700_000_000_000_i64, "completedPercentage": 10},
                {"slug": "newer", "title": "Newer", "status": "active", "enrolled": true,
                 "lastSeenAt": 1_710_000_000_000_i64, "completedPercentage": 60}
            ]
        }
    }))
    .unwrap()
}

/// State that validates tokens against `issuer`, plus the graph it records into.
async fn signed_in_state(issuer: &MockServer) -> (Arc<AppState>, Arc<FakeGraph>) {
    let graph = Arc::new(FakeGraph::with_rows(vec![]));
    let mut state = create_test_state(
        graph.clone(),
        Arc::new(FakeCategories::new(catalog())),
        Arc::new(FakeEnrolments::ok(in_progress())),
    );
    state.auth = Some(JwksClient::new(&issuer.uri()).await.unwrap());
    (Arc::new(state), graph)
}

async fn send_request(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Bytes>,
) -> (StatusCode, Option<String>, String) {
    send_request_as(app, method, uri, body, None).await
}

async fn send_request_as(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Bytes>,
    token: Option<&str>,
) -> (StatusCode, Option<String>, String) {
    let mut req_builder = http::Request::builder().method(method).uri(uri);

    if body.is_some() {
        req_builder = req_builder.header("Content-Type", "application/json");
    }
    if let Some(token) = token {
        req_builder = req_builder.header("Authorization", format!("Bearer {}", token));
    }

    let req = req_builder
        .body(match body {
            Some(b) => axum::body::Body::from(b),
            None => axum::body::Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(http::header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_home_anonymous() {
    let app = app(default_state());

    let (status, content_type, body) = send_request(&app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let page: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(page["current"], json!([]));
    assert_eq!(page["activePath"], "developer");
    assert_eq!(page["classes"], "home transparent-nav preload");
    assert_eq!(page["paths"]["children"][0]["slug"], "admin");
    assert_eq!(page["paths"]["children"][1]["slug"], "developer");
    assert_eq!(page["certification"]["slug"], "certification");
    assert_eq!(page["beginners"], Value::Null);
}

#[tokio::test]
async fn test_home_catalog_failure_renders_error_page() {
    let app = app(state_with(FakeGraph::with_rows(vec![]), FakeCategories::failing()));

    let (status, content_type, body) = send_request(&app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("500"));
    assert!(!body.contains("catalog unavailable"));
}

#[tokio::test]
async fn test_sitemap() {
    let app = app(default_state());

    let (status, content_type, body) = send_request(&app, Method::GET, "/sitemap.txt", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert_eq!(
        body,
        "https://academy.test/courses/neo4j-fundamentals\nhttps://academy.test/categories/paths"
    );
}

#[tokio::test]
async fn test_sitemap_graph_failure() {
    let app = app(state_with(FakeGraph::failing(), FakeCategories::new(catalog())));

    let (status, _, _) = send_request(&app, Method::GET, "/sitemap.txt", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_feedback_created() {
    let app = app(default_state());
    let body = Bytes::from(r#"{"helpful":false,"reason":"hard-to-follow","additional":"Too fast"}"#);

    let (status, _, body) = send_request(
        &app,
        Method::POST,
        "/courses/neo4j-fundamentals/1-intro/feedback",
        Some(body),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_str(&body).unwrap();
    assert!(created["id"].as_str().is_some());
}

#[tokio::test]
async fn test_feedback_invalid_body() {
    let app = app(default_state());

    let (status, _, _) = send_request(
        &app,
        Method::POST,
        "/courses/neo4j-fundamentals/feedback",
        Some(Bytes::from("not json")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_feedback_requires_post() {
    let app = app(default_state());

    let (status, _, _) = send_request(&app, Method::GET, "/courses/neo4j-fundamentals/feedback", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_feedback_options_default() {
    let app = app(default_state());

    let (status, _, body) = send_request(&app, Method::GET, "/feedback/options", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"autoHideMs": null}));
}

#[tokio::test]
async fn test_feedback_options_configured() {
    let mut state = create_test_state(
        Arc::new(FakeGraph::with_rows(vec![])),
        Arc::new(FakeCategories::new(catalog())),
        Arc::new(FakeEnrolments::ok(EnrolmentsResponse::default())),
    );
    state.config.feedback.auto_hide_secs = Some(3);
    let app = app(Arc::new(state));

    let (status, _, body) = send_request(&app, Method::GET, "/feedback/options", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"autoHideMs": 3000}));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = app(default_state());

    let (status, content_type, body) = send_request(&app, Method::GET, "/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("/nope"));
}

#[tokio::test]
async fn test_health() {
    let app = app(default_state());

    let (status, _, body) = send_request(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn test_ready_reports_graph_outage() {
    let app = app(state_with(FakeGraph::failing(), FakeCategories::new(catalog())));

    let (status, _, body) = send_request(&app, Method::GET, "/health/ready", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "unavailable");
}

#[tokio::test]
async fn test_sandboxes_require_auth() {
    let app = app(default_state());

    let (status, _, _) = send_request(&app, Method::GET, "/sandboxes", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_home_signed_in_lists_current_courses() {
    let issuer = mock_issuer().await;
    let (state, _) = signed_in_state(&issuer).await;
    let app = app(state);
    let token = sign_token(&issuer.uri(), TEST_KID, "auth0|alice");

    let (status, _, body) = send_request_as(&app, Method::GET, "/", None, Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let page: Value = serde_json::from_str(&body).unwrap();
    let current: Vec<&str> = page["current"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(current, vec!["newer", "older"]);
    assert_eq!(page["current"][0]["completedPercentage"], 60);
}

#[tokio::test]
async fn test_home_with_bad_token_renders_anonymously() {
    let issuer = mock_issuer().await;
    let (state, _) = signed_in_state(&issuer).await;
    let app = app(state);

    let (status, _, body) =
        send_request_as(&app, Method::GET, "/", None, Some("not-a-jwt")).await;

    assert_eq!(status, StatusCode::OK);
    let page: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(page["current"], json!([]));
}

#[tokio::test]
async fn test_feedback_links_signed_in_user() {
    let issuer = mock_issuer().await;
    let (state, graph) = signed_in_state(&issuer).await;
    let app = app(state);
    let token = sign_token(&issuer.uri(), TEST_KID, "auth0|alice");

    let (status, _, _) = send_request_as(
        &app,
        Method::POST,
        "/courses/neo4j-fundamentals/feedback",
        Some(Bytes::from(r#"{"helpful":true}"#)),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let calls = graph.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1["sub"], "auth0|alice");
    assert_eq!(calls[0].1["page"], "/courses/neo4j-fundamentals");
}

#[tokio::test]
async fn test_sandboxes_signed_in_without_api_is_unavailable() {
    let issuer = mock_issuer().await;
    let (state, _) = signed_in_state(&issuer).await;
    let app = app(state);
    let token = sign_token(&issuer.uri(), TEST_KID, "auth0|alice");

    let (status, _, _) = send_request_as(&app, Method::GET, "/sandboxes", None, Some(&token)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
