//! End-to-end tests for the repository listing and the star proxy endpoints.

use axum::{body::Body, http::Request};
use serde_json::{json, Value};
use showcase_github::{Account, GitHubClient, GitHubConfig};
use showcase_server::api::{create_router, AppState};
use showcase_server::config::SessionConfig;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_app(api_url: &str) -> axum::Router {
    let github = GitHubClient::new(&GitHubConfig::with_api_url(api_url)).unwrap();
    let state = AppState::new(github, SessionConfig::default()).with_account(Account::new("alice"));
    create_router(state)
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = cookie {
        builder = builder.header("cookie", format!("gh_token={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_star(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/github/star")
        .header("content-type", "application/json");
    if let Some(token) = cookie {
        builder = builder.header("cookie", format!("gh_token={token}"));
    }
    builder
        .body(Body::from(json!({ "owner": "alice", "repo": "one" }).to_string()))
        .unwrap()
}

// ==================== Health ====================

#[tokio::test]
async fn test_health_echoes_request_id() {
    let app = create_test_app("http://127.0.0.1:1");

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["x-request-id"], "req-42");
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

// ==================== Starred list ====================

#[tokio::test]
async fn test_starred_list_without_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/starred"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_test_app(&server.uri());
    let response = app
        .oneshot(get("/api/github/starred-list", None))
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    assert_eq!(json_body(response).await, json!({ "authed": false, "repos": [] }));
}

#[tokio::test]
async fn test_starred_list_passes_repos_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/starred"))
        .and(header("authorization", "Bearer tok"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "one", "full_name": "alice/one", "private": false },
            { "name": "two" }
        ])))
        .mount(&server)
        .await;

    let app = create_test_app(&server.uri());
    let response = app
        .oneshot(get("/api/github/starred-list", Some("tok")))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = json_body(response).await;
    assert_eq!(body["authed"], true);
    assert_eq!(body["repos"].as_array().unwrap().len(), 2);
    assert_eq!(body["repos"][0]["full_name"], "alice/one");
}

#[tokio::test]
async fn test_starred_list_mirrors_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/starred"))
        .respond_with(ResponseTemplate::new(403).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let app = create_test_app(&server.uri());
    let response = app
        .oneshot(get("/api/github/starred-list", Some("tok")))
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
    assert_eq!(json_body(response).await, json!({ "authed": false, "repos": [] }));
}

#[tokio::test]
async fn test_starred_list_network_failure() {
    let app = create_test_app("http://127.0.0.1:1");
    let response = app
        .oneshot(get("/api/github/starred-list", Some("tok")))
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body = json_body(response).await;
    assert_eq!(body["authed"], false);
    assert_eq!(body["repos"], json!([]));
    assert!(body["error"].is_string());
}

// ==================== Starred status ====================

#[tokio::test]
async fn test_starred_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/starred/alice/one"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/starred/alice/two"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let app = create_test_app(&server.uri());

    let response = app
        .clone()
        .oneshot(get("/api/github/starred?owner=alice&repo=one", Some("tok")))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await, json!({ "authed": true, "starred": true }));

    let response = app
        .oneshot(get("/api/github/starred?owner=alice&repo=two", Some("tok")))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await, json!({ "authed": true, "starred": false }));
}

#[tokio::test]
async fn test_starred_status_without_cookie() {
    let app = create_test_app("http://127.0.0.1:1");
    let response = app
        .oneshot(get("/api/github/starred?owner=alice&repo=one", None))
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    assert_eq!(json_body(response).await, json!({ "authed": false, "starred": false }));
}

// ==================== Star ====================

#[tokio::test]
async fn test_star_echoes_new_count() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/user/starred/alice/one"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/alice/one"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "one",
            "stargazers_count": 42
        })))
        .mount(&server)
        .await;

    let app = create_test_app(&server.uri());
    let response = app.oneshot(post_star(Some("tok"))).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await, json!({ "ok": true, "count": 42 }));
}

#[tokio::test]
async fn test_star_omits_count_when_readback_fails() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/user/starred/alice/one"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/alice/one"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let app = create_test_app(&server.uri());
    let response = app.oneshot(post_star(Some("tok"))).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await, json!({ "ok": true }));
}

#[tokio::test]
async fn test_star_without_cookie() {
    let app = create_test_app("http://127.0.0.1:1");
    let response = app.oneshot(post_star(None)).await.unwrap();

    assert_eq!(response.status(), 401);
    assert_eq!(json_body(response).await, json!({ "ok": false }));
}

#[tokio::test]
async fn test_star_rejected_credential() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/user/starred/alice/one"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let app = create_test_app(&server.uri());
    let response = app.oneshot(post_star(Some("expired"))).await.unwrap();

    assert_eq!(response.status(), 401);
    assert_eq!(json_body(response).await, json!({ "ok": false }));
}

#[tokio::test]
async fn test_star_network_failure() {
    let app = create_test_app("http://127.0.0.1:1");
    let response = app.oneshot(post_star(Some("tok"))).await.unwrap();

    assert_eq!(response.status(), 500);
    let body = json_body(response).await;
    assert_eq!(body["ok"], false);
    assert!(body["error"].is_string());
}

// ==================== Repository listing ====================

#[tokio::test]
async fn test_list_repos() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 7,
            "name": "one",
            "html_url": "https://github.com/alice/one",
            "description": "First",
            "stargazers_count": 3,
            "language": "Rust",
            "forks_count": 1,
            "open_issues_count": 0,
            "owner": { "login": "alice" },
            "languages_url": format!("{}/repos/alice/one/languages", server.uri()),
            "created_at": "2023-01-01T00:00:00Z",
            "pushed_at": "2024-03-04T00:00:00Z",
            "updated_at": "2024-03-04T00:00:00Z"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/alice/one/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Rust": 1000 })))
        .mount(&server)
        .await;

    let app = create_test_app(&server.uri());
    let response = app.oneshot(get("/api/repos", None)).await.unwrap();

    assert_eq!(response.status(), 200);
    let repos: Vec<showcase_types::Repository> =
        serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].owner, "alice");
    assert_eq!(repos[0].languages.get("Rust"), Some(&1000));
}

#[tokio::test]
async fn test_list_repos_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = create_test_app(&server.uri());
    let response = app.oneshot(get("/api/repos", None)).await.unwrap();

    assert_eq!(response.status(), 502);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_list_repos_without_account() {
    let github = GitHubClient::new(&GitHubConfig::with_api_url("http://127.0.0.1:1")).unwrap();
    let state = AppState::new(github, SessionConfig::default()).with_account(Account::default());
    let app = create_router(state);

    let response = app.oneshot(get("/api/repos", None)).await.unwrap();

    assert_eq!(response.status(), 500);
    assert!(json_body(response).await["error"].is_string());
}
