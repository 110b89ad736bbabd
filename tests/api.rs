use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{self, header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt; // for `collect`
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

use wordlink::{
    api, db::sqlite::SqliteLinkStore, service::LinkService, state::AppState,
    types::LinkResponse,
};

async fn app() -> Router {
    app_serving("public").await
}

async fn app_serving(public_dir: impl Into<PathBuf>) -> Router {
    let store = SqliteLinkStore::connect("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory store");
    let state = AppState::new(LinkService::new(Arc::new(store)), public_dir);
    api::router(state, Duration::from_secs(30))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn body_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(http::Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(http::Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, body: Value) -> LinkResponse {
    let response = send(app, post_json("/api/links", body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    serde_json::from_value(body_json(response).await).unwrap()
}

#[tokio::test]
async fn healthz_returns_ok() {
    let app = app().await;
    let response = send(&app, get("/healthz")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true, "version": "1.0"}));
}

#[tokio::test]
async fn create_then_redirect_counts_the_click() {
    let app = app().await;

    let response = send(&app, post_json("/api/links", json!({"url": "https://example.com"}))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let code = body["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    assert_eq!(body["clicks"], 0);
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["originalUrl"], "https://example.com");
    assert!(body["lastClickedAt"].is_null());
    assert!(body["createdAt"].is_string());

    let response = send(&app, get(&format!("/{code}"))).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com"
    );

    let response = send(&app, get(&format!("/api/links/{code}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let link: LinkResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(link.clicks, 1);
    assert!(link.last_clicked_at.is_some());
}

#[tokio::test]
async fn custom_code_keeps_case_and_conflicts_on_reuse() {
    let app = app().await;

    let link = create(&app, json!({"url": "https://google.com", "code": "Google"})).await;
    assert_eq!(link.code, "Google");

    let response = send(
        &app,
        post_json("/api/links", json!({"url": "https://bing.com", "code": "Google"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await, json!({"error": "Code already in use"}));

    let response = send(&app, get("/api/links/Google")).await;
    let kept: LinkResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(kept.original_url, "https://google.com");
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let app = app().await;

    let response = send(
        &app,
        post_json("/api/links", json!({"url": "not a url", "code": "ab"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let issues = body["error"].as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0]["field"], "url");
    assert_eq!(issues[1]["field"], "code");

    let response = send(&app, post_json("/api/links", json!({"code": "abcdef"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());

    let response = send(
        &app,
        Request::builder()
            .method(http::Method::POST)
            .uri("/api/links")
            .body(Body::from(r#"{"url": "https://example.com"}"#))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = app().await;
    create(&app, json!({"url": "https://one.example", "code": "first1"})).await;
    create(&app, json!({"url": "https://two.example", "code": "second"})).await;

    let response = send(&app, get("/api/links")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let links: Vec<LinkResponse> = serde_json::from_value(body_json(response).await).unwrap();
    let codes: Vec<&str> = links.iter().map(|link| link.code.as_str()).collect();
    assert_eq!(codes, ["second", "first1"]);
}

#[tokio::test]
async fn delete_removes_the_link() {
    let app = app().await;
    let link = create(&app, json!({"url": "https://example.com"})).await;

    let response = send(&app, delete(&format!("/api/links/{}", link.code))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, get(&format!("/api/links/{}", link.code))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Link not found"}));
}

#[tokio::test]
async fn delete_unknown_code_is_not_found() {
    let app = app().await;
    let response = send(&app, delete("/api/links/nothere")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn redirect_miss_serves_html_page() {
    let app = app().await;
    let response = send(&app, get("/nothere")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn dashboard_and_stats_pages_are_served() {
    let app = app().await;

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/code/whatever")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/static/js/app.js")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn url_with_newline_is_rejected_and_never_redirects() {
    let app = app().await;

    let response = send(
        &app,
        post_json(
            "/api/links",
            json!({"url": "https://exa\nmple.com/", "code": "nlcode"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"][0]["field"], "url");

    let response = send(&app, get("/nlcode")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::LOCATION).is_none());

    let response = send(&app, get("/api/links/nlcode")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn null_code_is_rejected() {
    let app = app().await;

    let response = send(
        &app,
        post_json("/api/links", json!({"url": "https://example.com", "code": null})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());

    let response = send(&app, get("/api/links")).await;
    let links: Vec<LinkResponse> = serde_json::from_value(body_json(response).await).unwrap();
    assert!(links.is_empty());
}

#[tokio::test]
async fn redirect_miss_page_comes_from_public_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("404.html"),
        "<html><body>custom missing page</body></html>",
    )
    .unwrap();
    let app = app_serving(dir.path()).await;

    let response = send(&app, get("/nothere")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("custom missing page"));
}

#[tokio::test]
async fn redirect_miss_without_404_file_still_serves_html() {
    let dir = TempDir::new().unwrap();
    let app = app_serving(dir.path()).await;

    let response = send(&app, get("/nothere")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("404"));
}

#[tokio::test]
async fn dashboard_script_offers_copy_to_clipboard() {
    let app = app().await;

    let response = send(&app, get("/static/js/app.js")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let script = body_text(response).await;
    assert!(script.contains("copy-btn"));
    assert!(script.contains("navigator.clipboard.writeText"));
}
