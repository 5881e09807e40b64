//! Integration tests for the real HTTP fetcher.
//!
//! A small axum site on 127.0.0.1 stands in for the pages being checked.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::Router;
use serde_json::json;

use crate::common::{app_with, send, spawn_site};
use compliance_core::kernel::{BasePageFetcher, HttpPageFetcher, MockAI, ServerDeps};

fn stand_in_site() -> Router {
    Router::new()
        .route(
            "/",
            get(|| async { Html("<html><body><h1>Welcome</h1><p>Buy  now!</p></body></html>") }),
        )
        .route(
            "/policy",
            get(|| async { Html("<html><body><p>Do not pressure buyers.</p></body></html>") }),
        )
        .route(
            "/agent",
            get(|headers: HeaderMap| async move {
                let agent = headers
                    .get(header::USER_AGENT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Html(format!("<p>{}</p>", agent))
            }),
        )
        .route("/moved", get(|| async { Redirect::temporary("/policy") }))
        .route(
            "/gone",
            get(|| async { (StatusCode::NOT_FOUND, "no such page") }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Html("<p>too late</p>")
            }),
        )
}

fn fetcher() -> HttpPageFetcher {
    HttpPageFetcher::new(Duration::from_millis(500)).unwrap()
}

#[tokio::test]
async fn fetches_page_body() {
    let base = spawn_site(stand_in_site()).await;

    let body = fetcher().fetch(&format!("{}/", base)).await.unwrap();

    assert!(body.contains("<h1>Welcome</h1>"));
}

#[tokio::test]
async fn sends_browser_user_agent() {
    let base = spawn_site(stand_in_site()).await;

    let body = fetcher().fetch(&format!("{}/agent", base)).await.unwrap();

    assert!(body.contains("Mozilla/5.0"), "body: {}", body);
    assert!(body.contains("Chrome/"));
}

#[tokio::test]
async fn follows_redirects() {
    let base = spawn_site(stand_in_site()).await;

    let body = fetcher().fetch(&format!("{}/moved", base)).await.unwrap();

    assert!(body.contains("Do not pressure buyers."));
}

#[tokio::test]
async fn non_2xx_is_an_error() {
    let base = spawn_site(stand_in_site()).await;

    let err = fetcher().fetch(&format!("{}/gone", base)).await.unwrap_err();

    assert!(format!("{:#}", err).contains("404"), "error: {:#}", err);
}

#[tokio::test]
async fn slow_page_times_out() {
    let base = spawn_site(stand_in_site()).await;

    let started = std::time::Instant::now();
    let result = fetcher().fetch(&format!("{}/slow", base)).await;

    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn unreachable_host_is_an_error() {
    // Port 9 (discard) is closed on loopback in test environments
    assert!(fetcher().fetch("http://127.0.0.1:9/").await.is_err());
}

// =============================================================================
// Through the router
// =============================================================================

fn compliance_request(url: String, policy_url: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/check-compliance")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "url": url, "policy_url": policy_url }).to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn end_to_end_with_real_fetcher() {
    let base = spawn_site(stand_in_site()).await;
    let ai = MockAI::new();
    let app = app_with(ServerDeps::new(Arc::new(fetcher()), Arc::new(ai.clone())));

    let (status, body) = send(
        app,
        compliance_request(format!("{}/", base), format!("{}/policy", base)),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["url_analyzed"], format!("{}/", base));
    assert_eq!(body["checked_against"], format!("{}/policy", base));

    let calls = ai.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0]
        .user_prompt
        .contains("COMPLIANCE POLICY:\nDo not pressure buyers."));
    assert!(calls[0].user_prompt.contains("WEBPAGE CONTENT:\nWelcome Buy now!"));
}

#[tokio::test]
async fn real_404_returns_400_without_model_call() {
    let base = spawn_site(stand_in_site()).await;
    let ai = MockAI::new();
    let app = app_with(ServerDeps::new(Arc::new(fetcher()), Arc::new(ai.clone())));

    let (status, body) = send(
        app,
        compliance_request(format!("{}/gone", base), format!("{}/policy", base)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("404"));
    assert_eq!(ai.call_count(), 0);
}

#[tokio::test]
async fn real_timeout_returns_400_without_model_call() {
    let base = spawn_site(stand_in_site()).await;
    let ai = MockAI::new();
    let app = app_with(ServerDeps::new(Arc::new(fetcher()), Arc::new(ai.clone())));

    let (status, _) = send(
        app,
        compliance_request(format!("{}/slow", base), format!("{}/policy", base)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(ai.call_count(), 0);
}
