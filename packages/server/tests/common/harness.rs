//! Test harness for driving the router in-process.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so no socket is bound for
//! the API itself. `spawn_site` serves stand-in webpages on a local port for
//! tests that exercise the real HTTP fetcher.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use compliance_core::kernel::{MockAI, MockPageFetcher, ServerDeps, TestDependencies};
use compliance_core::server::build_app;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Router wired to in-memory doubles
pub struct TestHarness {
    pub deps: TestDependencies,
    app: Router,
}

impl TestHarness {
    pub fn new(page_fetcher: MockPageFetcher, ai: MockAI) -> Self {
        init_tracing();
        let deps = TestDependencies::new(page_fetcher, ai);
        let app = build_app(deps.server_deps());
        Self { deps, app }
    }

    /// POST a JSON value and return status plus decoded body
    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(uri, &body.to_string(), Some("application/json"))
            .await
    }

    /// POST an arbitrary body
    pub async fn post_raw(
        &self,
        uri: &str,
        body: &str,
        content_type: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(Body::from(body.to_string())).unwrap();

        send(self.app.clone(), request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(self.app.clone(), request).await
    }
}

/// Send a request through any router; non-JSON bodies decode as `Value::String`
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

/// Router over arbitrary dependencies (e.g. the real fetcher)
pub fn app_with(deps: ServerDeps) -> Router {
    init_tracing();
    build_app(deps)
}

/// Serve `site` on an ephemeral local port; returns its base URL
pub async fn spawn_site(site: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, site).await.unwrap();
    });
    format!("http://{}", addr)
}

// Run tests with: RUST_LOG=debug cargo test -- --nocapture
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
