// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::{Html, Redirect},
    routing::get as route_get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use metascope_server::{
    fetch::{PageFetcher, DEFAULT_USER_AGENT},
    pipeline::HostPolicy,
    routes,
    state::AppState,
};

/// Fetch timeout used by the test app. The fixture's slow route sleeps past it.
pub const TEST_FETCH_TIMEOUT: Duration = Duration::from_secs(1);

pub const OPTIMIZED_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Metascope Fixture: A Well Optimized Landing Page</title>
  <meta name="description" content="This fixture page carries every tag the analyzer looks for, with lengths that land inside the recommended ranges for search results.">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="robots" content="index, follow">
  <meta property="og:title" content="Metascope Fixture Landing Page">
  <meta property="og:description" content="A fixture page with complete Open Graph tags.">
  <meta property="og:image" content="https://cdn.example.com/cover.png">
  <meta name="twitter:card" content="summary_large_image">
  <link rel="canonical" href="https://example.com/landing">
  <script type="application/ld+json">{"@type": "WebPage"}</script>
</head>
<body><p>Short body text for reading time.</p></body>
</html>"#;

pub const BARE_PAGE: &str = "<html><body><p>nothing here</p></body></html>";

/// Build the application router with private targets allowed, so the
/// loopback fixture server can be analyzed.
pub fn create_test_app() -> Router {
    let state = AppState {
        fetcher: PageFetcher::new(TEST_FETCH_TIMEOUT, DEFAULT_USER_AGENT)
            .expect("Failed to build test fetcher"),
        host_policy: HostPolicy::AllowPrivate,
    };
    routes::router(state)
}

/// Same router with the default public-only host policy.
pub fn create_public_only_app() -> Router {
    let state = AppState {
        fetcher: PageFetcher::new(TEST_FETCH_TIMEOUT, DEFAULT_USER_AGENT)
            .expect("Failed to build test fetcher"),
        host_policy: HostPolicy::PublicOnly,
    };
    routes::router(state)
}

/// Start a local site to analyze. Returns its base URL, e.g. `http://127.0.0.1:41234`.
pub async fn spawn_fixture_site() -> String {
    let site = Router::new()
        .route("/", route_get(|| async { Html(OPTIMIZED_PAGE) }))
        .route("/bare", route_get(|| async { Html(BARE_PAGE) }))
        .route("/moved", route_get(|| async { Redirect::permanent("/") }))
        .route(
            "/missing",
            route_get(|| async { (StatusCode::NOT_FOUND, Html("<title>Not Found</title>")) }),
        )
        .route(
            "/slow",
            route_get(|| async {
                tokio::time::sleep(TEST_FETCH_TIMEOUT * 3).await;
                Html(OPTIMIZED_PAGE)
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fixture listener");
    let addr: SocketAddr = listener.local_addr().expect("fixture has no local addr");

    tokio::spawn(async move {
        axum::serve(listener, site).await.ok();
    });

    format!("http://{addr}")
}

// ============================================================================
// Request helpers
// ============================================================================

pub async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    (status, body_json(res.into_body()).await)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    (status, body_json(res.into_body()).await)
}

/// POST and return the raw response, for tests that inspect headers.
pub async fn post_json_raw(app: Router, uri: &str, body: Value) -> axum::response::Response {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(req).await.unwrap()
}
