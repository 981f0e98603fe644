//! Health server router tests
//!
//! Run with: cargo test -p chancore --test web_server_test

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chancore::core::web_server::router;
use tower::ServiceExt;

async fn get(path: &str) -> (StatusCode, String, Option<String>) {
    let response = router()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap(), content_type)
}

#[tokio::test]
async fn test_health_returns_ok() {
    let (status, body, _) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_root_returns_html_status_page() {
    let (status, body, content_type) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap_or_default().starts_with("text/html"));
    assert!(body.contains("<html"));
    assert!(body.contains("Last update:"));
}

#[tokio::test]
async fn test_metrics_exposes_store_counters() {
    chancore::core::metrics::init_metrics();

    let (status, body, _) = get("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("chanbot_store_mutations_total"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (status, _, _) = get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
