//! Health check web server.
//!
//! Hosting platforms probe `/` and `/health` to decide whether the process is
//! alive. Runs on WEB_PORT (default 8080) as its own task and never touches the
//! store.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use prometheus::{Encoder, TextEncoder};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::utils::now_timestamp;

/// Builds the router with all health endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
}

/// Start the health web server and serve until the listener fails.
pub async fn start_web_server(port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    log::info!("Starting web server on http://{}", addr);
    log::info!("  /         - Status page (HTML)");
    log::info!("  /health   - Health check");
    log::info!("  /metrics  - Prometheus metrics");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router()).await?;

    Ok(())
}

/// GET /: static status page.
async fn root_handler() -> Html<String> {
    Html(render_status_page(&now_timestamp()))
}

/// GET /health: liveness probe.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /metrics: Prometheus text exposition.
async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            buffer,
        )
            .into_response(),
        Err(e) => {
            log::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
                .into_response()
        }
    }
}

fn render_status_page(updated_at: &str) -> String {
    indoc::formatdoc! {r#"
        <!DOCTYPE html>
        <html lang="ar" dir="rtl">
        <head>
        <meta charset="UTF-8">
        <title>Telegram Bot Manager</title>
        <style>
        body {{ font-family: Arial, sans-serif; text-align: center; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 50px; }}
        .container {{ background: rgba(255,255,255,0.1); padding: 30px; border-radius: 20px; backdrop-filter: blur(10px); }}
        </style>
        </head>
        <body>
        <div class="container">
        <h1>🌸 بوت إدارة القنوات والمجموعات 💖</h1>
        <p>🎀 The bot is running ✨</p>
        <p>⏰ Last update: {updated_at}</p>
        </div>
        </body>
        </html>
    "#,
        updated_at = updated_at,
    }
}
