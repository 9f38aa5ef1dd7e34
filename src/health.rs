//! Liveness server
//!
//! Keeps an external host's keep-alive probe happy; shares no state with the poll loop.

use axum::{routing::get, Json, Router};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;

pub const LIVENESS_TEXT: &str = "Level alert bot running!";

/// Build the liveness router
pub fn router() -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
}

/// Serve the liveness router on all interfaces until the process exits
pub async fn serve(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "Starting liveness server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router()).await?;

    Ok(())
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "component": "level-alert",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn metrics() -> String {
    use prometheus::{Encoder, TextEncoder};
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_router() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router()).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_root_returns_static_text() {
        let base = spawn_router().await;
        let response = reqwest::get(format!("{}/", base)).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), LIVENESS_TEXT);
    }

    #[tokio::test]
    async fn test_health_reports_component() {
        let base = spawn_router().await;
        let body: serde_json::Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["component"], "level-alert");
    }
}
