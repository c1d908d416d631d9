use crate::routes::types::{HealthCheckResponse, HealthStatus};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use super::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let start = std::time::Instant::now();

    let store_health =
        match tokio::time::timeout(StdDuration::from_secs(5), state.links.ping()).await {
            Ok(Ok(())) => HealthStatus {
                status: "healthy".to_string(),
                latency_ms: Some(start.elapsed().as_millis() as u64),
            },
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Store health check failed");
                HealthStatus {
                    status: "unhealthy".to_string(),
                    latency_ms: None,
                }
            }
            Err(_) => {
                tracing::warn!("Store health check timed out");
                HealthStatus {
                    status: "unhealthy".to_string(),
                    latency_ms: None,
                }
            }
        };

    let overall_status = if store_health.status == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthCheckResponse {
        status: overall_status.to_string(),
        store: store_health,
        timestamp: chrono::Utc::now(),
    })
}
