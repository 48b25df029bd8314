//! Metrics endpoint handler
//!
//! Exposes Prometheus-compatible metrics for monitoring

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};

use crate::state::AppState;

/// Handler for /metrics endpoint
/// Returns Prometheus text format metrics
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(pool) = &state.db_pool {
        crate::metrics::update_db_connection_metrics(pool);
    }

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("Content-Type", "text/plain")],
                b"Failed to encode metrics".to_vec(),
            )
        }
    }
}
