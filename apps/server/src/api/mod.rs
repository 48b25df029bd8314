//! API layer - routes, handlers, and middleware

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_request_body_size;
    let cors_origins = state.config.server.cors_origins.clone();

    // Layers run outside-in, so the token check precedes the admin lookup.
    let token_router = routes::clinic::token_routes().route_layer(
        axum::middleware::from_fn_with_state(state.clone(), crate::auth::require_token),
    );
    let admin_router = routes::clinic::admin_routes()
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_admin,
        ))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_token,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .route("/favicon.ico", get(favicon))
        .merge(routes::metrics::metrics_routes())
        .merge(routes::clinic::public_routes())
        .merge(token_router)
        .merge(admin_router)
        .with_state(state)
        // Add middleware (applied in reverse order)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        .layer(DefaultBodyLimit::max(max_body_size))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "medibook"
    }))
}

async fn root(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "server": "Medibook booking API",
            "version": env!("CARGO_PKG_VERSION"),
            "paymentCurrency": state.config.payment.currency,
            "status": "running"
        })),
    )
}

async fn favicon() -> impl IntoResponse {
    // 204 keeps browser favicon probes out of the 404 logs
    StatusCode::NO_CONTENT
}
