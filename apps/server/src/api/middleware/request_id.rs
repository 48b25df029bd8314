//! Request ID middleware

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Span;
use uuid::Uuid;

/// Creates the root span for each HTTP request and:
/// - generates a server request ID
/// - logs request completion with status and latency
/// - returns the ID in `X-Request-Id`, echoing a differing client ID in
///   `X-Correlation-Id`
#[tracing::instrument(
    name = "http_request",
    skip_all,
    fields(
        http.method = %req.method(),
        http.route = %req.uri().path(),
        http.response.status_code = tracing::field::Empty,
        request_id = tracing::field::Empty,
    )
)]
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let current_span = Span::current();
    let start = Instant::now();

    let client_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let server_id = Uuid::new_v4().to_string();
    current_span.record("request_id", &server_id);

    let path = req.uri().path().to_string();
    let method = req.method().clone();

    tracing::debug!(method = %method, path = %path, "Incoming request");

    let mut response = next.run(req).await;

    let status = response.status();
    current_span.record("http.response.status_code", status.as_u16());

    tracing::info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = start.elapsed().as_millis(),
        request_id = %server_id,
        "Request completed"
    );

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&server_id) {
        headers.insert("x-request-id", value);
    }

    if let Some(client_id) = client_id {
        if client_id != server_id {
            if let Ok(value) = HeaderValue::from_str(&client_id) {
                headers.insert("x-correlation-id", value);
            }
        }
    }

    response
}
