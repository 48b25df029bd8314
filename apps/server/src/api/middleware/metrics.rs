//! Metrics middleware - tracks HTTP request metrics

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Route template for metric labels (`/booking/:id`), never the raw path.
fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Decrements the in-flight gauge when the request ends, including when the
/// client goes away and the response future is dropped.
struct InFlight {
    method: String,
    route: String,
}

impl InFlight {
    fn enter(method: &str, route: &str) -> Self {
        crate::metrics::HTTP_REQUESTS_IN_FLIGHT
            .with_label_values(&[method, route])
            .inc();
        Self {
            method: method.to_string(),
            route: route.to_string(),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        crate::metrics::HTTP_REQUESTS_IN_FLIGHT
            .with_label_values(&[&self.method, &self.route])
            .dec();
    }
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = route_label(&req);

    let _in_flight = InFlight::enter(&method, &route);

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();

    crate::metrics::HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &route, &status])
        .inc();

    crate::metrics::HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &route])
        .observe(start.elapsed().as_secs_f64());

    response
}
