//! Layer factories for middleware

use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
};

/// CORS middleware
///
/// `["*"]` allows any origin, which is what browser front-ends served from
/// another host need. An empty list emits no CORS headers.
pub fn cors(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new();
    }

    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let header_values: Vec<_> = origins
        .iter()
        .filter_map(|origin| axum::http::HeaderValue::from_str(origin).ok())
        .collect();

    // If all configured origins were invalid, fall back to no CORS.
    if header_values.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(header_values))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Compression middleware
pub fn compression() -> CompressionLayer {
    CompressionLayer::new()
}
