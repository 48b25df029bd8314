//! Metrics collection for the booking API
//!
//! This module defines the Prometheus metrics exposed on `/metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, register_int_gauge_vec,
    HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, route template, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "medibook_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "medibook_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "medibook_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    // Booking Metrics

    /// Booking attempts by outcome (created / rejected)
    pub static ref BOOKINGS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "medibook_bookings_total",
        "Booking attempts by outcome",
        &["outcome"]
    )
    .expect("Failed to register BOOKINGS_TOTAL");

    /// Payment intents by status (created / failed)
    pub static ref PAYMENT_INTENTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "medibook_payment_intents_total",
        "Payment intent requests by status",
        &["status"]
    )
    .expect("Failed to register PAYMENT_INTENTS_TOTAL");

    // Database Metrics

    /// Active database connections
    pub static ref DB_CONNECTIONS_ACTIVE: IntGauge = register_int_gauge!(
        "medibook_db_connections_active",
        "Number of active database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_ACTIVE");

    /// Idle database connections
    pub static ref DB_CONNECTIONS_IDLE: IntGauge = register_int_gauge!(
        "medibook_db_connections_idle",
        "Number of idle database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_IDLE");
}

/// Refresh the connection pool gauges.
pub fn update_db_connection_metrics(pool: &sqlx::PgPool) {
    let size = pool.size();
    let idle = pool.num_idle() as u32;

    DB_CONNECTIONS_ACTIVE.set(size.saturating_sub(idle) as i64);
    DB_CONNECTIONS_IDLE.set(idle as i64);
}
