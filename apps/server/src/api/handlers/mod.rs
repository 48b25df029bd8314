//! Request handlers for API endpoints
//!
//! Handlers coordinate between routes and the store, handling:
//! - Request extraction and validation
//! - Store / payment gateway invocation
//! - Response formatting

pub mod appointments;
pub mod bookings;
pub mod doctors;
pub mod metrics;
pub mod payments;
pub mod users;
