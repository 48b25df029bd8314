//! Medibook - medical appointment booking API
//!
//! A small HTTP backend for a clinic front-end:
//! - Appointment catalog with per-date slot availability
//! - Bookings that can never double-book a slot
//! - Users, admin roles and bearer-token authentication
//! - Doctor roster management
//! - Card payment intents through Stripe

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod startup;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
