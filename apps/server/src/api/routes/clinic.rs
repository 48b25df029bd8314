//! Booking API routes
//!
//! Routes are split by the gate they sit behind. The three routers are
//! merged in [`crate::api::create_router`]; a path shared between routers
//! must use the same path string in each.

use crate::api::handlers::{appointments, bookings, doctors, payments, users};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

/// Routes open to any caller.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/appointmentOptions",
            get(appointments::list_appointment_options),
        )
        .route("/appointmentSpecialty", get(appointments::list_specialties))
        .route("/addPrice", put(appointments::add_price))
        .route("/bookings", post(bookings::create_booking))
        .route("/booking/:id", get(bookings::get_booking))
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/users/admin/:user", get(users::check_admin))
        .route("/jwt", get(users::issue_token))
        .route("/doctors", post(doctors::create_doctor))
        .route(
            "/create-payment-intent",
            post(payments::create_payment_intent),
        )
}

/// Routes requiring a valid bearer token.
pub fn token_routes() -> Router<AppState> {
    Router::new().route("/bookings", get(bookings::list_bookings))
}

/// Routes requiring a bearer token whose user is an admin.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users/admin/:user", put(users::grant_admin))
        .route("/doctors", get(doctors::list_doctors))
        .route("/doctors/:id", delete(doctors::delete_doctor))
}
