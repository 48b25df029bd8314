//! Booking handlers

use crate::{
    api::extractors::{IdPath, JsonBody},
    auth::AuthenticatedUser,
    models::{Booking, InsertResult, NewBooking, Rejected},
    state::AppState,
    Result,
};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

/// `POST /bookings`
///
/// A slot already taken for the same date and treatment is a soft failure:
/// `200 { acknowledged: false, message }`.
pub async fn create_booking(
    State(state): State<AppState>,
    JsonBody(booking): JsonBody<NewBooking>,
) -> Result<Response> {
    booking.validate()?;
    let date = booking.appointment_date.clone();

    match state.store.insert_booking(booking).await? {
        Some(stored) => {
            crate::metrics::BOOKINGS_TOTAL
                .with_label_values(&["created"])
                .inc();
            tracing::info!(
                booking_id = %stored.id,
                treatment = %stored.treatment,
                date = %stored.appointment_date,
                slot = %stored.slot,
                "Booking created"
            );
            Ok(Json(InsertResult::new(stored.id)).into_response())
        }
        None => {
            crate::metrics::BOOKINGS_TOTAL
                .with_label_values(&["rejected"])
                .inc();
            let message = format!("You already have a booking on {date}");
            Ok(Json(Rejected::new(message)).into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    pub email: Option<String>,
}

/// `GET /bookings?email=E` (token required)
///
/// Callers may only list their own bookings.
pub async fn list_bookings(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(q): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>> {
    if q.email.as_deref() != Some(claims.email.as_str()) {
        return Err(crate::Error::Forbidden("unauthorized access".to_string()));
    }

    Ok(Json(state.store.bookings_for_email(&claims.email).await?))
}

/// `GET /booking/:id` - the booking, or `null`
pub async fn get_booking(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Option<Booking>>> {
    Ok(Json(state.store.find_booking(id).await?))
}
