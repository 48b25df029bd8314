//! Appointment catalog handlers

use crate::{
    api::extractors::OptionalJsonBody,
    models::{AppointmentOption, Specialty, UpdateResult},
    services::remaining_slots,
    state::AppState,
    Result,
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

/// `GET /appointmentOptions?date=D`
///
/// Every option with the slots already booked on `D` removed. Without a
/// date the full slot lists are returned.
pub async fn list_appointment_options(
    State(state): State<AppState>,
    Query(q): Query<AvailabilityQuery>,
) -> Result<Json<Vec<AppointmentOption>>> {
    let options = state.store.list_appointment_options().await?;

    let Some(date) = q.date.filter(|d| !d.is_empty()) else {
        return Ok(Json(options));
    };

    let booked = state.store.bookings_on_date(&date).await?;
    tracing::debug!(date = %date, booked = booked.len(), "Computing remaining slots");

    Ok(Json(remaining_slots(options, &booked)))
}

/// `GET /appointmentSpecialty`
pub async fn list_specialties(State(state): State<AppState>) -> Result<Json<Vec<Specialty>>> {
    Ok(Json(state.store.list_specialties().await?))
}

#[derive(Debug, Deserialize)]
pub struct PriceUpdate {
    pub price: f64,
}

/// `PUT /addPrice`
///
/// Sets one price on every option. The body `{ "price": n }` is optional and
/// falls back to `catalog.default_price`.
pub async fn add_price(
    State(state): State<AppState>,
    OptionalJsonBody(body): OptionalJsonBody<PriceUpdate>,
) -> Result<Json<UpdateResult>> {
    let price = body
        .map(|b| b.price)
        .unwrap_or(state.config.catalog.default_price);

    if !price.is_finite() || price < 0.0 {
        return Err(crate::Error::Validation(
            "price must be a non-negative number".to_string(),
        ));
    }

    let result = state.store.set_price_on_all_options(price).await?;
    tracing::info!(
        price,
        matched = result.matched_count,
        modified = result.modified_count,
        "Updated appointment prices"
    );

    Ok(Json(result))
}
