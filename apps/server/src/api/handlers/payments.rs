//! Payment handlers

use crate::{
    api::extractors::JsonBody, services::amount_in_minor_units, state::AppState, Result,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// The booking being paid for; only `price` is used.
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub client_secret: String,
}

/// `POST /create-payment-intent`
pub async fn create_payment_intent(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PaymentRequest>,
) -> Result<Json<PaymentResponse>> {
    let amount = amount_in_minor_units(req.price)?;

    let intent = state
        .payments
        .create_payment_intent(amount, &state.config.payment.currency)
        .await
        .inspect_err(|_| {
            crate::metrics::PAYMENT_INTENTS_TOTAL
                .with_label_values(&["failed"])
                .inc();
        })?;

    crate::metrics::PAYMENT_INTENTS_TOTAL
        .with_label_values(&["created"])
        .inc();

    Ok(Json(PaymentResponse {
        client_secret: intent.client_secret,
    }))
}
