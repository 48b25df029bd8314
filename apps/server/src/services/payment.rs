//! Payment intents with the card processor (Stripe REST API)

use crate::{config::PaymentConfig, Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    #[serde(default)]
    pub amount: i64,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a card payment intent for `amount` minor units of `currency`.
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent>;
}

/// Convert a decimal price into minor units (cents).
pub fn amount_in_minor_units(price: f64) -> Result<i64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::Validation(
            "price must be a positive number".to_string(),
        ));
    }
    let amount = (price * 100.0).round();
    if amount < 1.0 {
        return Err(Error::Validation(
            "price is below the smallest chargeable amount".to_string(),
        ));
    }
    if amount > i64::MAX as f64 {
        return Err(Error::Validation("price is too large".to_string()));
    }
    Ok(amount as i64)
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

pub struct StripeGateway {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(config: &PaymentConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent> {
        if self.secret_key.is_empty() {
            return Err(Error::Payment(
                "payment processor secret key is not configured".to_string(),
            ));
        }

        let url = format!("{}/v1/payment_intents", self.api_base);
        let amount = amount.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let res = self
            .http
            .post(url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::Payment(format!("request failed: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            let detail = res
                .json::<StripeErrorBody>()
                .await
                .ok()
                .map(|body| {
                    format!(
                        "{}: {}",
                        body.error.kind.unwrap_or_else(|| "error".to_string()),
                        body.error.message.unwrap_or_default()
                    )
                })
                .unwrap_or_else(|| "no error body".to_string());
            return Err(Error::Payment(format!("HTTP {status} ({detail})")));
        }

        let intent: PaymentIntent = res
            .json()
            .await
            .map_err(|e| Error::Payment(format!("invalid response body: {e}")))?;

        tracing::info!(payment_intent = %intent.id, amount = intent.amount, "Payment intent created");
        Ok(intent)
    }
}
