pub mod fixtures;

use anyhow::Context as _;
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use medibook::{
    api::create_router,
    db::{ClinicStore, InMemoryClinicStore},
    models::NewUser,
    services::{PaymentGateway, PaymentIntent},
    AppState, Config,
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt as _;

pub use fixtures::*;

pub const TEST_JWT_SECRET: &str = "test-secret";

/// Payment gateway that records requested amounts instead of calling out.
#[derive(Default)]
pub struct FakePaymentGateway {
    pub calls: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl PaymentGateway for FakePaymentGateway {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> medibook::Result<PaymentIntent> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((amount, currency.to_string()));
        let id = format!("pi_test_{}", calls.len());
        Ok(PaymentIntent {
            client_secret: format!("{id}_secret"),
            id,
            amount,
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<InMemoryClinicStore>,
    pub payments: Arc<FakePaymentGateway>,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Self::new_with_config(|_| {}).await
    }

    pub async fn new_with_config(configure: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        let mut config = Config::default();
        config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
        configure(&mut config);

        let store = Arc::new(InMemoryClinicStore::new());
        store
            .seed_appointment_options(catalog())
            .await
            .context("seed catalog")?;

        let payments = Arc::new(FakePaymentGateway::default());
        let state = AppState::from_parts(config, store.clone(), payments.clone());
        let router = create_router(state.clone());

        Ok(Self {
            router,
            state,
            store,
            payments,
        })
    }

    /// Register a user and return a token for them.
    pub async fn sign_in(&self, email: &str) -> anyhow::Result<String> {
        self.store
            .insert_user(NewUser {
                name: None,
                email: email.to_string(),
            })
            .await?;
        Ok(self.state.tokens.issue(email)?)
    }

    /// Register an admin user and return a token for them.
    pub async fn sign_in_admin(&self, email: &str) -> anyhow::Result<String> {
        let user = self
            .store
            .insert_user(NewUser {
                name: Some("Admin".to_string()),
                email: email.to_string(),
            })
            .await?
            .context("admin email already registered")?;
        self.store.grant_admin(user.id).await?;
        Ok(self.state.tokens.issue(email)?)
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, path_and_query, body, &[])
            .await
    }

    pub async fn request_with_token(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
        token: &str,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let authz = format!("Bearer {token}");
        self.request_with_extra_headers(
            method,
            path_and_query,
            body,
            &[("authorization", authz.as_str())],
        )
        .await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header("content-type", "application/json")
            .body(match body {
                Some(bytes) => Body::from(bytes),
                None => Body::empty(),
            })
            .context("build request")?;

        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }
}

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "unexpected status for {context}");
}

pub fn to_json_body(value: &serde_json::Value) -> anyhow::Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

pub fn parse_json(body: &Bytes) -> anyhow::Result<serde_json::Value> {
    serde_json::from_slice(body).context("parse response body as JSON")
}
