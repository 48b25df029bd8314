//! Error types for the booking API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Payment processor error: {0}")]
    Payment(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::Payment(_) => StatusCode::BAD_GATEWAY,
            Error::Database(_)
            | Error::Migration(_)
            | Error::Token(_)
            | Error::Internal(_)
            | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Error::Database(_)
            | Error::Migration(_)
            | Error::Token(_)
            | Error::Internal(_)
            | Error::Other(_) => {
                tracing::error!("Internal error: {}", self);
                "Internal server error".to_string()
            }
            Error::Payment(_) => {
                tracing::warn!(error = %self, "Payment processor request failed");
                self.to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
