//! Custom Axum extractors.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::Error;

/// JSON request body.
///
/// Unlike `axum::Json` the content type is not enforced, since some
/// front-ends post JSON without one. Parse failures are reported as `400`
/// with the usual `{ "message": ... }` body.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            Error::Validation(format!("Failed to read request body: {e}")).into_response()
        })?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            Error::Validation(format!("Invalid JSON in request body: {e}")).into_response()
        })
    }
}

/// JSON request body that may be absent.
///
/// An empty body yields `None`; a non-empty body must parse.
pub struct OptionalJsonBody<T>(pub Option<T>);

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            Error::Validation(format!("Failed to read request body: {e}")).into_response()
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJsonBody(None));
        }

        serde_json::from_slice(&bytes)
            .map(|v| OptionalJsonBody(Some(v)))
            .map_err(|e| {
                Error::Validation(format!("Invalid JSON in request body: {e}")).into_response()
            })
    }
}

/// Single path segment parsed as a record id.
pub struct IdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Uuid::parse_str(&raw)
            .map(IdPath)
            .map_err(|_| Error::Validation(format!("Invalid id: {raw}")).into_response())
    }
}
