//! Authentication / authorization primitives.
//!
//! Clients obtain an HS256 access token from `GET /jwt` and send it as
//! `Authorization: Bearer <token>`. Two gates are layered onto routes:
//! [`require_token`] validates the token and attaches its [`Claims`], and
//! [`require_admin`] additionally requires the token's user to hold the
//! admin role.

use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{config::AuthConfig, state::AppState};

/// Token claims. The email is the caller's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub enum AuthError {
    MissingToken,
    InvalidToken(String),
    NotAdmin,
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken => StatusCode::UNAUTHORIZED,
            Self::InvalidToken(_) | Self::NotAdmin => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::MissingToken => {
                let mut response = (status, "unauthorized access").into_response();
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    header::HeaderValue::from_static("Bearer"),
                );
                response
            }
            Self::InvalidToken(reason) => {
                tracing::debug!(reason = %reason, "Rejected bearer token");
                (status, Json(json!({ "message": "forbidden access" }))).into_response()
            }
            Self::NotAdmin => {
                (status, Json(json!({ "message": "forbidden access" }))).into_response()
            }
        }
    }
}

/// Issues and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(config.token_ttl_hours),
        }
    }

    pub fn issue(&self, email: &str) -> crate::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Validate the `Authorization` header.
    ///
    /// A missing header is distinguished from a present but unusable one.
    pub fn authenticate_headers(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let Some(authz) = headers.get(header::AUTHORIZATION) else {
            return Err(AuthError::MissingToken);
        };

        let authz = authz.to_str().map_err(|_| {
            AuthError::InvalidToken("Authorization header is not valid UTF-8".to_string())
        })?;

        let token = authz
            .strip_prefix("Bearer ")
            .or_else(|| authz.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AuthError::InvalidToken("Authorization header must be 'Bearer <token>'".to_string())
            })?;

        self.verify(token)
    }
}

/// Extractor for the claims attached by [`require_token`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AuthError::MissingToken.into_response())
    }
}

/// Middleware rejecting requests without a valid bearer token.
pub async fn require_token(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    match state.tokens.authenticate_headers(req.headers()) {
        Ok(claims) => {
            req.extensions_mut().insert::<Claims>(claims);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

/// Middleware rejecting callers whose user record is not an admin.
///
/// Must run after [`require_token`].
pub async fn require_admin(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let Some(email) = req.extensions().get::<Claims>().map(|c| c.email.clone()) else {
        return AuthError::MissingToken.into_response();
    };

    match state.store.find_user_by_email(&email).await {
        Ok(Some(user)) if user.is_admin() => next.run(req).await,
        Ok(_) => {
            tracing::info!(email = %email, "Admin route denied");
            AuthError::NotAdmin.into_response()
        }
        Err(err) => err.into_response(),
    }
}
