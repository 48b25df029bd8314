//! User and role handlers

use crate::{
    api::extractors::{IdPath, JsonBody},
    models::{InsertResult, NewUser, Rejected, UpdateResult, User},
    state::AppState,
    Result,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

/// `GET /users/admin/:email`
pub async fn check_admin(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Response> {
    let is_admin = state
        .store
        .find_user_by_email(&email)
        .await?
        .is_some_and(|user| user.is_admin());

    Ok(Json(json!({ "isAdmin": is_admin })).into_response())
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.store.list_users().await?))
}

/// `PUT /users/admin/:id` (admin only)
pub async fn grant_admin(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<UpdateResult>> {
    let result = state.store.grant_admin(id).await?;
    tracing::info!(
        user_id = %id,
        matched = result.matched_count,
        modified = result.modified_count,
        "Admin role granted"
    );
    Ok(Json(result))
}

/// `POST /users`
///
/// Registering an email twice is a soft failure.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(user): JsonBody<NewUser>,
) -> Result<Response> {
    user.validate()?;

    match state.store.insert_user(user).await? {
        Some(stored) => Ok(Json(InsertResult::new(stored.id)).into_response()),
        None => Ok(Json(Rejected::new("User already exists")).into_response()),
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub email: Option<String>,
}

/// `GET /jwt?email=E`
///
/// Issues an access token for a registered email.
pub async fn issue_token(
    State(state): State<AppState>,
    Query(q): Query<TokenQuery>,
) -> Result<Response> {
    let user = match q.email.as_deref() {
        Some(email) => state.store.find_user_by_email(email).await?,
        None => None,
    };

    let Some(user) = user else {
        return Ok((
            StatusCode::FORBIDDEN,
            Json(json!({ "accessToken": "unauthorized access" })),
        )
            .into_response());
    };

    let token = state.tokens.issue(&user.email)?;
    Ok(Json(json!({ "accessToken": token })).into_response())
}
