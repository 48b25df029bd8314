//! Doctor roster handlers

use crate::{
    api::extractors::{IdPath, JsonBody},
    models::{DeleteResult, Doctor, InsertResult, NewDoctor},
    state::AppState,
    Result,
};
use axum::{extract::State, Json};

/// `POST /doctors`
pub async fn create_doctor(
    State(state): State<AppState>,
    JsonBody(doctor): JsonBody<NewDoctor>,
) -> Result<Json<InsertResult>> {
    doctor.validate()?;
    let stored = state.store.insert_doctor(doctor).await?;
    tracing::info!(doctor_id = %stored.id, "Doctor added");
    Ok(Json(InsertResult::new(stored.id)))
}

/// `GET /doctors` (admin only)
pub async fn list_doctors(State(state): State<AppState>) -> Result<Json<Vec<Doctor>>> {
    Ok(Json(state.store.list_doctors().await?))
}

/// `DELETE /doctors/:id` (admin only)
pub async fn delete_doctor(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<DeleteResult>> {
    let result = state.store.delete_doctor(id).await?;
    tracing::info!(doctor_id = %id, deleted = result.deleted_count, "Doctor deleted");
    Ok(Json(result))
}
