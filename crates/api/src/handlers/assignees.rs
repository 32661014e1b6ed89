//! Handlers for the assignee directory.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use stocktake_core::error::CoreError;
use stocktake_core::types::DbId;
use stocktake_db::models::assignee::{CreateAssignee, UpdateAssignee};
use stocktake_db::repositories::AssigneeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /assignees/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub full_name: String,
}

/// GET /api/v1/assignees
pub async fn list_assignees(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let assignees = AssigneeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: assignees }))
}

/// POST /api/v1/assignees
///
/// Create an assignee. A duplicate email surfaces as a conflict.
pub async fn create_assignee(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAssignee>,
) -> AppResult<impl IntoResponse> {
    if input.fname.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "First name must not be empty".into(),
        )));
    }

    let assignee = AssigneeRepo::create(&state.pool, &input).await?;

    tracing::info!(assignee_id = assignee.id, "Assignee created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: assignee })))
}

/// GET /api/v1/assignees/{id}
pub async fn get_assignee(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assignee = AssigneeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Assignee", id.to_string())))?;

    Ok(Json(DataResponse { data: assignee }))
}

/// PUT /api/v1/assignees/{id}
pub async fn update_assignee(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssignee>,
) -> AppResult<impl IntoResponse> {
    let assignee = AssigneeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Assignee", id.to_string())))?;

    Ok(Json(DataResponse { data: assignee }))
}

/// POST /api/v1/assignees/resolve
///
/// Resolve a free-text name to an assignee, creating one with a placeholder
/// email when no case-insensitive match exists. Idempotent.
pub async fn resolve_assignee(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ResolveRequest>,
) -> AppResult<impl IntoResponse> {
    let assignee = AssigneeRepo::get_or_create_by_name(&state.pool, &input.full_name)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation("full_name must not be blank".into()))
        })?;

    Ok(Json(DataResponse { data: assignee }))
}
