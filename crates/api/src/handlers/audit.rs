//! Handlers for room-by-room audits: recording where an asset was seen and
//! sweeping unresolved assets into Missing.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use stocktake_core::error::CoreError;
use stocktake_db::repositories::{AssetRepo, RoomRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /assets/{id}/location`.
#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    pub room_id: String,
}

/// Request body for `POST /assets/mark-missing`.
#[derive(Debug, Deserialize)]
pub struct MarkMissingRequest {
    pub asset_ids: Vec<String>,
    /// Days an asset may stay Misplaced before an audit marks it Missing.
    pub misplaced_threshold_days: Option<i64>,
}

/// POST /api/v1/assets/{id}/location
///
/// Record that the asset was observed in a room. Re-derives the status and
/// appends one scan event. Unauthenticated scanners are recorded under the
/// SYSTEM actor.
pub async fn update_location(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateLocationRequest>,
) -> AppResult<impl IntoResponse> {
    if !RoomRepo::exists(&state.pool, &input.room_id).await? {
        return Err(AppError::Core(CoreError::not_found(
            "Room",
            &input.room_id,
        )));
    }

    let asset = AssetRepo::update_location(&state.pool, &id, &input.room_id, &auth.actor())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Asset", &id)))?;

    Ok(Json(DataResponse { data: asset }))
}

/// POST /api/v1/assets/mark-missing
///
/// Audit sweep over the selected assets. The response reports how many
/// transitioned, how many were skipped, and a message per skipped asset;
/// partial failure is a normal outcome, not an error status.
pub async fn mark_missing(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<MarkMissingRequest>,
) -> AppResult<impl IntoResponse> {
    if input.asset_ids.is_empty() {
        return Err(AppError::BadRequest("asset_ids must not be empty".into()));
    }

    let result = AssetRepo::mark_missing_batch(
        &state.pool,
        &input.asset_ids,
        &auth.actor(),
        input.misplaced_threshold_days,
    )
    .await?;

    tracing::info!(
        processed = result.processed,
        failed = result.failed,
        user_id = auth.user_id,
        "Mark-missing audit sweep finished",
    );

    Ok(Json(DataResponse { data: result }))
}
