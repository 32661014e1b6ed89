//! Handlers for resolving discrepancies: lost/found lifecycle actions and
//! their bulk variants.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use stocktake_core::error::CoreError;
use stocktake_db::repositories::AssetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /assets/{id}/found`.
#[derive(Debug, Deserialize)]
pub struct MarkFoundRequest {
    /// When true the asset returns to its assigned room; when false its
    /// home is reassigned to wherever it was last seen.
    #[serde(default = "default_return_to_room")]
    pub return_to_room: bool,
}

fn default_return_to_room() -> bool {
    true
}

/// Request body for `POST /assets/bulk-found`.
#[derive(Debug, Deserialize)]
pub struct BulkFoundRequest {
    pub asset_ids: Vec<String>,
    #[serde(default)]
    pub notes: String,
    /// When true, a failed scan-event insert is tolerated and counted as a
    /// partial error instead of aborting the batch.
    #[serde(default)]
    pub skip_failed_scan_events: bool,
}

/// Request body for `POST /assets/bulk-relocate`.
#[derive(Debug, Deserialize)]
pub struct BulkRelocateRequest {
    pub asset_ids: Vec<String>,
    pub new_room_id: String,
    #[serde(default)]
    pub notes: String,
}

/// POST /api/v1/assets/{id}/lost
///
/// Mark an asset Lost. Idempotent: repeating the call leaves the asset
/// Lost and records no second scan event.
pub async fn mark_lost(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::mark_lost(&state.pool, &id, &auth.actor())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Asset", &id)))?;

    Ok(Json(DataResponse { data: asset }))
}

/// POST /api/v1/assets/{id}/found
pub async fn mark_found(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<MarkFoundRequest>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::mark_found(&state.pool, &id, &auth.actor(), input.return_to_room)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Asset", &id)))?;

    Ok(Json(DataResponse { data: asset }))
}

/// POST /api/v1/assets/bulk-found
///
/// Mark many assets Found and return them to their assigned rooms under a
/// single commit.
pub async fn bulk_found(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkFoundRequest>,
) -> AppResult<impl IntoResponse> {
    if input.asset_ids.is_empty() {
        return Err(AppError::BadRequest("asset_ids must not be empty".into()));
    }

    let result = AssetRepo::bulk_mark_found(
        &state.pool,
        &input.asset_ids,
        &auth.actor(),
        &input.notes,
        input.skip_failed_scan_events,
    )
    .await?;

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/assets/bulk-relocate
///
/// Reassign many assets to a new home room under a single all-or-nothing
/// commit.
pub async fn bulk_relocate(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkRelocateRequest>,
) -> AppResult<impl IntoResponse> {
    if input.asset_ids.is_empty() {
        return Err(AppError::BadRequest("asset_ids must not be empty".into()));
    }

    let result = AssetRepo::bulk_relocate(
        &state.pool,
        &input.asset_ids,
        &input.new_room_id,
        &auth.actor(),
        &input.notes,
    )
    .await?;

    Ok(Json(DataResponse { data: result }))
}
