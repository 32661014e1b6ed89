//! Handlers for the asset registry (CRUD and listing).
//!
//! Status and location transitions live in the audit and discrepancy
//! handlers; this module never touches either.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stocktake_core::error::CoreError;
use stocktake_db::models::asset::{AssetListParams, CreateAsset, UpdateAssetDetails};
use stocktake_db::repositories::{AssetRepo, ScanEventRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/assets
///
/// List assets, optionally filtered by assigned room or status.
pub async fn list_assets(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AssetListParams>,
) -> AppResult<impl IntoResponse> {
    let assets = AssetRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// GET /api/v1/assets/discrepancies
///
/// Assets whose status is Missing or Misplaced.
pub async fn list_discrepancies(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let assets = AssetRepo::list_discrepancies(&state.pool).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// POST /api/v1/assets
///
/// Manually add an asset. A nonexistent room redirects the asset to the
/// UNKNOWN sentinel room with status Unassigned; a duplicate asset tag is
/// reported as a conflict.
pub async fn create_asset(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAsset>,
) -> AppResult<impl IntoResponse> {
    if input.id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Asset id must not be empty".into(),
        )));
    }
    if input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Asset description must not be empty".into(),
        )));
    }

    let asset = AssetRepo::create(&state.pool, &input).await?;

    tracing::info!(
        asset_id = %asset.id,
        room_id = %asset.room_id,
        status = %asset.status,
        user_id = auth.user_id,
        "Asset created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// GET /api/v1/assets/{id}
///
/// Full asset detail including its scan history, newest first.
pub async fn get_asset(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Asset", &id)))?;

    let history = ScanEventRepo::list_by_asset(&state.pool, &id).await?;

    let detail = serde_json::json!({
        "asset": asset,
        "history": history,
    });

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/assets/{id}
///
/// Update descriptive fields only. Never touches status or location and
/// records no scan event.
pub async fn update_asset(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateAssetDetails>,
) -> AppResult<impl IntoResponse> {
    let asset = AssetRepo::update_details(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Asset", &id)))?;

    tracing::info!(asset_id = %id, user_id = auth.user_id, "Asset details updated");

    Ok(Json(DataResponse { data: asset }))
}

/// DELETE /api/v1/assets/{id}
///
/// Delete an asset. Refused while scan history exists; the audit trail is
/// never silently discarded.
pub async fn delete_asset(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event_count = ScanEventRepo::count_for_asset(&state.pool, &id).await?;
    if event_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete asset {id}: it has {event_count} scan events. \
             Archive the asset instead."
        ))));
    }

    let deleted = AssetRepo::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Asset", &id)));
    }

    tracing::info!(asset_id = %id, user_id = auth.user_id, "Asset deleted");

    Ok(StatusCode::NO_CONTENT)
}
