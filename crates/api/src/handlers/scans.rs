//! Handlers for browsing the scan event log.
//!
//! Read-only: scan events are appended by the lifecycle operations and
//! never through a direct endpoint.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use stocktake_core::error::CoreError;
use stocktake_db::repositories::ScanEventRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /scans/recent`.
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<i64>,
}

/// GET /api/v1/scans/recent?limit=
pub async fn recent(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> AppResult<impl IntoResponse> {
    let events = ScanEventRepo::recent(&state.pool, params.limit).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/scans/{scan_id}
///
/// Fetch a single scan event by id.
pub async fn get_scan(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(scan_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event = ScanEventRepo::find_by_id(&state.pool, &scan_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ScanEvent", &scan_id)))?;
    Ok(Json(DataResponse { data: event }))
}

/// GET /api/v1/scans/asset/{asset_id}
///
/// Full history for an asset, newest first.
pub async fn by_asset(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let events = ScanEventRepo::list_by_asset(&state.pool, &asset_id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/scans/room/{room_id}
pub async fn by_room(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let events = ScanEventRepo::list_by_room(&state.pool, &room_id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/scans/status/{status}
pub async fn by_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<impl IntoResponse> {
    let events = ScanEventRepo::list_by_status(&state.pool, &status).await?;
    Ok(Json(DataResponse { data: events }))
}
