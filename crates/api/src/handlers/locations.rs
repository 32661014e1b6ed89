//! Handlers for the location hierarchy (buildings, floors, rooms).
//!
//! Deletes are guarded bottom-up: a parent cannot be removed while any
//! child references it. Each guard is an existence count performed before
//! the delete attempt, refused with an explanatory conflict.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stocktake_core::error::CoreError;
use stocktake_db::models::location::{
    CreateBuilding, CreateFloor, CreateRoom, UpdateBuilding, UpdateFloor, UpdateRoom,
};
use stocktake_db::models::asset::AssetListParams;
use stocktake_db::repositories::{AssetRepo, AssigneeRepo, BuildingRepo, FloorRepo, RoomRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// GET /api/v1/buildings
pub async fn list_buildings(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let buildings = BuildingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: buildings }))
}

/// POST /api/v1/buildings
pub async fn create_building(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBuilding>,
) -> AppResult<impl IntoResponse> {
    let building = BuildingRepo::create(&state.pool, &input).await?;

    tracing::info!(
        building_id = %building.building_id,
        user_id = auth.user_id,
        "Building created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: building })))
}

/// GET /api/v1/buildings/{id}
pub async fn get_building(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let building = BuildingRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Building", &id)))?;

    Ok(Json(DataResponse { data: building }))
}

/// PUT /api/v1/buildings/{id}
pub async fn update_building(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateBuilding>,
) -> AppResult<impl IntoResponse> {
    let building = BuildingRepo::update_name(&state.pool, &id, &input.building_name)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Building", &id)))?;

    Ok(Json(DataResponse { data: building }))
}

/// DELETE /api/v1/buildings/{id}
///
/// Refused while any floor references the building.
pub async fn delete_building(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let floor_count = BuildingRepo::count_floors(&state.pool, &id).await?;
    if floor_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete building {id}: {floor_count} floors reference it"
        ))));
    }

    let deleted = BuildingRepo::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Building", &id)));
    }

    tracing::info!(building_id = %id, "Building deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/buildings/{id}/floors
pub async fn list_building_floors(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let floors = FloorRepo::list_by_building(&state.pool, &id).await?;
    Ok(Json(DataResponse { data: floors }))
}

// ---------------------------------------------------------------------------
// Floors
// ---------------------------------------------------------------------------

/// POST /api/v1/floors
pub async fn create_floor(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFloor>,
) -> AppResult<impl IntoResponse> {
    let floor = FloorRepo::create(&state.pool, &input).await?;

    tracing::info!(floor_id = %floor.floor_id, user_id = auth.user_id, "Floor created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: floor })))
}

/// PUT /api/v1/floors/{id}
pub async fn update_floor(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateFloor>,
) -> AppResult<impl IntoResponse> {
    let floor = FloorRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Floor", &id)))?;

    Ok(Json(DataResponse { data: floor }))
}

/// DELETE /api/v1/floors/{id}
///
/// Refused while any room references the floor.
pub async fn delete_floor(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let room_count = FloorRepo::count_rooms(&state.pool, &id).await?;
    if room_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete floor {id}: {room_count} rooms reference it"
        ))));
    }

    let deleted = FloorRepo::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Floor", &id)));
    }

    tracing::info!(floor_id = %id, "Floor deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/floors/{id}/rooms
pub async fn list_floor_rooms(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let rooms = RoomRepo::list_by_floor(&state.pool, &id).await?;
    Ok(Json(DataResponse { data: rooms }))
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// GET /api/v1/rooms
pub async fn list_rooms(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rooms = RoomRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rooms }))
}

/// POST /api/v1/rooms
pub async fn create_room(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<impl IntoResponse> {
    let room = RoomRepo::create(&state.pool, &input).await?;

    tracing::info!(room_id = %room.room_id, user_id = auth.user_id, "Room created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: room })))
}

/// GET /api/v1/rooms/{id}
pub async fn get_room(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let room = RoomRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Room", &id)))?;

    Ok(Json(DataResponse { data: room }))
}

/// PUT /api/v1/rooms/{id}
pub async fn update_room(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateRoom>,
) -> AppResult<impl IntoResponse> {
    let room = RoomRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Room", &id)))?;

    Ok(Json(DataResponse { data: room }))
}

/// DELETE /api/v1/rooms/{id}
///
/// Refused while any asset is assigned to the room.
pub async fn delete_room(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let asset_count = RoomRepo::count_assets(&state.pool, &id).await?;
    if asset_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete room {id}: {asset_count} assets reference it"
        ))));
    }

    let deleted = RoomRepo::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Room", &id)));
    }

    tracing::info!(room_id = %id, "Room deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/rooms/{id}/assets
///
/// Assets assigned to the room (audit browsing).
pub async fn list_room_assets(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let params = AssetListParams {
        room_id: Some(id),
        status: None,
    };
    let assets = AssetRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// GET /api/v1/rooms/{id}/assignees
///
/// People whose home room is the given room.
pub async fn list_room_assignees(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let assignees = AssigneeRepo::list_by_room(&state.pool, &id).await?;
    Ok(Json(DataResponse { data: assignees }))
}
