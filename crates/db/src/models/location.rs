//! Location hierarchy models (building, floor, room) and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stocktake_core::types::Timestamp;

/// A row from the `buildings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Building {
    pub building_id: String,
    pub building_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `floors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Floor {
    pub floor_id: String,
    pub building_id: String,
    pub floor_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub room_id: String,
    pub floor_id: String,
    pub room_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a building.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBuilding {
    pub building_id: String,
    pub building_name: String,
}

/// DTO for creating a floor.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFloor {
    pub floor_id: String,
    pub building_id: String,
    pub floor_name: String,
}

/// DTO for creating a room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub room_id: String,
    pub floor_id: String,
    pub room_name: String,
}

/// DTO for renaming a building.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBuilding {
    pub building_name: String,
}

/// DTO for updating a floor.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFloor {
    pub building_id: Option<String>,
    pub floor_name: Option<String>,
}

/// DTO for updating a room.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoom {
    pub floor_id: Option<String>,
    pub room_name: Option<String>,
}
