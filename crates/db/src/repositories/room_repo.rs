//! Repository for the `rooms` table.

use sqlx::PgPool;

use crate::models::location::{CreateRoom, Room, UpdateRoom};

const COLUMNS: &str = "room_id, floor_id, room_name, created_at, updated_at";

/// Provides CRUD operations for rooms.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a new room, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRoom) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (room_id, floor_id, room_name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(&input.room_id)
            .bind(&input.floor_id)
            .bind(&input.room_name)
            .fetch_one(pool)
            .await
    }

    /// Find a room by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE room_id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a room's display name, falling back to `Room {id}` when the
    /// room does not exist. Used when building scan-event notes.
    pub async fn display_name(pool: &PgPool, id: &str) -> Result<String, sqlx::Error> {
        let name: Option<(String,)> =
            sqlx::query_as("SELECT room_name FROM rooms WHERE room_id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(name.map(|n| n.0).unwrap_or_else(|| format!("Room {id}")))
    }

    /// Verify that a room exists by ID.
    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms WHERE room_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count.0 > 0)
    }

    /// Find a room by name within a floor, case-insensitively.
    pub async fn find_by_name_on_floor(
        pool: &PgPool,
        floor_id: &str,
        name: &str,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rooms
             WHERE floor_id = $1 AND LOWER(room_name) = LOWER($2)
             LIMIT 1"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(floor_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all rooms ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms ORDER BY room_name");
        sqlx::query_as::<_, Room>(&query).fetch_all(pool).await
    }

    /// List rooms belonging to a floor.
    pub async fn list_by_floor(pool: &PgPool, floor_id: &str) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE floor_id = $1 ORDER BY room_name");
        sqlx::query_as::<_, Room>(&query)
            .bind(floor_id)
            .fetch_all(pool)
            .await
    }

    /// Update a room. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET
                floor_id = COALESCE($2, floor_id),
                room_name = COALESCE($3, room_name),
                updated_at = now()
             WHERE room_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(&input.floor_id)
            .bind(&input.room_name)
            .fetch_optional(pool)
            .await
    }

    /// Count assets assigned to this room (delete guard).
    pub async fn count_assets(pool: &PgPool, id: &str) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assets WHERE room_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Delete a room by ID. Returns true if a row was deleted.
    /// Callers must check [`Self::count_assets`] first.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE room_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
