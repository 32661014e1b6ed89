//! Repository for the `floors` table.

use sqlx::PgPool;

use crate::models::location::{CreateFloor, Floor, UpdateFloor};

const COLUMNS: &str = "floor_id, building_id, floor_name, created_at, updated_at";

/// Provides CRUD operations for floors.
pub struct FloorRepo;

impl FloorRepo {
    /// Insert a new floor, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFloor) -> Result<Floor, sqlx::Error> {
        let query = format!(
            "INSERT INTO floors (floor_id, building_id, floor_name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Floor>(&query)
            .bind(&input.floor_id)
            .bind(&input.building_id)
            .bind(&input.floor_name)
            .fetch_one(pool)
            .await
    }

    /// Find a floor by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Floor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM floors WHERE floor_id = $1");
        sqlx::query_as::<_, Floor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a floor by name within a building, case-insensitively.
    pub async fn find_by_name_in_building(
        pool: &PgPool,
        building_id: &str,
        name: &str,
    ) -> Result<Option<Floor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM floors
             WHERE building_id = $1 AND LOWER(floor_name) = LOWER($2)
             LIMIT 1"
        );
        sqlx::query_as::<_, Floor>(&query)
            .bind(building_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List floors belonging to a building.
    pub async fn list_by_building(
        pool: &PgPool,
        building_id: &str,
    ) -> Result<Vec<Floor>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM floors WHERE building_id = $1 ORDER BY floor_name");
        sqlx::query_as::<_, Floor>(&query)
            .bind(building_id)
            .fetch_all(pool)
            .await
    }

    /// Update a floor. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateFloor,
    ) -> Result<Option<Floor>, sqlx::Error> {
        let query = format!(
            "UPDATE floors SET
                building_id = COALESCE($2, building_id),
                floor_name = COALESCE($3, floor_name),
                updated_at = now()
             WHERE floor_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Floor>(&query)
            .bind(id)
            .bind(&input.building_id)
            .bind(&input.floor_name)
            .fetch_optional(pool)
            .await
    }

    /// Count rooms referencing this floor (delete guard).
    pub async fn count_rooms(pool: &PgPool, id: &str) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms WHERE floor_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Delete a floor by ID. Returns true if a row was deleted.
    /// Callers must check [`Self::count_rooms`] first.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM floors WHERE floor_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
