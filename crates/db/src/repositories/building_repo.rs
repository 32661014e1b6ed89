//! Repository for the `buildings` table.

use sqlx::PgPool;

use crate::models::location::{Building, CreateBuilding};

const COLUMNS: &str = "building_id, building_name, created_at, updated_at";

/// Provides CRUD operations for buildings.
pub struct BuildingRepo;

impl BuildingRepo {
    /// Insert a new building, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBuilding) -> Result<Building, sqlx::Error> {
        let query = format!(
            "INSERT INTO buildings (building_id, building_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Building>(&query)
            .bind(&input.building_id)
            .bind(&input.building_name)
            .fetch_one(pool)
            .await
    }

    /// Find a building by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Building>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM buildings WHERE building_id = $1");
        sqlx::query_as::<_, Building>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a building by name, case-insensitively. Used by the location
    /// importer when a row carries no building id.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Building>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM buildings WHERE LOWER(building_name) = LOWER($1) LIMIT 1"
        );
        sqlx::query_as::<_, Building>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all buildings ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Building>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM buildings ORDER BY building_name");
        sqlx::query_as::<_, Building>(&query).fetch_all(pool).await
    }

    /// Rename a building. Returns `None` if it does not exist.
    pub async fn update_name(
        pool: &PgPool,
        id: &str,
        name: &str,
    ) -> Result<Option<Building>, sqlx::Error> {
        let query = format!(
            "UPDATE buildings SET building_name = $2, updated_at = now()
             WHERE building_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Building>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Count floors referencing this building (delete guard).
    pub async fn count_floors(pool: &PgPool, id: &str) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM floors WHERE building_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Delete a building by ID. Returns true if a row was deleted.
    /// Callers must check [`Self::count_floors`] first.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM buildings WHERE building_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
