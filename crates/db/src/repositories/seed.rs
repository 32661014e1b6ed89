//! Sentinel entity seeding.
//!
//! Every asset must resolve to a room even when its real room was deleted
//! or never existed, so a reserved DEFAULT building, DEFAULT floor, and
//! UNKNOWN room are lazily created at startup. Safe to run repeatedly.

use sqlx::PgPool;
use stocktake_core::types::{DEFAULT_BUILDING_ID, DEFAULT_FLOOR_ID, UNKNOWN_ROOM_ID};

/// Create the sentinel building/floor/room when missing.
pub async fn ensure_sentinels(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO buildings (building_id, building_name) VALUES ($1, 'Default Building')
         ON CONFLICT (building_id) DO NOTHING",
    )
    .bind(DEFAULT_BUILDING_ID)
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO floors (floor_id, building_id, floor_name) VALUES ($1, $2, 'Default Floor')
         ON CONFLICT (floor_id) DO NOTHING",
    )
    .bind(DEFAULT_FLOOR_ID)
    .bind(DEFAULT_BUILDING_ID)
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO rooms (room_id, floor_id, room_name) VALUES ($1, $2, 'Unknown Room')
         ON CONFLICT (room_id) DO NOTHING",
    )
    .bind(UNKNOWN_ROOM_ID)
    .bind(DEFAULT_FLOOR_ID)
    .execute(pool)
    .await?;

    tracing::debug!("Sentinel location entities verified");
    Ok(())
}
