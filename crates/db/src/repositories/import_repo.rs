//! Bulk CSV import executors.
//!
//! Rows are processed independently: one bad row is recorded and skipped,
//! never aborting the file. Duplicate-key rows are recognized by the
//! PostgreSQL error code (23505), not by matching error text.

use chrono::Utc;
use sqlx::PgPool;
use stocktake_core::import::{
    condition_override, AssetRow, ImportSummary, LocationImportSummary, LocationRow, RowOutcome,
};

use crate::models::asset::CreateAsset;
use crate::models::location::{CreateBuilding, CreateFloor, CreateRoom};
use crate::repositories::{AssetRepo, AssigneeRepo, BuildingRepo, FloorRepo, RoomRepo};

/// True when the error is a unique-constraint violation (duplicate key).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

/// Provides the CSV import executors.
pub struct ImportRepo;

impl ImportRepo {
    // -----------------------------------------------------------------------
    // Asset import
    // -----------------------------------------------------------------------

    /// Import parsed asset rows. Header validation happens before parsing;
    /// by the time rows reach this executor the file shape is known good.
    pub async fn import_assets(pool: &PgPool, rows: &[AssetRow]) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for row in rows {
            let outcome = match Self::import_asset_row(pool, row).await {
                Ok(outcome) => outcome,
                Err(e) if is_unique_violation(&e) => RowOutcome::Skipped {
                    reason: format!(
                        "Row {}: Asset Tag '{}' already exists, skipped.",
                        row.row_num, row.asset_tag
                    ),
                },
                Err(e) => RowOutcome::Skipped {
                    reason: format!("Row {}: Error processing row - {e}", row.row_num),
                },
            };
            summary.record(outcome);
        }

        tracing::info!(
            total = summary.total,
            imported = summary.imported,
            skipped = summary.skipped,
            "Asset CSV import finished",
        );
        summary
    }

    /// Process one asset row.
    async fn import_asset_row(
        pool: &PgPool,
        row: &AssetRow,
    ) -> Result<RowOutcome, sqlx::Error> {
        if let Err(reason) = row.validate() {
            return Ok(RowOutcome::Skipped { reason });
        }

        // A location that does not resolve is a non-fatal warning; the
        // create path redirects the asset to the UNKNOWN sentinel room.
        let redirected = if RoomRepo::exists(pool, &row.location).await? {
            None
        } else {
            Some(format!(
                "Row {}: Location '{}' not found, assigned to Unknown Room",
                row.row_num, row.location
            ))
        };

        let assignee_id = if row.assignee.is_empty() {
            None
        } else {
            AssigneeRepo::get_or_create_by_name(pool, &row.assignee)
                .await?
                .map(|a| a.id)
        };

        let non_empty = |s: &str| {
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };

        let asset = AssetRepo::create(
            pool,
            &CreateAsset {
                id: row.asset_tag.clone(),
                description: row.item.clone(),
                model: non_empty(&row.model),
                brand: non_empty(&row.brand),
                serial_number: non_empty(&row.serial_number),
                room_id: row.location.clone(),
                last_located: Some(row.location.clone()),
                assignee_id,
                notes: None,
            },
        )
        .await?;

        // The Condition cell may carry a sticky override (Missing/Lost);
        // derivable values keep the computed status.
        if let Some(status) = condition_override(&row.condition) {
            sqlx::query("UPDATE assets SET status = $2 WHERE id = $1")
                .bind(&asset.id)
                .bind(status.as_str())
                .execute(pool)
                .await?;
        }

        Ok(match redirected {
            Some(reason) => RowOutcome::Redirected { reason },
            None => RowOutcome::Created,
        })
    }

    // -----------------------------------------------------------------------
    // Location hierarchy import
    // -----------------------------------------------------------------------

    /// Import parsed location rows, resolving or creating the
    /// building → floor → room chain per row. Identity conflicts (an id that
    /// exists under a different name or parent) are row errors, never
    /// silent overwrites.
    pub async fn import_locations(pool: &PgPool, rows: &[LocationRow]) -> LocationImportSummary {
        let mut summary = LocationImportSummary::default();

        for row in rows {
            if let Err(reason) = Self::import_location_row(pool, row, &mut summary).await {
                summary.errors.push(reason);
                summary.skipped_rows += 1;
            }
        }

        summary.finalize();
        tracing::info!(
            buildings = summary.buildings_created,
            floors = summary.floors_created,
            rooms = summary.rooms_created,
            skipped = summary.skipped_rows,
            "Location CSV import finished",
        );
        summary
    }

    /// Process one location row, updating the created counters. Returns
    /// `Err(message)` when the row must be skipped.
    async fn import_location_row(
        pool: &PgPool,
        row: &LocationRow,
        summary: &mut LocationImportSummary,
    ) -> Result<(), String> {
        let row_num = row.row_num;
        let db_err = |e: sqlx::Error| format!("Row {row_num}: Error - {e}");

        if row.building_name.is_empty() {
            return Err(format!("Row {row_num}: Missing building name (required)"));
        }

        // Building: match by id (verifying the name), by name, or create.
        let building = if !row.building_id.is_empty() {
            match BuildingRepo::find_by_id(pool, &row.building_id)
                .await
                .map_err(db_err)?
            {
                Some(existing) => {
                    if existing.building_name != row.building_name {
                        return Err(format!(
                            "Row {row_num}: Building ID {} exists but with name '{}' (not '{}')",
                            row.building_id, existing.building_name, row.building_name
                        ));
                    }
                    existing
                }
                None => {
                    let created = BuildingRepo::create(
                        pool,
                        &CreateBuilding {
                            building_id: row.building_id.clone(),
                            building_name: row.building_name.clone(),
                        },
                    )
                    .await
                    .map_err(db_err)?;
                    summary.buildings_created += 1;
                    created
                }
            }
        } else {
            match BuildingRepo::find_by_name(pool, &row.building_name)
                .await
                .map_err(db_err)?
            {
                Some(existing) => existing,
                None => {
                    let created = BuildingRepo::create(
                        pool,
                        &CreateBuilding {
                            building_id: generated_id('B', row_num),
                            building_name: row.building_name.clone(),
                        },
                    )
                    .await
                    .map_err(db_err)?;
                    summary.buildings_created += 1;
                    created
                }
            }
        };

        // A row may stop at the building level.
        if row.floor_name.is_empty() {
            return Ok(());
        }

        let floor = if !row.floor_id.is_empty() {
            match FloorRepo::find_by_id(pool, &row.floor_id)
                .await
                .map_err(db_err)?
            {
                Some(existing) => {
                    if existing.building_id != building.building_id {
                        return Err(format!(
                            "Row {row_num}: Floor ID {} exists but belongs to building {} (not {})",
                            row.floor_id, existing.building_id, building.building_id
                        ));
                    }
                    if existing.floor_name != row.floor_name {
                        return Err(format!(
                            "Row {row_num}: Floor ID {} exists but with name '{}' (not '{}')",
                            row.floor_id, existing.floor_name, row.floor_name
                        ));
                    }
                    existing
                }
                None => {
                    let created = FloorRepo::create(
                        pool,
                        &CreateFloor {
                            floor_id: row.floor_id.clone(),
                            building_id: building.building_id.clone(),
                            floor_name: row.floor_name.clone(),
                        },
                    )
                    .await
                    .map_err(db_err)?;
                    summary.floors_created += 1;
                    created
                }
            }
        } else {
            match FloorRepo::find_by_name_in_building(
                pool,
                &building.building_id,
                &row.floor_name,
            )
            .await
            .map_err(db_err)?
            {
                Some(existing) => existing,
                None => {
                    let created = FloorRepo::create(
                        pool,
                        &CreateFloor {
                            floor_id: generated_id('F', row_num),
                            building_id: building.building_id.clone(),
                            floor_name: row.floor_name.clone(),
                        },
                    )
                    .await
                    .map_err(db_err)?;
                    summary.floors_created += 1;
                    created
                }
            }
        };

        // A row may stop at the floor level.
        if row.room_name.is_empty() {
            return Ok(());
        }

        if !row.room_id.is_empty() {
            match RoomRepo::find_by_id(pool, &row.room_id)
                .await
                .map_err(db_err)?
            {
                Some(existing) => {
                    if existing.floor_id != floor.floor_id {
                        return Err(format!(
                            "Row {row_num}: Room ID {} exists but belongs to floor {} (not {})",
                            row.room_id, existing.floor_id, floor.floor_id
                        ));
                    }
                    if existing.room_name != row.room_name {
                        return Err(format!(
                            "Row {row_num}: Room ID {} exists but with name '{}' (not '{}')",
                            row.room_id, existing.room_name, row.room_name
                        ));
                    }
                }
                None => {
                    RoomRepo::create(
                        pool,
                        &CreateRoom {
                            room_id: row.room_id.clone(),
                            floor_id: floor.floor_id.clone(),
                            room_name: row.room_name.clone(),
                        },
                    )
                    .await
                    .map_err(db_err)?;
                    summary.rooms_created += 1;
                }
            }
        } else {
            match RoomRepo::find_by_name_on_floor(pool, &floor.floor_id, &row.room_name)
                .await
                .map_err(db_err)?
            {
                Some(_) => {}
                None => {
                    RoomRepo::create(
                        pool,
                        &CreateRoom {
                            room_id: generated_id('R', row_num),
                            floor_id: floor.floor_id.clone(),
                            room_name: row.room_name.clone(),
                        },
                    )
                    .await
                    .map_err(db_err)?;
                    summary.rooms_created += 1;
                }
            }
        }

        Ok(())
    }
}

/// Time-derived id for entities created without one. The row number keeps
/// ids from colliding within the same second.
fn generated_id(prefix: char, row_num: usize) -> String {
    format!("{prefix}{}{row_num}", Utc::now().format("%Y%m%d%H%M%S"))
}
