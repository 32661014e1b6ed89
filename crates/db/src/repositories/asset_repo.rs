//! Repository for the `assets` table, including the transactional
//! lifecycle operations (location updates, audits, lost/found, bulk
//! actions).
//!
//! Every mutating operation runs inside an explicit transaction: the asset
//! mutation and its scan event commit together or not at all. Batch
//! operations buffer their per-asset work first, then apply the whole
//! buffer under a single commit.

use chrono::{Duration, Utc};
use sqlx::{Acquire, PgPool};
use stocktake_core::status::{
    decide_missing, derive_status, location_update_notes, AssetStatus, MissingDecision,
};
use stocktake_core::types::UNKNOWN_ROOM_ID;

use crate::models::asset::{Asset, AssetListParams, BatchResult, CreateAsset, UpdateAssetDetails};
use crate::models::scan_event::NewScanEvent;
use crate::repositories::{RoomRepo, ScanEventRepo};

const COLUMNS: &str = "\
    id, description, model, brand, serial_number, \
    room_id, last_located, assignee_id, status, notes, \
    last_update, created_at";

/// Default misplaced-age threshold (days) before an audit marks an asset
/// Missing.
pub const DEFAULT_MISPLACED_THRESHOLD_DAYS: i64 = 30;

/// A buffered asset transition awaiting the batch commit.
struct PendingTransition {
    asset_id: String,
    room_id: String,
    last_located: Option<String>,
    status: AssetStatus,
    event: NewScanEvent,
}

/// Provides CRUD and lifecycle operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Create an asset.
    ///
    /// When the target room does not exist the asset is redirected to the
    /// UNKNOWN sentinel room with status `Unassigned`; otherwise the status
    /// is derived from the location pair.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let requested_last = input
            .last_located
            .clone()
            .unwrap_or_else(|| input.room_id.clone());

        let (room_id, last_located, status) = if RoomRepo::exists(pool, &input.room_id).await? {
            let status = derive_status(&input.room_id, &requested_last);
            (input.room_id.clone(), requested_last, status)
        } else {
            tracing::warn!(
                asset_id = %input.id,
                room_id = %input.room_id,
                "Room not found for new asset, assigning to UNKNOWN",
            );
            (
                UNKNOWN_ROOM_ID.to_string(),
                UNKNOWN_ROOM_ID.to_string(),
                AssetStatus::Unassigned,
            )
        };

        let query = format!(
            "INSERT INTO assets (\
                id, description, model, brand, serial_number, \
                room_id, last_located, assignee_id, status, notes\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.id)
            .bind(&input.description)
            .bind(&input.model)
            .bind(&input.brand)
            .bind(&input.serial_number)
            .bind(&room_id)
            .bind(&last_located)
            .bind(input.assignee_id)
            .bind(status.as_str())
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List assets with optional room/status filters.
    pub async fn list(pool: &PgPool, params: &AssetListParams) -> Result<Vec<Asset>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;
        if params.room_id.is_some() {
            conditions.push(format!("room_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {COLUMNS} FROM assets {where_clause} ORDER BY id");

        let mut q = sqlx::query_as::<_, Asset>(&query);
        if let Some(ref room_id) = params.room_id {
            q = q.bind(room_id);
        }
        if let Some(ref status) = params.status {
            q = q.bind(status);
        }
        q.fetch_all(pool).await
    }

    /// Assets whose status is Missing or Misplaced.
    pub async fn list_discrepancies(pool: &PgPool) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets \
             WHERE status IN ('Missing', 'Misplaced') ORDER BY id"
        );
        sqlx::query_as::<_, Asset>(&query).fetch_all(pool).await
    }

    /// Update descriptive fields only; location and status are untouched and
    /// no scan event is recorded. Returns `None` if the asset is absent.
    pub async fn update_details(
        pool: &PgPool,
        id: &str,
        input: &UpdateAssetDetails,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET \
                description = COALESCE($2, description), \
                model = COALESCE($3, model), \
                brand = COALESCE($4, brand), \
                serial_number = COALESCE($5, serial_number), \
                assignee_id = COALESCE($6, assignee_id), \
                notes = COALESCE($7, notes), \
                last_update = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(&input.model)
            .bind(&input.brand)
            .bind(&input.serial_number)
            .bind(input.assignee_id)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete an asset by ID. Returns true if a row was deleted.
    /// Callers must check [`ScanEventRepo::count_for_asset`] first; deletion
    /// is refused while scan history exists.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Lifecycle: single-asset transitions
    // -----------------------------------------------------------------------

    /// Record that an asset was observed in `new_location`.
    ///
    /// Sets `last_located`, re-derives the status against the assigned room,
    /// and appends one scan event describing the move, all in one
    /// transaction. Returns `None` when the asset does not exist.
    pub async fn update_location(
        pool: &PgPool,
        asset_id: &str,
        new_location: &str,
        actor: &str,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let Some(asset) = Self::find_by_id(pool, asset_id).await? else {
            return Ok(None);
        };

        let old_status =
            AssetStatus::parse(&asset.status).unwrap_or(AssetStatus::Misplaced);
        let old_location = asset.last_located.clone();
        let new_status = derive_status(&asset.room_id, new_location);

        let old_room_name = RoomRepo::display_name(pool, &old_location).await?;
        let new_room_name = RoomRepo::display_name(pool, new_location).await?;

        let notes = location_update_notes(
            &new_room_name,
            &old_room_name,
            old_location != new_location,
            old_status,
            new_status,
        );

        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE assets SET last_located = $2, status = $3, last_update = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Asset>(&query)
            .bind(asset_id)
            .bind(new_location)
            .bind(new_status.as_str())
            .fetch_one(&mut *tx)
            .await?;

        ScanEventRepo::append(
            &mut *tx,
            &NewScanEvent {
                asset_id: asset_id.to_string(),
                actor: actor.to_string(),
                room_id: new_location.to_string(),
                status: new_status.as_str().to_string(),
                notes: Some(notes),
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            asset_id = %asset_id,
            from = %old_location,
            to = %new_location,
            status = %new_status,
            "Asset location updated",
        );

        Ok(Some(updated))
    }

    /// Mark an asset Lost. Idempotent: an asset already Lost is returned
    /// unchanged with no new scan event. Returns `None` when absent.
    pub async fn mark_lost(
        pool: &PgPool,
        asset_id: &str,
        actor: &str,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let Some(asset) = Self::find_by_id(pool, asset_id).await? else {
            return Ok(None);
        };

        if asset.status == AssetStatus::Lost.as_str() {
            return Ok(Some(asset));
        }

        let old_status = asset.status.clone();
        let notes = format!("Asset marked as Lost. Previous status: {old_status}.");

        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE assets SET status = $2, last_update = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Asset>(&query)
            .bind(asset_id)
            .bind(AssetStatus::Lost.as_str())
            .fetch_one(&mut *tx)
            .await?;

        ScanEventRepo::append(
            &mut *tx,
            &NewScanEvent {
                asset_id: asset_id.to_string(),
                actor: actor.to_string(),
                room_id: asset.room_id.clone(),
                status: AssetStatus::Lost.as_str().to_string(),
                notes: Some(notes),
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(asset_id = %asset_id, "Asset marked as Lost");

        Ok(Some(updated))
    }

    /// Mark an asset Found.
    ///
    /// With `return_to_room`, the asset's `last_located` snaps back to its
    /// assigned room; otherwise its home (`room_id`) is reassigned to
    /// wherever it was last seen. Either way the status becomes Good.
    pub async fn mark_found(
        pool: &PgPool,
        asset_id: &str,
        actor: &str,
        return_to_room: bool,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let Some(asset) = Self::find_by_id(pool, asset_id).await? else {
            return Ok(None);
        };

        let old_status = asset.status.clone();
        let (final_room, action_desc) = if return_to_room {
            (asset.room_id.clone(), "returned to assigned room".to_string())
        } else {
            let name = RoomRepo::display_name(pool, &asset.last_located).await?;
            (
                asset.last_located.clone(),
                format!("reassigned to current location ({name})"),
            )
        };

        let notes = format!(
            "Asset marked as Found and {action_desc}. Previous status: {old_status}."
        );

        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE assets SET room_id = $2, last_located = $2, status = $3, last_update = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Asset>(&query)
            .bind(asset_id)
            .bind(&final_room)
            .bind(AssetStatus::Good.as_str())
            .fetch_one(&mut *tx)
            .await?;

        ScanEventRepo::append(
            &mut *tx,
            &NewScanEvent {
                asset_id: asset_id.to_string(),
                actor: actor.to_string(),
                room_id: final_room.clone(),
                status: AssetStatus::Good.as_str().to_string(),
                notes: Some(notes),
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(asset_id = %asset_id, room_id = %final_room, "Asset marked as Found");

        Ok(Some(updated))
    }

    // -----------------------------------------------------------------------
    // Lifecycle: batch operations
    // -----------------------------------------------------------------------

    /// Audit sweep: mark assets Missing.
    ///
    /// Per-asset decisions are made up front (see
    /// [`stocktake_core::status::decide_missing`]); all transitions are then
    /// applied under a single commit. If that commit fails, the whole batch
    /// is reported as failed even though individual rows were logically
    /// valid.
    pub async fn mark_missing_batch(
        pool: &PgPool,
        asset_ids: &[String],
        actor: &str,
        misplaced_threshold_days: Option<i64>,
    ) -> Result<BatchResult, sqlx::Error> {
        let threshold_days =
            misplaced_threshold_days.unwrap_or(DEFAULT_MISPLACED_THRESHOLD_DAYS);
        let now = Utc::now();
        let threshold_date = now - Duration::days(threshold_days);

        let mut pending: Vec<PendingTransition> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for asset_id in asset_ids {
            let Some(asset) = Self::find_by_id(pool, asset_id).await? else {
                errors.push(format!("Asset {asset_id} not found."));
                continue;
            };

            let status = AssetStatus::parse(&asset.status);
            let decision = match status {
                Some(s) => decide_missing(s, asset.last_update, threshold_date),
                // Unrecognized stored status: treat like any other
                // non-sticky state and transition.
                None => MissingDecision::Transition,
            };

            match decision {
                MissingDecision::Skip(reason) => {
                    errors.push(reason.message(asset_id));
                }
                MissingDecision::Transition => {
                    let notes = match status {
                        Some(AssetStatus::Misplaced) => format!(
                            "Asset marked as Missing during audit. Previously misplaced \
                             for over {threshold_days} days. Previous status: {}.",
                            asset.status
                        ),
                        _ => format!(
                            "Asset marked as Missing during audit. Previous status: {}.",
                            asset.status
                        ),
                    };
                    pending.push(PendingTransition {
                        asset_id: asset_id.clone(),
                        room_id: asset.room_id.clone(),
                        last_located: None,
                        status: AssetStatus::Missing,
                        event: NewScanEvent {
                            asset_id: asset_id.clone(),
                            actor: actor.to_string(),
                            room_id: asset.room_id.clone(),
                            status: AssetStatus::Missing.as_str().to_string(),
                            notes: Some(notes),
                        },
                    });
                }
            }
        }

        let processed = pending.len();
        let failed = errors.len();

        if processed > 0 {
            if let Err(e) = Self::apply_transitions(pool, &pending, false, &mut Vec::new()).await {
                tracing::error!(error = %e, "Mark-missing batch commit failed");
                errors.push(format!("Database commit error: {e}"));
                return Ok(BatchResult {
                    processed: 0,
                    failed: asset_ids.len(),
                    errors,
                });
            }
            tracing::info!(count = processed, "Assets marked as Missing");
        }

        Ok(BatchResult {
            processed,
            failed,
            errors,
        })
    }

    /// Bulk mark-found: every asset returns to its assigned room with
    /// status Good, one scan event each, all under a single commit.
    ///
    /// `skip_failed_scan_events` controls whether a single failed scan-event
    /// insert aborts the whole batch or is tolerated (via a savepoint) and
    /// counted as a partial error.
    pub async fn bulk_mark_found(
        pool: &PgPool,
        asset_ids: &[String],
        actor: &str,
        notes: &str,
        skip_failed_scan_events: bool,
    ) -> Result<BatchResult, sqlx::Error> {
        let mut notes_prefix = format!("Bulk Mark Found action by User {actor}. ");
        if !notes.is_empty() {
            notes_prefix.push_str(&format!("Note: {notes}. "));
        }

        let mut pending: Vec<PendingTransition> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for asset_id in asset_ids {
            let Some(asset) = Self::find_by_id(pool, asset_id).await? else {
                errors.push(format!("Asset {asset_id} not found"));
                continue;
            };

            let scan_notes = format!(
                "{notes_prefix}Asset marked as Found and returned to assigned room. \
                 Previous status: {}.",
                asset.status
            );
            pending.push(PendingTransition {
                asset_id: asset_id.clone(),
                room_id: asset.room_id.clone(),
                last_located: Some(asset.room_id.clone()),
                status: AssetStatus::Good,
                event: NewScanEvent {
                    asset_id: asset_id.clone(),
                    actor: actor.to_string(),
                    room_id: asset.room_id.clone(),
                    status: AssetStatus::Good.as_str().to_string(),
                    notes: Some(scan_notes),
                },
            });
        }

        let mut tolerated: Vec<String> = Vec::new();
        match Self::apply_transitions(pool, &pending, skip_failed_scan_events, &mut tolerated)
            .await
        {
            Ok(event_count) => {
                let failed = errors.len() + tolerated.len();
                errors.extend(tolerated);
                tracing::info!(count = event_count, "Bulk mark-found committed");
                Ok(BatchResult {
                    processed: event_count,
                    failed,
                    errors,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Bulk mark-found commit failed");
                errors.push(format!("Database error: {e}"));
                Ok(BatchResult {
                    processed: 0,
                    failed: asset_ids.len(),
                    errors,
                })
            }
        }
    }

    /// Bulk relocate: reassign assets to a new home room, mark them Good,
    /// one scan event each, all-or-nothing commit.
    pub async fn bulk_relocate(
        pool: &PgPool,
        asset_ids: &[String],
        new_room_id: &str,
        actor: &str,
        notes: &str,
    ) -> Result<BatchResult, sqlx::Error> {
        let Some(target_room) = RoomRepo::find_by_id(pool, new_room_id).await? else {
            return Ok(BatchResult {
                processed: 0,
                failed: asset_ids.len(),
                errors: vec![format!("Target room {new_room_id} not found.")],
            });
        };

        let notes_prefix = format!(
            "Bulk Relocate action by User {actor} to {} ({new_room_id}). ",
            target_room.room_name
        );

        let mut pending: Vec<PendingTransition> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for asset_id in asset_ids {
            let Some(asset) = Self::find_by_id(pool, asset_id).await? else {
                errors.push(format!("Asset {asset_id} not found."));
                continue;
            };

            let old_room_name = RoomRepo::display_name(pool, &asset.room_id).await?;
            let mut scan_notes = format!(
                "{notes_prefix}Asset relocated from {old_room_name}. Previous status: {}.",
                asset.status
            );
            if !notes.is_empty() {
                scan_notes.push_str(&format!("\nUser Note: {notes}. "));
            }

            pending.push(PendingTransition {
                asset_id: asset_id.clone(),
                room_id: new_room_id.to_string(),
                last_located: Some(new_room_id.to_string()),
                status: AssetStatus::Good,
                event: NewScanEvent {
                    asset_id: asset_id.clone(),
                    actor: actor.to_string(),
                    room_id: new_room_id.to_string(),
                    status: AssetStatus::Good.as_str().to_string(),
                    notes: Some(scan_notes),
                },
            });
        }

        let processed = pending.len();
        let failed = errors.len();

        if processed > 0 {
            if let Err(e) = Self::apply_transitions(pool, &pending, false, &mut Vec::new()).await {
                tracing::error!(error = %e, "Bulk relocate commit failed");
                return Ok(BatchResult {
                    processed: 0,
                    failed: asset_ids.len(),
                    errors: vec![format!("Database commit error: {e}")],
                });
            }
            tracing::info!(count = processed, room_id = %new_room_id, "Bulk relocate committed");
        }

        Ok(BatchResult {
            processed,
            failed,
            errors,
        })
    }

    /// Apply a buffer of transitions under one transaction.
    ///
    /// Returns the number of scan events successfully appended. When
    /// `tolerate_event_failures` is set, a failed scan-event insert is
    /// rolled back to its savepoint and recorded in `tolerated` instead of
    /// aborting the batch.
    async fn apply_transitions(
        pool: &PgPool,
        pending: &[PendingTransition],
        tolerate_event_failures: bool,
        tolerated: &mut Vec<String>,
    ) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut event_count = 0usize;

        for transition in pending {
            match &transition.last_located {
                Some(last_located) => {
                    sqlx::query(
                        "UPDATE assets SET room_id = $2, last_located = $3, status = $4, \
                         last_update = now() WHERE id = $1",
                    )
                    .bind(&transition.asset_id)
                    .bind(&transition.room_id)
                    .bind(last_located)
                    .bind(transition.status.as_str())
                    .execute(&mut *tx)
                    .await?;
                }
                None => {
                    sqlx::query(
                        "UPDATE assets SET status = $2, last_update = now() WHERE id = $1",
                    )
                    .bind(&transition.asset_id)
                    .bind(transition.status.as_str())
                    .execute(&mut *tx)
                    .await?;
                }
            }

            if tolerate_event_failures {
                // Savepoint so a rejected event insert does not poison the
                // outer transaction.
                let mut sp = tx.begin().await?;
                match ScanEventRepo::append(&mut *sp, &transition.event).await {
                    Ok(_) => {
                        sp.commit().await?;
                        event_count += 1;
                    }
                    Err(e) => {
                        sp.rollback().await?;
                        tracing::warn!(
                            asset_id = %transition.asset_id,
                            error = %e,
                            "Scan event creation failed, continuing batch",
                        );
                        tolerated.push(format!(
                            "Scan event creation failed for asset {}: {e}",
                            transition.asset_id
                        ));
                    }
                }
            } else {
                ScanEventRepo::append(&mut *tx, &transition.event).await?;
                event_count += 1;
            }
        }

        tx.commit().await?;
        Ok(event_count)
    }
}
