//! Repository for the `scan_events` table.
//!
//! Scan events are append-only: there is no update or delete here, and
//! asset deletion is refused while events exist, so rows are never removed
//! by application flow.

use chrono::Utc;
use sqlx::PgPool;
use stocktake_core::status::change_log_summary;
use stocktake_core::types::Timestamp;
use uuid::Uuid;

use crate::models::scan_event::{NewScanEvent, ScanEvent};

const COLUMNS: &str = "\
    scan_id, asset_id, actor, room_id, scan_time, \
    status, notes, change_log, last_update";

/// Default number of events returned by [`ScanEventRepo::recent`].
const DEFAULT_RECENT_LIMIT: i64 = 50;

/// Upper bound on any scan listing.
const MAX_LIMIT: i64 = 200;

/// Provides append and query operations for scan events.
pub struct ScanEventRepo;

impl ScanEventRepo {
    /// Generate a time-derived scan id.
    ///
    /// The second-resolution timestamp keeps ids sortable and readable; the
    /// uuid suffix keeps events appended within the same second unique.
    fn next_scan_id(now: Timestamp) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("SCAN-{}-{}", now.format("%Y%m%d%H%M%S"), &suffix[..8])
    }

    /// Append a scan event. Usable against the pool or an open transaction.
    ///
    /// Stamps the id, `scan_time`, `last_update`, and the change-log summary
    /// at insert time.
    pub async fn append<'e, E>(executor: E, input: &NewScanEvent) -> Result<ScanEvent, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let now = Utc::now();
        let scan_id = Self::next_scan_id(now);
        let change_log = change_log_summary(&input.asset_id, &input.room_id, &input.status);

        let query = format!(
            "INSERT INTO scan_events (\
                scan_id, asset_id, actor, room_id, scan_time, \
                status, notes, change_log, last_update\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(&scan_id)
            .bind(&input.asset_id)
            .bind(&input.actor)
            .bind(&input.room_id)
            .bind(now)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(&change_log)
            .fetch_one(executor)
            .await
    }

    /// Find a single event by scan id.
    pub async fn find_by_id(pool: &PgPool, scan_id: &str) -> Result<Option<ScanEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scan_events WHERE scan_id = $1");
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(scan_id)
            .fetch_optional(pool)
            .await
    }

    /// History for one asset, newest first.
    pub async fn list_by_asset(
        pool: &PgPool,
        asset_id: &str,
    ) -> Result<Vec<ScanEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scan_events \
             WHERE asset_id = $1 ORDER BY scan_time DESC"
        );
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }

    /// Events recorded in one room, newest first.
    pub async fn list_by_room(pool: &PgPool, room_id: &str) -> Result<Vec<ScanEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scan_events \
             WHERE room_id = $1 ORDER BY scan_time DESC"
        );
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(room_id)
            .fetch_all(pool)
            .await
    }

    /// Events with a given status snapshot, newest first.
    pub async fn list_by_status(pool: &PgPool, status: &str) -> Result<Vec<ScanEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scan_events \
             WHERE status = $1 ORDER BY scan_time DESC"
        );
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// The most recent events across all assets.
    pub async fn recent(pool: &PgPool, limit: Option<i64>) -> Result<Vec<ScanEvent>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT).clamp(1, MAX_LIMIT);
        let query = format!(
            "SELECT {COLUMNS} FROM scan_events ORDER BY scan_time DESC LIMIT $1"
        );
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Narrow utility lookup by exact `last_update` timestamp.
    pub async fn list_by_last_update(
        pool: &PgPool,
        last_update: Timestamp,
    ) -> Result<Vec<ScanEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scan_events WHERE last_update = $1");
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(last_update)
            .fetch_all(pool)
            .await
    }

    /// Narrow utility lookup by exact change-log text.
    pub async fn list_by_change_log(
        pool: &PgPool,
        change_log: &str,
    ) -> Result<Vec<ScanEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scan_events WHERE change_log = $1");
        sqlx::query_as::<_, ScanEvent>(&query)
            .bind(change_log)
            .fetch_all(pool)
            .await
    }

    /// Count events for one asset (asset delete guard).
    pub async fn count_for_asset(pool: &PgPool, asset_id: &str) -> Result<i64, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM scan_events WHERE asset_id = $1")
                .bind(asset_id)
                .fetch_one(pool)
                .await?;
        Ok(count.0)
    }
}
