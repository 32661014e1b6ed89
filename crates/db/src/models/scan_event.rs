//! Scan event log models.

use serde::Serialize;
use sqlx::FromRow;
use stocktake_core::types::Timestamp;

/// A row from the `scan_events` table. Immutable once inserted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScanEvent {
    pub scan_id: String,
    pub asset_id: String,
    /// The acting user's id rendered as text, or the "SYSTEM" sentinel.
    pub actor: String,
    /// Location at the time of the scan.
    pub room_id: String,
    pub scan_time: Timestamp,
    /// Status snapshot at the time of the scan.
    pub status: String,
    pub notes: Option<String>,
    pub change_log: String,
    pub last_update: Timestamp,
}

/// Fields for appending a scan event. The id and timestamps are stamped at
/// insert time by the repository.
#[derive(Debug, Clone)]
pub struct NewScanEvent {
    pub asset_id: String,
    pub actor: String,
    pub room_id: String,
    pub status: String,
    pub notes: Option<String>,
}
