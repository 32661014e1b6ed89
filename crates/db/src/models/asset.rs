//! Asset registry models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stocktake_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `assets` table.
///
/// `room_id` is the assigned/expected location, `last_located` the most
/// recently observed one. `status` is written only by the lifecycle
/// operations in `AssetRepo`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: String,
    pub description: String,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub serial_number: Option<String>,
    pub room_id: String,
    pub last_located: String,
    pub assignee_id: Option<DbId>,
    pub status: String,
    pub notes: Option<String>,
    pub last_update: Timestamp,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for manually adding an asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub id: String,
    pub description: String,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub serial_number: Option<String>,
    pub room_id: String,
    /// Defaults to `room_id` when omitted.
    pub last_located: Option<String>,
    pub assignee_id: Option<DbId>,
    pub notes: Option<String>,
}

/// DTO for updating descriptive fields only. Location and status are
/// untouchable through this path.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAssetDetails {
    pub description: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub serial_number: Option<String>,
    pub assignee_id: Option<DbId>,
    pub notes: Option<String>,
}

/// Query parameters for listing assets.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetListParams {
    /// Filter by assigned room.
    pub room_id: Option<String>,
    /// Filter by status string.
    pub status: Option<String>,
}

/// Result of a batch lifecycle operation (mark-missing, bulk-found,
/// bulk-relocate): how many assets transitioned, how many did not, and a
/// message per skipped/failed asset.
#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub processed: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}
