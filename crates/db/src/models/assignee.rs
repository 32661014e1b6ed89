//! Assignee directory models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stocktake_core::types::{DbId, Timestamp};

/// A row from the `assignees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignee {
    pub id: DbId,
    pub fname: String,
    pub lname: Option<String>,
    pub email: Option<String>,
    /// Optional "home room" the person is associated with.
    pub room_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an assignee directly.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignee {
    pub fname: String,
    pub lname: Option<String>,
    pub email: Option<String>,
    pub room_id: Option<String>,
}

/// DTO for updating an assignee.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAssignee {
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub email: Option<String>,
    pub room_id: Option<String>,
}
