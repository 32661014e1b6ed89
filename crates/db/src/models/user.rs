//! User account models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stocktake_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// `password_hash` is an Argon2id PHC string; it is never serialized into
/// API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user. The password arrives pre-hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// DTO for updating a user's profile fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
}
