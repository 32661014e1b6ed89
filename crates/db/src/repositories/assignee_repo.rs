//! Repository for the `assignees` table.

use sqlx::PgPool;
use stocktake_core::naming::{parse_full_name, placeholder_email, ParsedName};
use stocktake_core::types::DbId;

use crate::models::assignee::{Assignee, CreateAssignee, UpdateAssignee};

const COLUMNS: &str = "id, fname, lname, email, room_id, created_at, updated_at";

/// Provides CRUD and name-resolution operations for assignees.
pub struct AssigneeRepo;

impl AssigneeRepo {
    /// Insert a new assignee, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAssignee) -> Result<Assignee, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignees (fname, lname, email, room_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignee>(&query)
            .bind(&input.fname)
            .bind(&input.lname)
            .bind(&input.email)
            .bind(&input.room_id)
            .fetch_one(pool)
            .await
    }

    /// Find an assignee by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assignee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignees WHERE id = $1");
        sqlx::query_as::<_, Assignee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an assignee by email, case-insensitively.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Assignee>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM assignees WHERE LOWER(email) = LOWER($1) LIMIT 1");
        sqlx::query_as::<_, Assignee>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive match on (fname, lname). A missing last name only
    /// matches records whose last name is NULL.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &ParsedName,
    ) -> Result<Option<Assignee>, sqlx::Error> {
        match &name.lname {
            Some(lname) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM assignees \
                     WHERE LOWER(fname) = LOWER($1) AND LOWER(lname) = LOWER($2) \
                     LIMIT 1"
                );
                sqlx::query_as::<_, Assignee>(&query)
                    .bind(&name.fname)
                    .bind(lname)
                    .fetch_optional(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM assignees \
                     WHERE LOWER(fname) = LOWER($1) AND lname IS NULL \
                     LIMIT 1"
                );
                sqlx::query_as::<_, Assignee>(&query)
                    .bind(&name.fname)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// List all assignees ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Assignee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignees ORDER BY fname, lname");
        sqlx::query_as::<_, Assignee>(&query).fetch_all(pool).await
    }

    /// List assignees whose home room is the given room.
    pub async fn list_by_room(pool: &PgPool, room_id: &str) -> Result<Vec<Assignee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignees WHERE room_id = $1 ORDER BY fname, lname"
        );
        sqlx::query_as::<_, Assignee>(&query)
            .bind(room_id)
            .fetch_all(pool)
            .await
    }

    /// Update an assignee. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAssignee,
    ) -> Result<Option<Assignee>, sqlx::Error> {
        let query = format!(
            "UPDATE assignees SET \
                fname = COALESCE($2, fname), \
                lname = COALESCE($3, lname), \
                email = COALESCE($4, email), \
                room_id = COALESCE($5, room_id), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignee>(&query)
            .bind(id)
            .bind(&input.fname)
            .bind(&input.lname)
            .bind(&input.email)
            .bind(&input.room_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a free-text name to an assignee, creating one when absent.
    ///
    /// Matching is case-insensitive on (first, last). On a miss, a
    /// deterministic placeholder email is generated and probed with a
    /// numeric suffix until unused, then the record is created. Calling this
    /// twice with the same name returns the same assignee. Returns `None`
    /// for blank input.
    pub async fn get_or_create_by_name(
        pool: &PgPool,
        full_name: &str,
    ) -> Result<Option<Assignee>, sqlx::Error> {
        let Some(name) = parse_full_name(full_name) else {
            return Ok(None);
        };

        if let Some(existing) = Self::find_by_name(pool, &name).await? {
            return Ok(Some(existing));
        }

        let mut suffix = 0u32;
        let email = loop {
            let candidate = placeholder_email(&name, suffix);
            if Self::find_by_email(pool, &candidate).await?.is_none() {
                break candidate;
            }
            suffix += 1;
        };

        tracing::info!(
            fname = %name.fname,
            lname = name.lname.as_deref().unwrap_or(""),
            email = %email,
            "Creating assignee from name resolution",
        );

        let created = Self::create(
            pool,
            &CreateAssignee {
                fname: name.fname,
                lname: name.lname,
                email: Some(email),
                room_id: None,
            },
        )
        .await?;

        Ok(Some(created))
    }
}
