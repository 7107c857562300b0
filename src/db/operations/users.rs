use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::error::Result;
use crate::models::User;

/// Settings for the idempotent default-user bootstrap
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultUserSpec {
    /// Id to insert with; generated when not configured
    pub id: Option<Uuid>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_verified: bool,
}

impl Default for DefaultUserSpec {
    fn default() -> Self {
        Self {
            id: None,
            username: "default_user".to_string(),
            email: "default@example.com".to_string(),
            password_hash: "not_used_in_local".to_string(),
            is_active: true,
            is_verified: true,
        }
    }
}

/// What [`ensure_default_user`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Inserted(Uuid),
    Updated(Uuid),
    Existing(Uuid),
}

impl EnsureOutcome {
    pub fn id(&self) -> Uuid {
        match self {
            EnsureOutcome::Inserted(id) | EnsureOutcome::Updated(id) | EnsureOutcome::Existing(id) => {
                *id
            }
        }
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
     is_active, is_verified, last_login_at, created_at, updated_at";

pub(crate) fn parse_user_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        is_active: row.try_get("is_active")?,
        is_verified: row.try_get("is_verified")?,
        last_login_at: row.try_get("last_login_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// The user that owns anything created without an explicit owner: the oldest one
pub async fn get_default_user(pool: &Pool) -> Result<Option<User>> {
    let conn = pool.get().await?;
    let sql = format!(
        "SELECT {} FROM users ORDER BY created_at ASC, id ASC LIMIT 1",
        USER_COLUMNS
    );
    let row = conn.query_opt(&sql, &[]).await?;
    row.as_ref().map(parse_user_row).transpose()
}

pub async fn get_user(pool: &Pool, id: Uuid) -> Result<Option<User>> {
    let conn = pool.get().await?;
    let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
    let row = conn.query_opt(&sql, &[&id]).await?;
    row.as_ref().map(parse_user_row).transpose()
}

/// Make sure a default user exists; safe to run repeatedly.
///
/// 1. A user with the configured email is kept, and only updated when
///    `force_update` is set.
/// 2. Otherwise a user with the configured id is kept as is.
/// 3. Otherwise the user is inserted, ignoring a racing insert of the same id.
pub async fn ensure_default_user(
    pool: &Pool,
    spec: &DefaultUserSpec,
    force_update: bool,
) -> Result<EnsureOutcome> {
    let mut conn = pool.get().await?;
    let tx = conn.transaction().await?;
    let id = spec.id.unwrap_or_else(Uuid::new_v4);

    let by_email = tx
        .query_opt("SELECT id FROM users WHERE email = $1", &[&spec.email])
        .await?;

    if let Some(row) = by_email {
        let existing: Uuid = row.try_get("id")?;
        let outcome = if force_update {
            tx.execute(
                "UPDATE users
                    SET username = $1, is_active = $2, is_verified = $3, updated_at = now()
                  WHERE email = $4",
                &[&spec.username, &spec.is_active, &spec.is_verified, &spec.email],
            )
            .await?;
            info!(user_id = %existing, "default user updated");
            EnsureOutcome::Updated(existing)
        } else {
            debug!(user_id = %existing, "default user already present");
            EnsureOutcome::Existing(existing)
        };
        tx.commit().await?;
        return Ok(outcome);
    }

    let by_id = tx
        .query_opt("SELECT id FROM users WHERE id = $1", &[&id])
        .await?;
    if by_id.is_some() {
        debug!(user_id = %id, "user with default id exists, skipping insert");
        tx.commit().await?;
        return Ok(EnsureOutcome::Existing(id));
    }

    let inserted = tx
        .execute(
            "INSERT INTO users (id, username, email, password_hash, is_active, is_verified)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO NOTHING",
            &[
                &id,
                &spec.username,
                &spec.email,
                &spec.password_hash,
                &spec.is_active,
                &spec.is_verified,
            ],
        )
        .await?;
    tx.commit().await?;

    if inserted == 0 {
        return Ok(EnsureOutcome::Existing(id));
    }
    info!(user_id = %id, email = %spec.email, "default user inserted");
    Ok(EnsureOutcome::Inserted(id))
}
