//! Versioned schema migrations
//!
//! Migrations are embedded in the binary and applied in version order. Each
//! one runs in its own transaction and is recorded in `schema_migrations`, so
//! a restart only applies what is missing. An advisory lock serializes
//! concurrent instances starting against the same database.

mod definitions;

pub use definitions::{LOCAL_USER_ID, MIGRATIONS};

use deadpool_postgres::Pool;
use tracing::{debug, info};

use crate::db::error::{Error, Result};

/// Longest accepted migration name
pub const MAX_NAME_LEN: usize = 64;

/// Advisory lock key held while a migration is applied
const MIGRATION_LOCK_KEY: i64 = 0x5ec7_e7a1;

/// One schema change
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i32,
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

/// Check that a migration list forms a single linear history
pub fn validate_migrations(migrations: &[Migration]) -> Result<()> {
    let mut previous = 0;
    for migration in migrations {
        if migration.version <= previous {
            return Err(Error::ValidationError(format!(
                "migration {} ({}) is out of order after version {}",
                migration.version, migration.name, previous
            )));
        }
        if migration.name.is_empty() || migration.name.len() > MAX_NAME_LEN {
            return Err(Error::ValidationError(format!(
                "migration {} name must be 1..={} characters",
                migration.version, MAX_NAME_LEN
            )));
        }
        if migration.statements.is_empty() {
            return Err(Error::ValidationError(format!(
                "migration {} ({}) has no statements",
                migration.version, migration.name
            )));
        }
        previous = migration.version;
    }
    Ok(())
}

async fn ensure_version_table(pool: &Pool) -> Result<()> {
    let conn = pool.get().await?;
    conn.batch_execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name VARCHAR(64) NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .await?;
    Ok(())
}

/// Highest applied migration version, 0 for a fresh database
pub async fn current_version(pool: &Pool) -> Result<i32> {
    ensure_version_table(pool).await?;
    let conn = pool.get().await?;
    let row = conn
        .query_one("SELECT COALESCE(MAX(version), 0) FROM schema_migrations", &[])
        .await?;
    Ok(row.try_get(0)?)
}

/// Apply a single migration unless another process already did
async fn apply_migration(pool: &Pool, migration: &Migration) -> Result<bool> {
    let mut conn = pool.get().await?;
    let tx = conn.transaction().await?;

    tx.execute("SELECT pg_advisory_xact_lock($1)", &[&MIGRATION_LOCK_KEY])
        .await?;

    let already_applied = tx
        .query_opt(
            "SELECT 1 FROM schema_migrations WHERE version = $1",
            &[&migration.version],
        )
        .await?
        .is_some();
    if already_applied {
        return Ok(false);
    }

    for statement in migration.statements {
        tx.batch_execute(statement)
            .await
            .map_err(|e| Error::MigrationError {
                version: migration.version,
                name: migration.name.to_string(),
                message: Error::from(e).to_string(),
            })?;
    }

    tx.execute(
        "INSERT INTO schema_migrations (version, name) VALUES ($1, $2)",
        &[&migration.version, &migration.name],
    )
    .await?;
    tx.commit().await?;
    Ok(true)
}

/// Run every pending migration and return the resulting version
pub async fn run_migrations(pool: &Pool) -> Result<i32> {
    run_migration_list(pool, MIGRATIONS).await
}

pub async fn run_migration_list(pool: &Pool, migrations: &[Migration]) -> Result<i32> {
    validate_migrations(migrations)?;

    let current = current_version(pool).await?;
    let latest = migrations.last().map_or(0, |m| m.version);
    if current >= latest {
        info!(version = current, "database schema is up to date");
        return Ok(current);
    }

    info!(current, latest, "applying pending migrations");
    for migration in migrations.iter().filter(|m| m.version > current) {
        if apply_migration(pool, migration).await? {
            info!(
                version = migration.version,
                name = migration.name,
                "applied migration"
            );
        } else {
            debug!(
                version = migration.version,
                "migration applied concurrently, skipping"
            );
        }
    }

    current_version(pool).await
}

/// Nullable columns that older databases may lack: (table, column, type)
const RUNTIME_COLUMNS: &[(&str, &str, &str)] = &[
    ("conversations", "started_at", "TIMESTAMPTZ NULL"),
    ("conversations", "ended_at", "TIMESTAMPTZ NULL"),
];

/// Add forward-compatible nullable columns that are missing.
///
/// Only ever adds NULL columns, never alters or drops. Returns the
/// `table.column` names that were added.
pub async fn ensure_runtime_schema(pool: &Pool) -> Result<Vec<String>> {
    let conn = pool.get().await?;
    let mut added = Vec::new();

    for (table, column, ddl) in RUNTIME_COLUMNS {
        let exists = conn
            .query_opt(
                "SELECT 1 FROM information_schema.columns
                 WHERE table_schema = current_schema()
                   AND table_name = $1
                   AND column_name = $2",
                &[table, column],
            )
            .await?
            .is_some();

        if !exists {
            conn.batch_execute(&format!(
                "ALTER TABLE \"{}\" ADD COLUMN IF NOT EXISTS {} {}",
                table, column, ddl
            ))
            .await?;
            info!(table, column, "added missing column");
            added.push(format!("{}.{}", table, column));
        }
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_migrations_are_valid() {
        assert!(validate_migrations(MIGRATIONS).is_ok());
    }

    #[test]
    fn test_embedded_migrations_start_at_one() {
        assert_eq!(MIGRATIONS.first().map(|m| m.version), Some(1));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let migrations = [
            Migration {
                version: 2,
                name: "second",
                statements: &["SELECT 1"],
            },
            Migration {
                version: 2,
                name: "duplicate",
                statements: &["SELECT 1"],
            },
        ];
        let err = validate_migrations(&migrations).unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn test_long_name_rejected() {
        let name: &'static str = Box::leak("x".repeat(MAX_NAME_LEN + 1).into_boxed_str());
        let migrations = [Migration {
            version: 1,
            name,
            statements: &["SELECT 1"],
        }];
        assert!(validate_migrations(&migrations).is_err());
    }

    #[test]
    fn test_empty_migration_rejected() {
        let migrations = [Migration {
            version: 1,
            name: "empty",
            statements: &[],
        }];
        assert!(validate_migrations(&migrations).is_err());
    }
}
