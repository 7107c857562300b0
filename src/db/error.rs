use thiserror::Error;
use tokio_postgres::error::SqlState;

/// Result type for database operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for database operations
#[derive(Debug, Error)]
pub enum Error {
    /// Requested row does not exist
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Invalid input data, including values rejected by NOT NULL or enum casts
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Unique or foreign-key constraint violation
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Database unreachable or authentication failure
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Connection pool issues
    #[error("Pool error: {0}")]
    PoolError(String),

    /// A schema migration failed to apply
    #[error("Migration {version} ({name}) failed: {message}")]
    MigrationError {
        version: i32,
        name: String,
        message: String,
    },

    /// Any other SQL error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Convert tokio-postgres errors, classifying constraint violations by SQLSTATE
impl From<tokio_postgres::Error> for Error {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            let message = db_error.message().to_string();
            let code = db_error.code();

            if *code == SqlState::UNIQUE_VIOLATION || *code == SqlState::FOREIGN_KEY_VIOLATION {
                return Error::ConflictError(match db_error.detail() {
                    Some(detail) => format!("{}: {}", message, detail),
                    None => message,
                });
            }

            if *code == SqlState::NOT_NULL_VIOLATION
                || *code == SqlState::INVALID_TEXT_REPRESENTATION
                || *code == SqlState::STRING_DATA_RIGHT_TRUNCATION
            {
                return Error::ValidationError(message);
            }

            return Error::DatabaseError(format!("{}: {}", code.code(), message));
        }

        if err.is_closed() {
            return Error::ConnectionError(err.to_string());
        }

        Error::DatabaseError(format!("{:?}", err))
    }
}

impl From<deadpool_postgres::PoolError> for Error {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Error::PoolError(err.to_string())
    }
}

impl From<deadpool_postgres::BuildError> for Error {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        Error::ConnectionError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ValidationError(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::NotFoundError("Assistant not found".to_string());
        assert_eq!(err.to_string(), "Not found: Assistant not found");
    }

    #[test]
    fn test_migration_error_display() {
        let err = Error::MigrationError {
            version: 4,
            name: "conversations_and_messages".to_string(),
            message: "relation \"users\" does not exist".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Migration 4"));
        assert!(text.contains("conversations_and_messages"));
        assert!(text.contains("does not exist"));
    }

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::ValidationError(_)));
    }
}
