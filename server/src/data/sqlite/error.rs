//! SQLite error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl SqliteError {
    /// True when the underlying sqlx error is a UNIQUE or PRIMARY KEY
    /// constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            SqliteError::Database(sqlx::Error::Database(db)) => {
                matches!(db.code().as_deref(), Some("1555") | Some("2067"))
            }
            _ => false,
        }
    }

    /// True when the underlying sqlx error is a FOREIGN KEY violation.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            SqliteError::Database(sqlx::Error::Database(db)) => {
                matches!(db.code().as_deref(), Some("787") | Some("1811"))
            }
            _ => false,
        }
    }
}
