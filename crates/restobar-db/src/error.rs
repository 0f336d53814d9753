//! # Storage Error Types
//!
//! Errors of the storage layer and of the [`crate::Restaurant`] service.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite error (sqlx::Error)      ValidationError / CoreError           │
//! │  Bad payload (serde_json::Error)        │                               │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  DbError (this module) ◄────────── DbError::Core                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller shows the message and leaves state untouched                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown products or orders surface as [`CoreError`] variants. Lookup
//! misses on update/delete are not errors at all; repositories report
//! them as [`crate::repository::UpdateOutcome::NotFound`].

use restobar_core::CoreError;
use thiserror::Error;

/// Storage and service errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored collection could not be read or written as JSON.
    #[error("Corrupt {collection} payload: {message}")]
    Payload { collection: String, message: String },

    /// Domain rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn payload(collection: impl Into<String>, err: serde_json::Error) -> Self {
        DbError::Payload {
            collection: collection.into(),
            message: err.to_string(),
        }
    }

    /// Whether the error came from a domain rule rather than storage.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DbError::Core(_))
    }
}

impl From<restobar_core::ValidationError> for DbError {
    fn from(err: restobar_core::ValidationError) -> Self {
        DbError::Core(CoreError::Validation(err))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage and service operations.
pub type DbResult<T> = Result<T, DbError>;
