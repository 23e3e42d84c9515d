//! # Database Error Types
//!
//! The single error type returned by every store operation.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)      Local rule violation                  │
//! │       │                          (no id, nothing updated, ...)         │
//! │       ▼                                 │                              │
//! │  DbError (this module) ◄────────────────┘                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller decides: retry, report, abort                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pantry_core::CoreError;
use thiserror::Error;

/// Store operation errors.
///
/// Wraps either a lower-level storage failure or a rule violation detected
/// before or after talking to the database. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `find_one` matched no row
    /// - `update` / `remove` affected zero rows
    #[error("{entity} not found: {id}")]
    NotFound {
        entity: String,
        id: String,
    },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a duplicate account email
    /// - Any UNIQUE index violation
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation {
        field: String,
        value: String,
    },

    /// The operation needs a persisted entity but the id is unset.
    ///
    /// Raised before any connection is acquired.
    #[error("{entity} has no id; it must be saved first")]
    MissingId { entity: String },

    /// Saving an entity that already has an id; ids are never reassigned.
    #[error("{entity} is already persisted with id {id}")]
    AlreadyPersisted { entity: String, id: i64 },

    /// The insert succeeded but no generated key came back.
    #[error("No generated key returned for {entity}")]
    MissingGeneratedKey { entity: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Pool already closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Executing a DDL script failed.
    ///
    /// ## When This Occurs
    /// - Table already exists
    /// - Malformed DDL
    #[error("Schema initialization failed: {0}")]
    SchemaFailed(String),

    /// No packaged DDL resource with this name.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored value cannot be represented in the domain, or vice versa.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A configuration value could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidConfig { key: String, value: String },

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a MissingId error.
    pub fn missing_id(entity: impl Into<String>) -> Self {
        DbError::MissingId {
            entity: entity.into(),
        }
    }

    /// True for `NotFound`, so callers can tell "absent" from "broken".
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::ColumnDecode   → DbError::InvalidData
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite: "UNIQUE constraint failed: <table>.<column>"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
                DbError::InvalidData(err.to_string())
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => DbError::ConnectionFailed(err.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        DbError::InvalidData(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(DbError::not_found("Product", 42).to_string(), "Product not found: 42");
        assert_eq!(
            DbError::missing_id("Product").to_string(),
            "Product has no id; it must be saved first"
        );
        assert_eq!(
            DbError::duplicate("account.email", "a@b.c").to_string(),
            "Duplicate account.email: 'a@b.c' already exists"
        );
    }

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(DbError::from(sqlx::Error::RowNotFound).is_not_found());
        assert!(matches!(DbError::from(sqlx::Error::PoolTimedOut), DbError::PoolExhausted));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::ColumnNotFound("price".to_string())),
            DbError::InvalidData(_)
        ));
    }

    #[test]
    fn test_io_error_is_connection_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only file system");

        match DbError::from(sqlx::Error::Io(io)) {
            DbError::ConnectionFailed(msg) => assert!(msg.contains("read-only file system")),
            other => panic!("expected ConnectionFailed, got {other:?}"),
        }

        let tls = sqlx::Error::Tls("handshake failed".into());
        assert!(matches!(DbError::from(tls), DbError::ConnectionFailed(_)));
    }

    #[test]
    fn test_core_error_converts() {
        let err: DbError = CoreError::AmountOutOfRange {
            amount: "1".to_string(),
            scale: 4,
        }
        .into();
        assert!(matches!(err, DbError::InvalidData(_)));
    }
}
