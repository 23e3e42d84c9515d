//! # Schema Initializer
//!
//! Creates tables from DDL scripts packaged with this crate.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Initialization                              │
//! │                                                                         │
//! │  init() / init_with("products.ddl")                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resource(name) ← DDL text embedded at compile time                    │
//! │       │                                                                 │
//! │       ├── unknown name? → DbError::ResourceNotFound                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Acquire one connection, execute the script as a single statement      │
//! │       │                                                                 │
//! │       ├── table exists / bad DDL → DbError::SchemaFailed               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Connection returned to the pool                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The scripts are plain `CREATE TABLE` statements, not migrations: running
//! one twice fails, and the caller decides whether that is fatal.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};

/// Well-known name of the account table script.
pub const DDL_FILE_NAME: &str = "init_db.ddl";

/// Name of the products table script.
pub const PRODUCTS_DDL_FILE_NAME: &str = "products.ddl";

/// DDL resources packaged into the binary, by name.
static RESOURCES: &[(&str, &str)] = &[
    (DDL_FILE_NAME, include_str!("../resources/init_db.ddl")),
    (PRODUCTS_DDL_FILE_NAME, include_str!("../resources/products.ddl")),
];

/// Looks up a packaged DDL resource by name.
pub fn resource(name: &str) -> DbResult<&'static str> {
    RESOURCES
        .iter()
        .find(|(resource_name, _)| *resource_name == name)
        .map(|(_, ddl)| *ddl)
        .ok_or_else(|| DbError::ResourceNotFound(name.to_string()))
}

/// Runs packaged DDL scripts against the pool.
#[derive(Debug, Clone)]
pub struct SchemaInitializer {
    pool: SqlitePool,
}

impl SchemaInitializer {
    /// Creates a new SchemaInitializer.
    pub fn new(pool: SqlitePool) -> Self {
        SchemaInitializer { pool }
    }

    /// Creates the `account` table from [`DDL_FILE_NAME`].
    pub async fn init(&self) -> DbResult<()> {
        self.init_with(DDL_FILE_NAME).await
    }

    /// Executes the named packaged script.
    pub async fn init_with(&self, name: &str) -> DbResult<()> {
        let ddl = resource(name)?;

        info!(resource = %name, "Creating schema");

        let mut conn = self.pool.acquire().await?;

        sqlx::query(ddl).execute(&mut *conn).await.map_err(|e| {
            warn!(resource = %name, error = %e, "Schema script failed");
            match e {
                sqlx::Error::Database(db_err) => DbError::SchemaFailed(db_err.message().to_string()),
                other => DbError::from(other),
            }
        })?;

        info!(resource = %name, "Schema created");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn table_exists(db: &Database, table: &str) -> bool {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table)
                .fetch_one(db.pool())
                .await
                .unwrap();
        count == 1
    }

    #[test]
    fn test_resource_lookup() {
        assert!(resource(DDL_FILE_NAME).unwrap().contains("account_email_uq"));
        assert!(resource(PRODUCTS_DDL_FILE_NAME).unwrap().contains("CREATE TABLE products"));
        assert!(matches!(resource("nope.ddl"), Err(DbError::ResourceNotFound(_))));
    }

    #[tokio::test]
    async fn test_init_creates_account_table() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.schema().init().await.unwrap();

        assert!(table_exists(&db, "account").await);
        assert!(!table_exists(&db, "products").await);
    }

    #[tokio::test]
    async fn test_account_columns_and_defaults() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.schema().init().await.unwrap();

        // balance is optional, creation_time defaults to now
        sqlx::query(
            "INSERT INTO account (email, first_name, last_name, gender, birthday) \
             VALUES ('a@b.c', 'A', 'B', 'MALE', '1990-01-01')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let (balance, created): (Option<i64>, Option<String>) =
            sqlx::query_as("SELECT balance, creation_time FROM account")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert!(balance.is_none());
        assert!(created.is_some());

        // email is mandatory
        let err = sqlx::query(
            "INSERT INTO account (first_name, last_name, gender, birthday) \
             VALUES ('A', 'B', 'MALE', '1990-01-01')",
        )
        .execute(db.pool())
        .await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.schema().init_with(PRODUCTS_DDL_FILE_NAME).await.unwrap();

        let err = db.schema().init_with(PRODUCTS_DDL_FILE_NAME).await.unwrap_err();
        assert!(matches!(err, DbError::SchemaFailed(ref msg) if msg.contains("already exists")));

        // The pool is still usable afterwards
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_unknown_resource_does_no_io() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let err = db.schema().init_with("missing.ddl").await.unwrap_err();
        assert!(matches!(err, DbError::ResourceNotFound(_)));
    }

    #[tokio::test]
    async fn test_init_on_closed_pool_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let err = db.schema().init().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }
}
