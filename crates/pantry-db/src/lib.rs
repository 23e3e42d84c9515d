//! # pantry-db: Database Layer for Pantry
//!
//! Data access for products and accounts over a pooled SQLite database,
//! using sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pantry Data Flow                                 │
//! │                                                                         │
//! │  Caller (db.products().save(&mut product))                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     pantry-db (THIS CRATE)                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │   Database    │    │  Repositories │    │    Schema    │    │    │
//! │  │   │   (pool.rs)   │    │ (product.rs)  │    │  (schema.rs) │    │    │
//! │  │   │               │    │               │    │              │    │    │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ init_db.ddl  │    │    │
//! │  │   │ DbConfig      │    │ AccountRepo   │    │ products.ddl │    │    │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘    │    │
//! │  │                                │                                │    │
//! │  │                  ┌─────────────┴──────────────┐                 │    │
//! │  │                  │ mapper.rs    stream.rs     │                 │    │
//! │  │                  │ Row Mapper   ProductStream │                 │    │
//! │  │                  └────────────────────────────┘                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`schema`] - Table creation from packaged DDL scripts
//! - [`mapper`] - Row <-> entity mapping
//! - [`stream`] - Lazy product stream
//! - [`error`] - Database error types
//! - [`repository`] - Store implementations (product, account)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pantry_db::{Database, DbConfig, PRODUCTS_DDL_FILE_NAME};
//!
//! let db = Database::new(DbConfig::new("path/to/pantry.db")).await?;
//! db.schema().init_with(PRODUCTS_DDL_FILE_NAME).await?;
//!
//! let mut product = Product::new("Milk", "Dairy Co", price, expires);
//! db.products().save(&mut product).await?;
//! let all = db.products().find_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod mapper;
pub mod pool;
pub mod repository;
pub mod schema;
pub mod stream;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use schema::{SchemaInitializer, DDL_FILE_NAME, PRODUCTS_DDL_FILE_NAME};
pub use stream::ProductStream;

// Repository re-exports for convenience
pub use repository::account::AccountRepository;
pub use repository::product::ProductRepository;
