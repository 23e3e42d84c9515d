//! # Product Repository
//!
//! Create/read/update/delete for the `products` table.
//!
//! ## Scoped Connections
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Operation, One Connection                        │
//! │                                                                         │
//! │  update(&product)                                                      │
//! │       │                                                                 │
//! │       ├── product.id is None? → DbError::MissingId (no I/O at all)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pool.acquire() ──► PoolConnection                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE products SET ... WHERE id = ?   (parameters bound, never       │
//! │       │                                  formatted into the SQL)       │
//! │       ├── 0 rows affected → DbError::NotFound                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PoolConnection dropped → back to the pool (on every return path)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::mapper::{bind_params, insert_params, product_from_row, update_params};
use crate::stream::ProductStream;
use pantry_core::money::{fits_scale, round_to_scale, PRICE_SCALE};
use pantry_core::Product;

pub const SAVE_PRODUCT_SQL: &str = "INSERT INTO products (name, producer, price, expiration_date) \
     VALUES (?, ?, ?, ?) RETURNING id, creation_time";
pub const FIND_ALL_PRODUCTS_SQL: &str = "SELECT * FROM products";
pub const FIND_PRODUCT_BY_ID_SQL: &str = "SELECT * FROM products WHERE id = ?";
pub const UPDATE_PRODUCT_SQL: &str =
    "UPDATE products SET name = ?, producer = ?, price = ?, expiration_date = ? WHERE id = ?";
pub const REMOVE_PRODUCT_SQL: &str = "DELETE FROM products WHERE id = ?";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let mut milk = Product::new("Milk", "Dairy Co", price, expires);
/// repo.save(&mut milk).await?;          // milk.id is now Some(..)
///
/// let same = repo.find_one(milk.id.unwrap()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and writes the generated `id` and
    /// `creation_time` back into it.
    ///
    /// `price` is replaced by the stored value, rounded half to even to four
    /// fractional digits, so the record equals what `find_one` returns.
    ///
    /// ## Returns
    /// * `Ok(())` - `product` now carries its database identity
    /// * `Err(DbError::AlreadyPersisted)` - `product.id` was already set
    /// * `Err(DbError::MissingGeneratedKey)` - insert returned no key
    pub async fn save(&self, product: &mut Product) -> DbResult<()> {
        if let Some(id) = product.id {
            return Err(DbError::AlreadyPersisted {
                entity: "Product".to_string(),
                id,
            });
        }

        let params = insert_params(product)?;
        let stored_price = round_to_scale(product.price)?;

        debug!(name = %product.name, producer = %product.producer, "Saving product");

        let mut conn = self.pool.acquire().await?;

        // Step the statement to completion before reading the returned key
        let row = bind_params(sqlx::query(SAVE_PRODUCT_SQL), params)
            .fetch_all(&mut *conn)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::MissingGeneratedKey {
                entity: "Product".to_string(),
            })?;

        let id: i64 = row.try_get("id")?;
        product.id = Some(id);
        product.price = stored_price;
        product.creation_time = Some(row.try_get("creation_time")?);

        debug!(id = %id, "Product saved");
        Ok(())
    }

    /// Loads every product, in result-set order.
    ///
    /// Materializes the whole table; see [`stream_all`](Self::stream_all)
    /// for the lazy form.
    pub async fn find_all(&self) -> DbResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(FIND_ALL_PRODUCTS_SQL)
            .fetch_all(&mut *conn)
            .await?;

        let products = rows.iter().map(product_from_row).collect::<DbResult<Vec<_>>>()?;

        debug!(count = products.len(), "Loaded all products");
        Ok(products)
    }

    /// Streams every product, mapping one row per poll.
    ///
    /// The stream holds a pooled connection until it ends or is dropped.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let mut products = repo.stream_all();
    /// while let Some(product) = products.try_next().await? {
    ///     println!("{}", product.name);
    /// }
    /// ```
    pub fn stream_all(&self) -> ProductStream<'_> {
        debug!("Streaming all products");
        ProductStream::new(sqlx::query(FIND_ALL_PRODUCTS_SQL).fetch(&self.pool))
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn find_one(&self, id: i64) -> DbResult<Product> {
        debug!(id = %id, "Finding product");

        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query(FIND_PRODUCT_BY_ID_SQL)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        product_from_row(&row)
    }

    /// Updates every mutable column of an existing product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::MissingId)` - Product was never saved (no I/O done)
    /// * `Err(DbError::InvalidData)` - Price has more than four fractional
    ///   digits and would not read back equal (no I/O done)
    /// * `Err(DbError::NotFound)` - No row with this id
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        let id = require_id(product)?;

        if !fits_scale(product.price) {
            return Err(DbError::InvalidData(format!(
                "Price {} has more than {} fractional digits",
                product.price, PRICE_SCALE
            )));
        }
        let params = update_params(product)?;

        debug!(id = %id, "Updating product");

        let mut conn = self.pool.acquire().await?;

        let result = bind_params(sqlx::query(UPDATE_PRODUCT_SQL), params)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes an existing product.
    ///
    /// The in-memory `product` keeps its id but no longer has a row.
    ///
    /// ## Returns
    /// * `Ok(())` - Row deleted
    /// * `Err(DbError::MissingId)` - Product was never saved (no I/O done)
    /// * `Err(DbError::NotFound)` - No row with this id
    pub async fn remove(&self, product: &Product) -> DbResult<()> {
        let id = require_id(product)?;

        debug!(id = %id, "Removing product");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(REMOVE_PRODUCT_SQL)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts stored products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn require_id(product: &Product) -> DbResult<i64> {
    product.id.ok_or_else(|| DbError::missing_id("Product"))
}

// =============================================================================
// Unit Tests
// =============================================================================
