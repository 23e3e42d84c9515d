//! # Lazy Row Stream
//!
//! Forward-only stream of mapped products over a live SQLite cursor.
//!
//! ## Pull Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stream.next().await                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cursor.poll_next() ── one row ──► product_from_row() ──► Some(Ok(p))  │
//! │       │                                                                 │
//! │       ├── no more rows ─────────────────────────────────► None         │
//! │       │                                                                 │
//! │       └── read / decode error ──────────────────────────► Some(Err(e)) │
//! │                                                      then None forever  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The underlying cursor owns a pooled connection from its first poll until
//! it is exhausted or the stream is dropped; either way the connection goes
//! back to the pool.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{BoxStream, Stream};
use pantry_core::Product;
use sqlx::sqlite::SqliteRow;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::mapper::product_from_row;

/// Lazily maps one `products` row per poll.
///
/// Not restartable: once it has returned `None` it keeps returning `None`.
pub struct ProductStream<'a> {
    rows: Option<BoxStream<'a, Result<SqliteRow, sqlx::Error>>>,
    yielded: usize,
}

impl<'a> ProductStream<'a> {
    /// Wraps an open row cursor.
    pub fn new(rows: BoxStream<'a, Result<SqliteRow, sqlx::Error>>) -> Self {
        ProductStream {
            rows: Some(rows),
            yielded: 0,
        }
    }

    /// Whether the stream has ended (exhausted or failed).
    pub fn is_finished(&self) -> bool {
        self.rows.is_none()
    }

    /// Number of products produced so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    fn finish(&mut self) {
        // Dropping the cursor releases its connection immediately
        if self.rows.take().is_some() {
            debug!(count = self.yielded, "Product stream finished");
        }
    }
}

impl Stream for ProductStream<'_> {
    type Item = DbResult<Product>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        let Some(rows) = this.rows.as_mut() else {
            return Poll::Ready(None);
        };

        match rows.as_mut().poll_next(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(None) => {
                this.finish();
                Poll::Ready(None)
            }
            Poll::Ready(Some(Ok(row))) => match product_from_row(&row) {
                Ok(product) => {
                    this.yielded += 1;
                    Poll::Ready(Some(Ok(product)))
                }
                Err(e) => {
                    this.finish();
                    Poll::Ready(Some(Err(e)))
                }
            },
            Poll::Ready(Some(Err(e))) => {
                this.finish();
                Poll::Ready(Some(Err(DbError::from(e))))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.rows {
            Some(_) => (0, None),
            None => (0, Some(0)),
        }
    }
}

impl std::fmt::Debug for ProductStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductStream")
            .field("finished", &self.is_finished())
            .field("yielded", &self.yielded)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{stream, StreamExt};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn product_row(pool: &SqlitePool, id: i64) -> SqliteRow {
        sqlx::query(
            "SELECT ? AS id, 'Oats' AS name, 'Mill' AS producer, 10000 AS price, \
             '2030-01-01' AS expiration_date, '2024-01-01 00:00:00' AS creation_time",
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_yields_rows_then_stays_ended() {
        let pool = pool().await;
        let rows = vec![Ok(product_row(&pool, 1).await), Ok(product_row(&pool, 2).await)];

        let mut products = ProductStream::new(stream::iter(rows).boxed());

        assert_eq!(products.next().await.unwrap().unwrap().id, Some(1));
        assert_eq!(products.next().await.unwrap().unwrap().id, Some(2));
        assert!(products.next().await.is_none());
        assert!(products.next().await.is_none());
        assert!(products.is_finished());
        assert_eq!(products.yielded(), 2);
    }

    #[tokio::test]
    async fn test_read_error_is_surfaced_once() {
        let pool = pool().await;
        let rows = vec![
            Ok(product_row(&pool, 1).await),
            Err(sqlx::Error::PoolClosed),
            Ok(product_row(&pool, 3).await),
        ];

        let mut products = ProductStream::new(stream::iter(rows).boxed());

        assert!(products.next().await.unwrap().is_ok());
        assert!(matches!(
            products.next().await,
            Some(Err(DbError::ConnectionFailed(_)))
        ));
        // Rows after a failure are never produced
        assert!(products.next().await.is_none());
        assert_eq!(products.yielded(), 1);
    }

    #[tokio::test]
    async fn test_mapping_error_ends_stream() {
        let pool = pool().await;
        let bad = sqlx::query("SELECT 1 AS id").fetch_one(&pool).await.unwrap();

        let mut products = ProductStream::new(stream::iter(vec![Ok(bad)]).boxed());

        assert!(matches!(products.next().await, Some(Err(DbError::InvalidData(_)))));
        assert!(products.next().await.is_none());
    }
}
