//! # Account Repository
//!
//! Inserts and lookups for the `account` table created by
//! [`SchemaInitializer::init`](crate::schema::SchemaInitializer::init).
//!
//! The table enforces a unique email (`account_email_uq`); a duplicate
//! insert surfaces as [`DbError::UniqueViolation`] and leaves the table as
//! it was.

use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::mapper::{account_from_row, account_params, bind_params};
use pantry_core::money::round_to_scale;
use pantry_core::Account;

pub const SAVE_ACCOUNT_SQL: &str = "INSERT INTO account \
     (email, first_name, last_name, gender, birthday, balance) \
     VALUES (?, ?, ?, ?, ?, ?) RETURNING id, creation_time";
pub const FIND_ACCOUNT_BY_EMAIL_SQL: &str = "SELECT * FROM account WHERE email = ?";

/// Repository for account database operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Creates a new AccountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Inserts a new account and writes the generated `id` and
    /// `creation_time` back into it.
    ///
    /// ## Returns
    /// * `Ok(())` - Account saved
    /// * `Err(DbError::UniqueViolation)` - Email already taken
    pub async fn save(&self, account: &mut Account) -> DbResult<()> {
        if let Some(id) = account.id {
            return Err(DbError::AlreadyPersisted {
                entity: "Account".to_string(),
                id,
            });
        }

        let params = account_params(account)?;
        let stored_balance = account.balance.map(round_to_scale).transpose()?;

        debug!(email = %account.email, "Saving account");

        let mut conn = self.pool.acquire().await?;

        let rows = bind_params(sqlx::query(SAVE_ACCOUNT_SQL), params)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &account.email),
                other => other,
            })?;

        let row = rows.into_iter().next().ok_or_else(|| DbError::MissingGeneratedKey {
            entity: "Account".to_string(),
        })?;

        account.id = Some(row.try_get("id")?);
        account.balance = stored_balance;
        account.creation_time = Some(row.try_get("creation_time")?);
        Ok(())
    }

    /// Gets an account by email.
    ///
    /// ## Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with this email
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Account>> {
        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query(FIND_ACCOUNT_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(account_from_row).transpose()
    }

    /// Counts stored accounts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use pantry_core::Gender;
    use rust_decimal::Decimal;

    async fn setup() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.schema().init().await.unwrap();
        db
    }

    fn ada() -> Account {
        Account::new(
            "ada@example.com",
            "Ada",
            "Lovelace",
            Gender::Female,
            NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_save_and_find_by_email() {
        let db = setup().await;
        let mut account = ada().with_balance(Decimal::new(1_050_25, 2));

        db.accounts().save(&mut account).await.unwrap();
        assert!(account.id.is_some());

        let found = db.accounts().find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(found, account);
        assert_eq!(found.gender, Gender::Female);
        assert_eq!(found.balance, Some(Decimal::new(1_050_25, 2)));
    }

    #[tokio::test]
    async fn test_balance_is_optional() {
        let db = setup().await;
        let mut account = ada();

        db.accounts().save(&mut account).await.unwrap();

        let found = db.accounts().find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(found.balance, None);
    }

    #[tokio::test]
    async fn test_balance_is_rounded_to_stored_value() {
        let db = setup().await;
        let mut account = ada().with_balance(Decimal::new(1_000_005, 5));

        db.accounts().save(&mut account).await.unwrap();

        assert_eq!(account.balance, Some(Decimal::new(100_000, 4)));
        let found = db.accounts().find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(found, account);
    }

    #[tokio::test]
    async fn test_find_by_unknown_email() {
        let db = setup().await;

        assert!(db.accounts().find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let db = setup().await;
        let mut first = ada();
        db.accounts().save(&mut first).await.unwrap();

        let mut second = ada();
        second.first_name = "Augusta".to_string();
        let err = db.accounts().save(&mut second).await.unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "account.email");
                assert_eq!(value, "ada@example.com");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
        assert!(second.id.is_none());

        // The table still holds exactly the first account
        assert_eq!(db.accounts().count().await.unwrap(), 1);
        let stored = db.accounts().find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(stored, first);
    }
}
