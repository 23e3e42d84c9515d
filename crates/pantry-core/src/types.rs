//! # Domain Types
//!
//! Records persisted by the pantry stores.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐         ┌─────────────────────┐               │
//! │  │      Product        │         │      Account        │               │
//! │  │  ─────────────────  │         │  ─────────────────  │               │
//! │  │  id (generated)     │         │  id (generated)     │               │
//! │  │  name, producer     │         │  email (unique)     │               │
//! │  │  price (Decimal)    │         │  first/last name    │               │
//! │  │  expiration_date    │         │  gender, birthday   │               │
//! │  │  creation_time (db) │         │  balance (optional) │               │
//! │  └─────────────────────┘         └─────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is `None` until the record is saved; the store assigns it from the
//! database-generated key and never changes it afterwards. Two records are
//! the same entity when both ids are assigned and equal.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A product kept in the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Database-generated identifier. `None` while transient.
    pub id: Option<i64>,

    pub name: String,

    pub producer: String,

    /// Unit price, stored with four fractional digits.
    pub price: Decimal,

    /// Date only, no time component.
    pub expiration_date: NaiveDate,

    /// Set by the database at insert time; never written by callers.
    pub creation_time: Option<NaiveDateTime>,
}

impl Product {
    /// Creates a transient product (no id, no creation time).
    pub fn new(
        name: impl Into<String>,
        producer: impl Into<String>,
        price: Decimal,
        expiration_date: NaiveDate,
    ) -> Self {
        Product {
            id: None,
            name: name.into(),
            producer: producer.into(),
            price,
            expiration_date,
            creation_time: None,
        }
    }

    /// Whether the product has been assigned a database id.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Business identity: both ids assigned and equal.
    pub fn same_identity(&self, other: &Product) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

// =============================================================================
// Gender
// =============================================================================

/// Account gender, stored as upper-case text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

// =============================================================================
// Account
// =============================================================================

/// An account kept in the `account` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Database-generated identifier. `None` while transient.
    pub id: Option<i64>,
    /// Unique across all accounts.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    /// Optional; stored with four fractional digits.
    pub balance: Option<Decimal>,
    pub creation_time: Option<NaiveDateTime>,
}

impl Account {
    /// Creates a transient account with no balance.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
        birthday: NaiveDate,
    ) -> Self {
        Account {
            id: None,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
            birthday,
            balance: None,
            creation_time: None,
        }
    }

    /// Sets the opening balance.
    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = Some(balance);
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_product_is_transient() {
        let product = Product::new("Yogurt", "Dairy Co", Decimal::new(199, 2), date(2030, 5, 1));
        assert!(!product.is_persisted());
        assert!(product.creation_time.is_none());
    }

    #[test]
    fn test_identity_requires_assigned_ids() {
        let a = Product::new("Yogurt", "Dairy Co", Decimal::new(199, 2), date(2030, 5, 1));
        let b = a.clone();
        // Transient products have no identity, even when field-equal
        assert_eq!(a, b);
        assert!(!a.same_identity(&b));

        let mut saved = a.clone();
        saved.id = Some(7);
        let mut renamed = saved.clone();
        renamed.name = "Greek Yogurt".to_string();
        assert!(saved.same_identity(&renamed));
        assert_ne!(saved, renamed);

        let mut other = saved.clone();
        other.id = Some(8);
        assert!(!saved.same_identity(&other));
    }

    #[test]
    fn test_gender_text() {
        assert_eq!(Gender::Male.as_str(), "MALE");
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"FEMALE\"");
    }

    #[test]
    fn test_account_builder() {
        let account = Account::new("ada@example.com", "Ada", "Lovelace", Gender::Female, date(1815, 12, 10))
            .with_balance(Decimal::new(10_000, 2));
        assert_eq!(account.balance, Some(Decimal::new(100, 0)));
        assert!(account.id.is_none());
    }
}
