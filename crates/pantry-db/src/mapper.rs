//! # Row Mapper
//!
//! Hand-written mapping between domain records and SQL rows.
//!
//! ## Two Directions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Product ──insert_params()──► [name, producer, price, expiration_date] │
//! │  Product ──update_params()──► [name, producer, price, expiration_date, │
//! │                                id]                                      │
//! │                                  │                                      │
//! │                                  ▼  bind_params()                       │
//! │                        ? placeholders, in order                         │
//! │                                                                         │
//! │  SqliteRow ──product_from_row()──► Product                             │
//! │    id, name, producer, price, expiration_date, creation_time           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices travel as integer minor units (see [`pantry_core::money`]).
//! Parameter lists are plain values so the order can be checked without a
//! database.

use chrono::{NaiveDate, NaiveDateTime};
use pantry_core::money::{from_minor_units, to_minor_units};
use pantry_core::{Account, Gender, Product};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite};

use crate::error::{DbError, DbResult};

/// One positional statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    Null,
}

/// Parameters for `INSERT INTO products (name, producer, price, expiration_date)`.
pub fn insert_params(product: &Product) -> DbResult<Vec<SqlParam>> {
    Ok(vec![
        SqlParam::Text(product.name.clone()),
        SqlParam::Text(product.producer.clone()),
        SqlParam::Integer(to_minor_units(product.price)?),
        SqlParam::Date(product.expiration_date),
    ])
}

/// Parameters for `UPDATE products SET ... WHERE id = ?`: the insert
/// parameters with the id appended last.
pub fn update_params(product: &Product) -> DbResult<Vec<SqlParam>> {
    let id = product.id.ok_or_else(|| DbError::missing_id("Product"))?;

    let mut params = insert_params(product)?;
    params.push(SqlParam::Integer(id));
    Ok(params)
}

/// Binds parameters onto a query in list order.
pub fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: Vec<SqlParam>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlParam::Text(value) => query.bind(value),
            SqlParam::Integer(value) => query.bind(value),
            SqlParam::Date(value) => query.bind(value),
            SqlParam::Null => query.bind(None::<i64>),
        };
    }
    query
}

/// Builds a fully populated product from a `products` row.
pub fn product_from_row(row: &SqliteRow) -> DbResult<Product> {
    let price: i64 = row.try_get("price")?;
    let creation_time: NaiveDateTime = row.try_get("creation_time")?;

    Ok(Product {
        id: Some(row.try_get("id")?),
        name: row.try_get("name")?,
        producer: row.try_get("producer")?,
        price: from_minor_units(price),
        expiration_date: row.try_get("expiration_date")?,
        creation_time: Some(creation_time),
    })
}

/// Parameters for `INSERT INTO account (email, first_name, last_name,
/// gender, birthday, balance)`.
pub fn account_params(account: &Account) -> DbResult<Vec<SqlParam>> {
    let balance = match account.balance {
        Some(balance) => SqlParam::Integer(to_minor_units(balance)?),
        None => SqlParam::Null,
    };

    Ok(vec![
        SqlParam::Text(account.email.clone()),
        SqlParam::Text(account.first_name.clone()),
        SqlParam::Text(account.last_name.clone()),
        SqlParam::Text(account.gender.as_str().to_string()),
        SqlParam::Date(account.birthday),
        balance,
    ])
}

/// Builds an account from an `account` row.
pub fn account_from_row(row: &SqliteRow) -> DbResult<Account> {
    let balance: Option<i64> = row.try_get("balance")?;
    let gender: Gender = row.try_get("gender")?;

    Ok(Account {
        id: Some(row.try_get("id")?),
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        gender,
        birthday: row.try_get("birthday")?,
        balance: balance.map(from_minor_units),
        creation_time: Some(row.try_get("creation_time")?),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
