//! # Repository Module
//!
//! Store (DAO) implementations for Pantry.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │                                                                 │
//! │       │  db.products().find_one(7)                                     │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── save(&self, &mut product)                                         │
//! │  ├── find_all(&self) / stream_all(&self)                               │
//! │  ├── find_one(&self, id)                                               │
//! │  ├── update(&self, &product)                                           │
//! │  └── remove(&self, &product)                                           │
//! │       │                                                                 │
//! │       │  Parameterized SQL + Row Mapper                                │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  SQL text lives only here; callers never see it.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and streaming
//! - [`AccountRepository`](account::AccountRepository) - Account inserts and lookups

pub mod account;
pub mod product;
