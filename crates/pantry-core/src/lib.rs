//! # pantry-core: Pure Domain Types for Pantry
//!
//! This crate holds the domain records persisted by `pantry-db` and the
//! fixed-point conversion used to store prices. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pantry Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ pantry-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │   error   │                  │   │
//! │  │   │  Product  │  │ minor     │  │ CoreError │                  │   │
//! │  │   │  Account  │  │ units     │  │           │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pantry-db (Database Layer)                   │   │
//! │  │         SQLite pool, schema, row mapping, stores                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Account, Gender)
//! - [`money`] - Decimal <-> integer minor unit conversion (scale 4)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pantry_core::money::{from_minor_units, to_minor_units};
//! use pantry_core::Product;
//! use rust_decimal::Decimal;
//!
//! let expires = NaiveDate::from_ymd_opt(2030, 1, 31).unwrap();
//! let milk = Product::new("Milk", "Dairy Co", Decimal::new(129, 2), expires);
//! assert!(!milk.is_persisted());
//!
//! // $1.29 is stored as 12_900 ten-thousandths
//! let units = to_minor_units(milk.price).unwrap();
//! assert_eq!(units, 12_900);
//! assert_eq!(from_minor_units(units), milk.price);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use types::*;
