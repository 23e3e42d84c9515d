//! # Money Module
//!
//! Converts monetary [`Decimal`] values to and from the integer form they are
//! stored in.
//!
//! ## Why Integer Minor Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SQLite has no exact DECIMAL storage class                              │
//! │                                                                         │
//! │  DECIMAL(19, 4) column + "12.3456" text  →  stored as REAL 12.3456     │
//! │                                            (binary float, inexact)      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer ten-thousandths                                  │
//! │    12.3456  →  123_456   (INTEGER, exact)                              │
//! │    123_456  →  12.3456   (Decimal, scale 4)                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts with more than [`PRICE_SCALE`] fractional digits are rounded with
//! Bankers Rounding (half to even) before conversion.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CoreError, CoreResult};

/// Number of fractional digits kept in storage.
pub const PRICE_SCALE: u32 = 4;

/// Converts an amount to integer minor units (ten-thousandths).
///
/// ## Example
/// ```rust
/// use pantry_core::money::to_minor_units;
/// use rust_decimal::Decimal;
///
/// assert_eq!(to_minor_units(Decimal::new(1999, 2)).unwrap(), 199_900);
/// ```
pub fn to_minor_units(amount: Decimal) -> CoreResult<i64> {
    let mut rounded = amount.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(PRICE_SCALE);

    // rescale gives up silently when the mantissa would overflow 96 bits
    if rounded.scale() != PRICE_SCALE {
        return Err(out_of_range(amount));
    }

    i64::try_from(rounded.mantissa()).map_err(|_| out_of_range(amount))
}

/// Converts integer minor units back to an amount with scale [`PRICE_SCALE`].
#[inline]
pub fn from_minor_units(units: i64) -> Decimal {
    Decimal::new(units, PRICE_SCALE)
}

/// The amount as it reads back from storage: rounded half to even to
/// [`PRICE_SCALE`] fractional digits.
///
/// ```rust
/// use pantry_core::money::round_to_scale;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_to_scale(Decimal::new(123_456, 5)).unwrap(), Decimal::new(12_346, 4));
/// ```
pub fn round_to_scale(amount: Decimal) -> CoreResult<Decimal> {
    to_minor_units(amount).map(from_minor_units)
}

/// Whether the amount is stored without rounding.
pub fn fits_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= PRICE_SCALE
}

fn out_of_range(amount: Decimal) -> CoreError {
    CoreError::AmountOutOfRange {
        amount: amount.to_string(),
        scale: PRICE_SCALE,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_whole_and_fractional_amounts() {
        assert_eq!(to_minor_units(Decimal::from(3)).unwrap(), 30_000);
        assert_eq!(to_minor_units(Decimal::from_str("12.3456").unwrap()).unwrap(), 123_456);
        assert_eq!(to_minor_units(Decimal::from_str("0.5").unwrap()).unwrap(), 5_000);
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(to_minor_units(Decimal::from_str("-1.25").unwrap()).unwrap(), -12_500);
    }

    #[test]
    fn test_bankers_rounding_beyond_scale() {
        // 0.00005 → 0.0000 (round half to even)
        assert_eq!(to_minor_units(Decimal::from_str("0.00005").unwrap()).unwrap(), 0);
        // 0.00015 → 0.0002
        assert_eq!(to_minor_units(Decimal::from_str("0.00015").unwrap()).unwrap(), 2);
        // 1.23456 → 1.2346
        assert_eq!(to_minor_units(Decimal::from_str("1.23456").unwrap()).unwrap(), 12_346);
    }

    #[test]
    fn test_out_of_range() {
        let err = to_minor_units(Decimal::MAX).unwrap_err();
        assert!(matches!(err, CoreError::AmountOutOfRange { scale: 4, .. }));

        // Fits in 96 bits at scale 4, but not in i64
        let too_big = Decimal::from(i64::MAX);
        assert!(to_minor_units(too_big).is_err());
    }

    #[test]
    fn test_from_minor_units() {
        let amount = from_minor_units(123_456);
        assert_eq!(amount, Decimal::from_str("12.3456").unwrap());
        assert_eq!(amount.scale(), PRICE_SCALE);

        // Numeric equality ignores trailing zeros
        assert_eq!(from_minor_units(125_000), Decimal::from_str("12.5").unwrap());
    }

    #[test]
    fn test_round_to_scale() {
        let stored = round_to_scale(Decimal::from_str("1.23456").unwrap()).unwrap();
        assert_eq!(stored, Decimal::from_str("1.2346").unwrap());
        assert_eq!(stored.scale(), PRICE_SCALE);

        assert_eq!(
            round_to_scale(Decimal::from_str("0.99").unwrap()).unwrap(),
            Decimal::from_str("0.99").unwrap()
        );
        assert!(round_to_scale(Decimal::MAX).is_err());
    }

    #[test]
    fn test_fits_scale() {
        assert!(fits_scale(Decimal::from_str("1.2345").unwrap()));
        assert!(fits_scale(Decimal::from_str("1.234500").unwrap()));
        assert!(fits_scale(Decimal::from(7)));
        assert!(!fits_scale(Decimal::from_str("1.23456").unwrap()));
    }
}
