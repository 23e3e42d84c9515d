//! # Error Types
//!
//! Domain-specific error types for pantry-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pantry-core errors (this file)                                        │
//! │  └── CoreError        - Values the domain cannot represent             │
//! │                                                                         │
//! │  pantry-db errors (separate crate)                                     │
//! │  └── DbError          - Store operation failures                       │
//! │                                                                         │
//! │  Flow: CoreError → DbError::InvalidData → caller                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A monetary amount does not fit the stored fixed-point range.
    ///
    /// ## When This Occurs
    /// - Price or balance larger than `i64::MAX` ten-thousandths
    #[error("Amount {amount} is out of range for scale {scale}")]
    AmountOutOfRange { amount: String, scale: u32 },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AmountOutOfRange {
            amount: "1e30".to_string(),
            scale: 4,
        };
        assert_eq!(err.to_string(), "Amount 1e30 is out of range for scale 4");
    }
}
