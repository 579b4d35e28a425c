//! # Validation Module
//!
//! Input validation used by the entity constructors.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Happens                           │
//! │                                                                         │
//! │  Construction time (THIS MODULE)                                       │
//! │  ├── Category / Product titles must not be empty                       │
//! │  ├── Prices, amounts and thresholds must not be negative               │
//! │  └── Rates must not be negative (above 100% is allowed)                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Pricing time (Cart)                                                   │
//! │  ├── No errors at all                                                  │
//! │  └── Guards instead: qty <= 0 ignored, empty cart → 0                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_core::money::Money;
//! use cart_core::validation::{validate_amount, validate_title};
//!
//! assert!(validate_title("title", "Apple").is_ok());
//! assert!(validate_amount("price", Money::from_cents(-1)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_TITLE_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display title (category or product).
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - Must be at most [`MAX_TITLE_LEN`] characters
pub fn validate_title(field: &str, title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a caller-supplied identifier.
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price, discount amount or threshold.
///
/// Zero is allowed (free items).
///
/// ```rust
/// use cart_core::money::Money;
/// use cart_core::validation::validate_amount;
///
/// assert!(validate_amount("price", Money::from_cents(1099)).is_ok());
/// assert!(validate_amount("price", Money::zero()).is_ok());
/// assert!(validate_amount("price", Money::from_cents(-100)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percentage. There is no upper bound.
pub fn validate_rate(percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "rate".to_string(),
        });
    }

    Ok(())
}

/// Validates the minimum quantity a campaign requires.
///
/// Zero is allowed: any matching item qualifies.
pub fn validate_min_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "min_quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("title", "food").is_ok());
        assert!(validate_title("title", "Almonds").is_ok());

        assert_eq!(
            validate_title("title", "   "),
            Err(ValidationError::Required {
                field: "title".to_string()
            })
        );
        assert!(validate_title("title", "").is_err());
        assert!(validate_title("title", &"A".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("food").is_ok());
        assert!(validate_id("").is_err());
        assert!(validate_id(" ").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("price", Money::zero()).is_ok());
        assert!(validate_amount("price", Money::from_major(100)).is_ok());
        assert!(validate_amount("price", Money::new(Decimal::new(5, 3))).is_ok());
        assert!(validate_amount("price", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate(Decimal::ZERO).is_ok());
        assert!(validate_rate(Decimal::from(20)).is_ok());
        assert!(validate_rate(Decimal::new(125, 1)).is_ok());
        assert!(validate_rate(Decimal::from(150)).is_ok());
        assert_eq!(
            validate_rate(Decimal::new(-1, 1)),
            Err(ValidationError::MustBeNonNegative {
                field: "rate".to_string()
            })
        );
    }

    #[test]
    fn test_validate_min_quantity() {
        assert!(validate_min_quantity(0).is_ok());
        assert!(validate_min_quantity(5).is_ok());
        assert!(validate_min_quantity(-1).is_err());
    }
}
