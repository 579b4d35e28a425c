//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  THE ROUNDING PROBLEM                                                   │
//! │  Rounding every intermediate step to cents drifts:                      │
//! │    15% of 2.97 = 0.4455, 10% of the rest = 0.25245                      │
//! │                                                                         │
//! │  OUR SOLUTION: exact base-10 decimals (rust_decimal)                   │
//! │    every step is carried exactly, rounding happens only when the       │
//! │    amount is displayed                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_core::money::Money;
//!
//! let price = Money::from_cents(299);   // 2.99
//! let line_total = price * 3;           // 8.97
//! assert_eq!(line_total, Money::from_cents(897));
//! assert_eq!(line_total.to_string(), "8.97");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::DiscountRate;

/// Decimal places shown when an amount is displayed.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary value.
///
/// ## Design Decisions
/// - **Decimal, not integer cents**: rate discounts on sub-cent amounts stay
///   exact, e.g. 50% of 0.01 is 0.005, not a rounded cent
/// - **Signed**: a total after discounts may legitimately go below zero
///   when an amount campaign is larger than the goods it applies to
/// - **Saturating arithmetic**: absurd quantities clamp at the largest
///   representable amount instead of panicking or wrapping
/// - **Serialized as a decimal string**: `{"price": "100.00"}` in JSON
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► CartItem.line_total ──► Cart.items_amount           │
/// │                                                │                        │
/// │                           campaign_discount ◄──┤                        │
/// │                           coupon_discount   ◄──┤                        │
/// │                                                ▼                        │
/// │                            Cart.total_amount_after_discounts           │
/// │                                                                         │
/// │  DeliveryCostCalculator ──► cost_per_delivery / per_product / fixed    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub fn from_major(major: i64) -> Self {
        Money(Decimal::from(major))
    }

    /// Returns the exact amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the portion of this amount described by `rate`, exactly.
    ///
    /// ```rust
    /// use cart_core::money::Money;
    /// use cart_core::types::DiscountRate;
    ///
    /// let amount = Money::from_major(450);
    /// assert_eq!(amount.portion(DiscountRate::from_percent(20)), Money::from_major(90));
    ///
    /// // 50% of one cent stays half a cent
    /// let half = Money::from_cents(1).portion(DiscountRate::from_percent(50));
    /// assert_eq!(half, Money::from_cents(1) - half);
    /// ```
    pub fn portion(&self, rate: DiscountRate) -> Money {
        Money(self.0.saturating_mul(rate.percent()) / Decimal::ONE_HUNDRED)
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use cart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_cents(897));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// The amount rounded for display (half away from zero, two places).
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Rounded decimal rendering (`450.00`, `-5.50`).
///
/// Currency symbols are a presentation concern and are added by the caller.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Multiplication by a quantity or a count.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
