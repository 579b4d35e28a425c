//! # Domain Types
//!
//! Value types the cart prices: categories, products, campaigns, coupons and
//! the discount vocabulary they share.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│     Product     │   │    Campaign     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  category ──────┼──►    │
//! │  │  title          │   │  title          │   │  discount       │       │
//! │  │  parent?        │   │  price          │   │  min_quantity   │       │
//! │  │  delivery_cost  │   │  category       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRate   │   │    Discount     │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  percent        │   │  Rate(rate)     │   │  min_amount     │       │
//! │  │  12.5 = 12.5%   │   │  Amount(money)  │   │  discount       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Categories and products are compared by `id` only. Two products with the
//! same title, price and category but different ids are different line
//! items. Ids are UUID v4 unless the caller supplies its own key through
//! `with_id`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

use crate::money::Money;
use crate::validation::{
    validate_amount, validate_id, validate_min_quantity, validate_rate, validate_title,
    ValidationResult,
};

// =============================================================================
// Discount Rate
// =============================================================================

/// A percentage, held as an exact decimal (`20` is 20%, `12.5` is 12.5%).
///
/// Rates above 100% are representable; only negative rates are rejected,
/// and that happens in [`Discount::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    /// Creates a rate from a decimal percentage.
    #[inline]
    pub const fn new(percent: Decimal) -> Self {
        DiscountRate(percent)
    }

    /// Creates a rate from whole percent (20 → 20%).
    #[inline]
    pub fn from_percent(percent: u32) -> Self {
        DiscountRate(Decimal::from(percent))
    }

    /// Returns the percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(Decimal::ZERO)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Renders as a percentage: `20%`, `12.5%`.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percentage of a base amount.
    Rate,
    /// Fixed absolute deduction.
    Amount,
}

impl DiscountType {
    /// Cosmetic label shown on printed summaries.
    pub const fn label(&self) -> &'static str {
        match self {
            DiscountType::Rate => "Oran",
            DiscountType::Amount => "Tutar",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Rate => write!(f, "rate"),
            DiscountType::Amount => write!(f, "amount"),
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A discount value tagged with its type.
///
/// Serialized as `{"type": "rate", "value": "20"}` or
/// `{"type": "amount", "value": "5.00"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the base the discount applies to.
    Rate(DiscountRate),
    /// Fixed deduction, independent of the base.
    Amount(Money),
}

impl Discount {
    /// Shorthand for a whole-percent rate discount.
    pub fn percent(percent: u32) -> Self {
        Discount::Rate(DiscountRate::from_percent(percent))
    }

    /// Shorthand for an amount discount in cents.
    pub fn cents(cents: i64) -> Self {
        Discount::Amount(Money::from_cents(cents))
    }

    /// Returns the discount type tag.
    pub const fn kind(&self) -> DiscountType {
        match self {
            Discount::Rate(_) => DiscountType::Rate,
            Discount::Amount(_) => DiscountType::Amount,
        }
    }

    /// Resolves the discount against `base`.
    ///
    /// ```rust
    /// use cart_core::money::Money;
    /// use cart_core::types::Discount;
    ///
    /// let base = Money::from_major(450);
    /// assert_eq!(Discount::percent(10).amount_on(base), Money::from_major(45));
    /// assert_eq!(Discount::cents(1000).amount_on(base), Money::from_major(10));
    /// ```
    pub fn amount_on(&self, base: Money) -> Money {
        match self {
            Discount::Rate(rate) => base.portion(*rate),
            Discount::Amount(amount) => *amount,
        }
    }

    /// Checks neither the rate nor the amount is negative.
    pub fn validate(&self) -> ValidationResult<()> {
        match self {
            Discount::Rate(rate) => validate_rate(rate.percent()),
            Discount::Amount(amount) => validate_amount("discount", *amount),
        }
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discount::Rate(rate) => write!(f, "{} ({})", rate, DiscountType::Rate.label()),
            Discount::Amount(amount) => write!(f, "{} ({})", amount, DiscountType::Amount.label()),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// `parent` and `delivery_cost` are part of the model but no pricing rule
/// reads them yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Identity used for campaign matching and delivery counting.
    pub id: String,

    /// Display name.
    pub title: String,

    /// Enclosing category, if any.
    pub parent: Option<Box<Category>>,

    /// Per-category delivery cost attribute.
    #[serde(default)]
    pub delivery_cost: Money,
}

impl Category {
    /// Creates a category with a generated id.
    pub fn new(title: impl Into<String>) -> ValidationResult<Self> {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    /// Creates a category with a caller-supplied id.
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> ValidationResult<Self> {
        let id = id.into();
        let title = title.into();
        validate_id(&id)?;
        validate_title("title", &title)?;

        Ok(Category {
            id,
            title,
            parent: None,
            delivery_cost: Money::zero(),
        })
    }

    /// Sets the parent category.
    pub fn with_parent(mut self, parent: &Category) -> Self {
        self.parent = Some(Box::new(parent.clone()));
        self
    }

    /// Sets the delivery cost attribute.
    pub fn with_delivery_cost(mut self, cost: Money) -> ValidationResult<Self> {
        validate_amount("delivery_cost", cost)?;
        self.delivery_cost = cost;
        Ok(self)
    }

    /// Returns the parent category, if any.
    pub fn parent(&self) -> Option<&Category> {
        self.parent.as_deref()
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product that can be added to a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Identity used for line-item merging.
    pub id: String,

    /// Display name.
    pub title: String,

    /// Unit price.
    pub price: Money,

    /// Category the product belongs to.
    pub category: Category,
}

impl Product {
    /// Creates a product with a generated id.
    pub fn new(title: impl Into<String>, price: Money, category: &Category) -> ValidationResult<Self> {
        Self::with_id(Uuid::new_v4().to_string(), title, price, category)
    }

    /// Creates a product with a caller-supplied id.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        price: Money,
        category: &Category,
    ) -> ValidationResult<Self> {
        let id = id.into();
        let title = title.into();
        validate_id(&id)?;
        validate_title("title", &title)?;
        validate_amount("price", price)?;

        Ok(Product {
            id,
            title,
            price,
            category: category.clone(),
        })
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// =============================================================================
// Campaign
// =============================================================================

/// A category-scoped discount that needs a minimum matching quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Category whose items the campaign applies to.
    pub category: Category,

    /// Discount granted when the campaign qualifies.
    pub discount: Discount,

    /// Minimum summed quantity of matching items.
    pub min_quantity: i64,
}

impl Campaign {
    /// Creates a campaign.
    ///
    /// ```rust
    /// use cart_core::types::{Campaign, Category, Discount};
    ///
    /// let food = Category::new("food").unwrap();
    /// let campaign = Campaign::new(&food, Discount::percent(20), 3).unwrap();
    /// assert_eq!(campaign.min_quantity, 3);
    /// ```
    pub fn new(category: &Category, discount: Discount, min_quantity: i64) -> ValidationResult<Self> {
        discount.validate()?;
        validate_min_quantity(min_quantity)?;

        Ok(Campaign {
            category: category.clone(),
            discount,
            min_quantity,
        })
    }

    /// Returns the discount type tag.
    #[inline]
    pub fn discount_type(&self) -> DiscountType {
        self.discount.kind()
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A cart-wide discount gated by a minimum post-campaign amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Amount the cart must reach after campaigns.
    pub min_amount: Money,

    /// Discount granted when the threshold is met.
    pub discount: Discount,
}

impl Coupon {
    /// Creates a coupon.
    pub fn new(min_amount: Money, discount: Discount) -> ValidationResult<Self> {
        validate_amount("min_amount", min_amount)?;
        discount.validate()?;

        Ok(Coupon {
            min_amount,
            discount,
        })
    }

    /// The "no coupon" sentinel: zero threshold, zero amount.
    pub const fn none() -> Self {
        Coupon {
            min_amount: Money::zero(),
            discount: Discount::Amount(Money::zero()),
        }
    }

    /// Returns the discount type tag.
    #[inline]
    pub fn discount_type(&self) -> DiscountType {
        self.discount.kind()
    }
}

impl Default for Coupon {
    fn default() -> Self {
        Coupon::none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_discount_rate_from_percent() {
        let rate = DiscountRate::from_percent(20);
        assert_eq!(rate.percent(), Decimal::from(20));
        assert_eq!(rate, DiscountRate::new(Decimal::new(2000, 2)));
        assert_eq!(DiscountRate::default(), DiscountRate::zero());
    }

    #[test]
    fn test_discount_rate_display() {
        assert_eq!(DiscountRate::from_percent(20).to_string(), "20%");
        assert_eq!(DiscountRate::new(Decimal::new(125, 1)).to_string(), "12.5%");
        assert_eq!(DiscountRate::new(Decimal::new(8250, 3)).to_string(), "8.25%");
    }

    #[test]
    fn test_discount_type_labels() {
        assert_eq!(DiscountType::Rate.label(), "Oran");
        assert_eq!(DiscountType::Amount.label(), "Tutar");
        assert_eq!(Discount::percent(5).kind(), DiscountType::Rate);
        assert_eq!(Discount::cents(5).kind(), DiscountType::Amount);
    }

    #[test]
    fn test_discount_serde_shape() {
        let json = serde_json::to_string(&Discount::percent(20)).unwrap();
        assert_eq!(json, r#"{"type":"rate","value":"20"}"#);

        let parsed: Discount = serde_json::from_str(r#"{"type":"amount","value":"5.00"}"#).unwrap();
        assert_eq!(parsed, Discount::cents(500));
    }

    #[test]
    fn test_discount_validation() {
        assert!(Discount::percent(100).validate().is_ok());
        assert!(Discount::percent(150).validate().is_ok());
        assert!(Discount::Rate(DiscountRate::new(Decimal::new(125, 1))).validate().is_ok());
        assert!(Discount::Rate(DiscountRate::new(Decimal::from(-1))).validate().is_err());
        assert!(Discount::cents(0).validate().is_ok());
        assert!(Discount::cents(-1).validate().is_err());
    }

    #[test]
    fn test_category_constructor() {
        let food = Category::new("food").unwrap();
        assert_eq!(food.title, "food");
        assert!(food.parent().is_none());
        assert!(food.delivery_cost.is_zero());
        assert!(!food.id.is_empty());

        assert!(Category::new("").is_err());
        assert!(Category::with_id("", "food").is_err());
    }

    #[test]
    fn test_category_parent_and_delivery_cost() {
        let grocery = Category::with_id("grocery", "grocery").unwrap();
        let food = Category::with_id("food", "food")
            .unwrap()
            .with_parent(&grocery)
            .with_delivery_cost(Money::from_cents(500))
            .unwrap();

        assert_eq!(food.parent().map(|p| p.id.as_str()), Some("grocery"));
        assert_eq!(food.delivery_cost, Money::from_major(5));

        let bad = Category::new("food").unwrap().with_delivery_cost(Money::from_cents(-1));
        assert!(bad.is_err());
    }

    #[test]
    fn test_category_identity_is_by_id() {
        let a = Category::new("food").unwrap();
        let b = Category::new("food").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_product_constructor() {
        let food = Category::new("food").unwrap();
        let apple = Product::new("Apple", Money::from_major(100), &food).unwrap();

        assert_eq!(apple.title, "Apple");
        assert_eq!(apple.price, Money::from_major(100));
        assert_eq!(apple.category, food);
    }

    #[test]
    fn test_product_rejects_negative_price() {
        let food = Category::new("food").unwrap();
        let err = Product::new("Apple", Money::from_cents(-1), &food).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MustBeNonNegative {
                field: "price".to_string()
            }
        );
    }

    #[test]
    fn test_product_identity_is_by_id() {
        let food = Category::new("food").unwrap();
        let a = Product::new("Apple", Money::from_major(100), &food).unwrap();
        let b = Product::new("Apple", Money::from_major(100), &food).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_campaign_constructor() {
        let food = Category::new("food").unwrap();
        let cases = [
            (Discount::percent(20), 3, DiscountType::Rate),
            (Discount::percent(50), 5, DiscountType::Rate),
            (Discount::cents(500), 5, DiscountType::Amount),
        ];

        for (discount, min_quantity, kind) in cases {
            let campaign = Campaign::new(&food, discount, min_quantity).unwrap();
            assert_eq!(campaign.category, food);
            assert_eq!(campaign.discount, discount);
            assert_eq!(campaign.min_quantity, min_quantity);
            assert_eq!(campaign.discount_type(), kind);
        }

        assert!(Campaign::new(&food, Discount::percent(150), 1).is_ok());
        assert!(Campaign::new(&food, Discount::percent(20), -1).is_err());
        assert!(Campaign::new(&food, Discount::cents(-5), 1).is_err());
    }

    #[test]
    fn test_coupon_constructor() {
        let coupon = Coupon::new(Money::from_major(100), Discount::cents(2000)).unwrap();
        assert_eq!(coupon.min_amount, Money::from_major(100));
        assert_eq!(coupon.discount_type(), DiscountType::Amount);

        let coupon = Coupon::new(Money::from_major(50), Discount::percent(10)).unwrap();
        assert_eq!(coupon.discount_type(), DiscountType::Rate);

        assert!(Coupon::new(Money::from_cents(-1), Discount::percent(10)).is_err());
    }

    #[test]
    fn test_coupon_default_is_sentinel() {
        let coupon = Coupon::default();
        assert!(coupon.min_amount.is_zero());
        assert_eq!(coupon.discount, Discount::cents(0));
        assert_eq!(coupon, Coupon::none());
    }
}
