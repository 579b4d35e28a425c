//! # Delivery Cost
//!
//! Delivery cost is a pure function of how many categories and how many
//! distinct products a cart holds:
//!
//! ```text
//! cost = cost_per_delivery × categories
//!      + cost_per_product  × line items
//!      + fixed_cost
//! ```
//!
//! An empty cart costs nothing to deliver, fixed cost included.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cart::Cart;
use crate::money::Money;
use crate::validation::{validate_amount, ValidationResult};

/// Stateless delivery cost formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryCostCalculator {
    /// Charged once per distinct category in the cart.
    pub cost_per_delivery: Money,

    /// Charged once per distinct product in the cart.
    pub cost_per_product: Money,

    /// Charged once for any non-empty cart.
    pub fixed_cost: Money,
}

impl DeliveryCostCalculator {
    /// Creates a calculator. All three costs must be non-negative.
    ///
    /// ```rust
    /// use cart_core::{DeliveryCostCalculator, Money};
    ///
    /// let calculator = DeliveryCostCalculator::new(
    ///     Money::from_major(2),
    ///     Money::from_major(3),
    ///     Money::from_cents(299),
    /// )
    /// .unwrap();
    /// assert_eq!(calculator.fixed_cost, Money::from_cents(299));
    /// ```
    pub fn new(
        cost_per_delivery: Money,
        cost_per_product: Money,
        fixed_cost: Money,
    ) -> ValidationResult<Self> {
        validate_amount("cost_per_delivery", cost_per_delivery)?;
        validate_amount("cost_per_product", cost_per_product)?;
        validate_amount("fixed_cost", fixed_cost)?;

        Ok(DeliveryCostCalculator {
            cost_per_delivery,
            cost_per_product,
            fixed_cost,
        })
    }

    /// Delivery cost for `cart`. Categories are counted by id.
    pub fn calculate_for(&self, cart: &Cart) -> Money {
        if cart.is_empty() {
            return Money::zero();
        }

        let deliveries = cart.category_count() as i64;
        let products = cart.item_count() as i64;
        trace!(deliveries, products, "Calculating delivery cost");

        self.cost_per_delivery * deliveries + self.cost_per_product * products + self.fixed_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Product};

    fn calculator() -> DeliveryCostCalculator {
        DeliveryCostCalculator::new(
            Money::from_major(2),
            Money::from_major(3),
            Money::from_cents(299),
        )
        .unwrap()
    }

    #[test]
    fn test_constructor() {
        let calc = calculator();
        assert_eq!(calc.cost_per_delivery, Money::from_major(2));
        assert_eq!(calc.cost_per_product, Money::from_major(3));
        assert_eq!(calc.fixed_cost, Money::from_cents(299));
    }

    #[test]
    fn test_constructor_rejects_negative_costs() {
        let err = DeliveryCostCalculator::new(Money::from_cents(-1), Money::zero(), Money::zero());
        assert!(err.is_err());
        let err = DeliveryCostCalculator::new(Money::zero(), Money::zero(), Money::from_cents(-1));
        assert!(err.is_err());
    }

    #[test]
    fn test_empty_cart_costs_nothing() {
        let cart = Cart::new();
        assert!(calculator().calculate_for(&cart).is_zero());
        assert!(cart.delivery_cost(&calculator()).is_zero());
    }

    #[test]
    fn test_single_category() {
        let food = Category::new("food").unwrap();
        let apple = Product::new("Apple", Money::from_major(100), &food).unwrap();
        let almond = Product::new("Almonds", Money::from_major(150), &food).unwrap();

        let mut cart = Cart::new();
        cart.add_item(&apple, 3);
        cart.add_item(&almond, 1);

        // 2 × 1 + 3 × 2 + 2.99
        assert_eq!(cart.delivery_cost(&calculator()), Money::from_cents(1099));
    }

    #[test]
    fn test_two_categories() {
        let food = Category::new("food").unwrap();
        let other = Category::new("other").unwrap();
        let apple = Product::new("Apple", Money::from_major(100), &food).unwrap();
        let almond = Product::new("Almonds", Money::from_major(150), &food).unwrap();
        let banana = Product::new("Banana", Money::from_major(100), &other).unwrap();

        let mut cart = Cart::new();
        cart.add_item(&apple, 3);
        cart.add_item(&almond, 1);
        cart.add_item(&banana, 1);

        let calc = calculator();
        let expected = calc.cost_per_delivery * cart.category_count() as i64
            + calc.cost_per_product * cart.item_count() as i64
            + calc.fixed_cost;

        // 2 × 2 + 3 × 3 + 2.99
        assert_eq!(expected, Money::from_cents(1599));
        assert_eq!(calc.calculate_for(&cart), expected);
    }

    #[test]
    fn test_quantity_does_not_affect_cost() {
        let food = Category::new("food").unwrap();
        let apple = Product::new("Apple", Money::from_major(100), &food).unwrap();

        let mut cart = Cart::new();
        cart.add_item(&apple, 1);
        let before = cart.delivery_cost(&calculator());

        cart.add_item(&apple, 10);
        assert_eq!(cart.delivery_cost(&calculator()), before);
    }
}
