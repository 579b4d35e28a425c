//! # Cart
//!
//! The cart aggregate: line items plus the currently active campaigns and
//! coupon, and every discount/total computed from them.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Pricing Pipeline                            │
//! │                                                                         │
//! │  items ──► items_amount = Σ price × quantity                           │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  campaigns ──► per category: best qualifying campaign only             │
//! │                 │   campaign_discount = Σ winners                       │
//! │                 ▼                                                       │
//! │  coupon ────► threshold checked on items_amount - campaign_discount    │
//! │                 │   Rate applies to that same discounted amount         │
//! │                 ▼                                                       │
//! │  total = items_amount - campaign_discount - coupon_discount            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is cached: every query recomputes from the current state, so
//! repeated calls without a mutation in between always agree.
//!
//! ## Invariants
//! - Items are unique by product id (adding the same product again
//!   increases its quantity)
//! - Item quantities are always > 0 and saturate at `i64::MAX`
//! - `apply_discounts` / `apply_coupon` replace, they never merge
//! - A deserialized cart is rebuilt through [`Cart::add_item`] and the
//!   validating constructors, so the invariants above hold for it too

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

use crate::delivery::DeliveryCostCalculator;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Campaign, Category, Coupon, Product};

/// Text returned by [`Cart::print`] when there is nothing to show.
pub const EMPTY_CART_MESSAGE: &str = "Cart is empty";

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product on this line.
    pub product: Product,

    /// Quantity in cart.
    pub quantity: i64,
}

impl CartItem {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }

    /// Category of the product on this line.
    #[inline]
    pub fn category(&self) -> &Category {
        &self.product.category
    }
}

// =============================================================================
// Applied Campaign
// =============================================================================

/// The campaign that won for one category, with the amount it grants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedCampaign {
    pub campaign: Campaign,
    pub amount: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "CartSnapshot")]
pub struct Cart {
    items: Vec<CartItem>,
    campaigns: Vec<Campaign>,
    coupon: Coupon,
}

impl Cart {
    /// Creates a new empty cart with no campaigns and the sentinel coupon.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// A quantity of zero or less is ignored.
    ///
    /// ```rust
    /// use cart_core::{Cart, Category, Money, Product};
    ///
    /// let food = Category::new("food").unwrap();
    /// let apple = Product::new("Apple", Money::from_major(100), &food).unwrap();
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item(&apple, 2);
    /// cart.add_item(&apple, 1);
    /// cart.add_item(&apple, 0);
    ///
    /// assert_eq!(cart.item_count(), 1);
    /// assert_eq!(cart.total_quantity(), 3);
    /// ```
    pub fn add_item(&mut self, product: &Product, quantity: i64) {
        if quantity <= 0 {
            debug!(product_id = %product.id, quantity, "Ignoring non-positive quantity");
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product == *product) {
            item.quantity = item.quantity.saturating_add(quantity);
            debug!(product_id = %product.id, quantity = item.quantity, "Increased line quantity");
            return;
        }

        debug!(product_id = %product.id, quantity, "Adding line item");
        self.items.push(CartItem {
            product: product.clone(),
            quantity,
        });
    }

    /// Sets the active campaigns, replacing any previous set.
    pub fn apply_discounts(&mut self, campaigns: Vec<Campaign>) {
        debug!(count = campaigns.len(), "Replacing active campaigns");
        self.campaigns = campaigns;
    }

    /// Sets the active coupon, replacing any previous one.
    pub fn apply_coupon(&mut self, coupon: Coupon) {
        debug!(min_amount = %coupon.min_amount, discount = %coupon.discount, "Replacing active coupon");
        self.coupon = coupon;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Active campaigns in the order they were supplied.
    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// Active coupon (the sentinel when none was applied).
    pub fn coupon(&self) -> &Coupon {
        &self.coupon
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |total, i| total.saturating_add(i.quantity))
    }

    /// Number of distinct categories among the line items.
    pub fn category_count(&self) -> usize {
        self.items
            .iter()
            .map(|i| i.category().id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Σ unit price × quantity, before any discount.
    pub fn items_amount(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// The winning campaign per category, in first-seen category order.
    ///
    /// For each campaign, in the order supplied:
    /// 1. take the items whose category matches
    /// 2. skip it unless there is at least one such item and their summed
    ///    quantity reaches `min_quantity`
    /// 3. resolve the discount (Rate applies to the matching items' amount)
    /// 4. keep it only if it beats the current best for that category;
    ///    on a tie the earlier campaign stays
    pub fn applied_campaigns(&self) -> Vec<AppliedCampaign> {
        let mut applied: Vec<AppliedCampaign> = Vec::new();
        if self.items.is_empty() {
            return applied;
        }

        for campaign in &self.campaigns {
            let Some(amount) = self.campaign_amount(campaign) else {
                continue;
            };

            match applied
                .iter_mut()
                .find(|a| a.campaign.category == campaign.category)
            {
                Some(best) => {
                    if amount > best.amount {
                        trace!(
                            category = %campaign.category.title,
                            previous = %best.amount,
                            amount = %amount,
                            "Campaign replaces previous best"
                        );
                        best.campaign = campaign.clone();
                        best.amount = amount;
                    }
                }
                None => applied.push(AppliedCampaign {
                    campaign: campaign.clone(),
                    amount,
                }),
            }
        }

        applied
    }

    /// Total campaign discount: the sum of each category's best campaign.
    pub fn campaign_discount(&self) -> Money {
        self.applied_campaigns().iter().map(|a| a.amount).sum()
    }

    /// Coupon discount, evaluated after campaigns.
    ///
    /// The threshold is checked against `items_amount - campaign_discount`,
    /// and a Rate coupon is a percentage of that same amount.
    pub fn coupon_discount(&self) -> Money {
        if self.items.is_empty() {
            return Money::zero();
        }

        let discounted = self.items_amount() - self.campaign_discount();
        if discounted < self.coupon.min_amount {
            trace!(
                discounted = %discounted,
                min_amount = %self.coupon.min_amount,
                "Coupon threshold not met"
            );
            return Money::zero();
        }

        self.coupon.discount.amount_on(discounted)
    }

    /// Items amount minus campaign and coupon discounts.
    pub fn total_amount_after_discounts(&self) -> Money {
        if self.items.is_empty() {
            return Money::zero();
        }

        self.items_amount() - self.campaign_discount() - self.coupon_discount()
    }

    /// Delivery cost of this cart under `calculator`.
    pub fn delivery_cost(&self, calculator: &DeliveryCostCalculator) -> Money {
        calculator.calculate_for(self)
    }

    /// Human-readable summary. See the `Display` impl for the layout.
    pub fn print(&self) -> String {
        self.to_string()
    }

    /// Discount a single campaign would grant, or `None` if it does not
    /// qualify.
    fn campaign_amount(&self, campaign: &Campaign) -> Option<Money> {
        let matching: Vec<&CartItem> = self
            .items
            .iter()
            .filter(|i| *i.category() == campaign.category)
            .collect();

        if matching.is_empty() {
            return None;
        }

        let quantity = matching
            .iter()
            .fold(0_i64, |total, i| total.saturating_add(i.quantity));
        if quantity < campaign.min_quantity {
            trace!(
                category = %campaign.category.title,
                quantity,
                required = campaign.min_quantity,
                "Campaign does not qualify"
            );
            return None;
        }

        let base: Money = matching.iter().map(|i| i.line_total()).sum();
        Some(campaign.discount.amount_on(base))
    }

    /// Items grouped by category, first-seen category first.
    fn grouped_items(&self) -> Vec<(&Category, Vec<&CartItem>)> {
        let mut groups: Vec<(&Category, Vec<&CartItem>)> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|(c, _)| *c == item.category()) {
                Some((_, lines)) => lines.push(item),
                None => groups.push((item.category(), vec![item])),
            }
        }
        groups
    }
}

// =============================================================================
// Deserialization
// =============================================================================

/// Wire shape of a [`Cart`]. Nothing in it is trusted.
#[derive(Deserialize)]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<CartItem>,
    #[serde(default)]
    campaigns: Vec<Campaign>,
    #[serde(default)]
    coupon: Coupon,
}

/// Replays the snapshot through the same entry points a caller would use:
/// duplicate lines merge, non-positive quantities drop out, and products,
/// campaigns and the coupon are re-validated.
impl TryFrom<CartSnapshot> for Cart {
    type Error = ValidationError;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        let mut cart = Cart::new();

        for item in snapshot.items {
            let product = Product::with_id(
                item.product.id,
                item.product.title,
                item.product.price,
                &item.product.category,
            )?;
            cart.add_item(&product, item.quantity);
        }

        let campaigns = snapshot
            .campaigns
            .into_iter()
            .map(|c| Campaign::new(&c.category, c.discount, c.min_quantity))
            .collect::<Result<Vec<_>, _>>()?;
        cart.apply_discounts(campaigns);

        let coupon = snapshot.coupon;
        cart.apply_coupon(Coupon::new(coupon.min_amount, coupon.discount)?);

        Ok(cart)
    }
}

/// Summary layout:
///
/// ```text
/// food:
/// Apple - 3 - 100.00 - 300.00
/// Almonds - 1 - 150.00 - 150.00
///
/// Campaign Discount: 90.00
/// Total Discount: 90.00
/// ```
impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return write!(f, "{}", EMPTY_CART_MESSAGE);
        }

        for (category, lines) in self.grouped_items() {
            writeln!(f, "{}:", category.title)?;
            for item in lines {
                writeln!(
                    f,
                    "{} - {} - {} - {}",
                    item.product.title,
                    item.quantity,
                    item.product.price,
                    item.line_total()
                )?;
            }
            writeln!(f)?;
        }

        let mut total_discount = Money::zero();

        let campaign_discount = self.campaign_discount();
        if campaign_discount.is_positive() {
            total_discount += campaign_discount;
            writeln!(f, "Campaign Discount: {}", campaign_discount)?;
        }

        let coupon_discount = self.coupon_discount();
        if coupon_discount.is_positive() {
            total_discount += coupon_discount;
            writeln!(f, "Coupon Discount: {}", coupon_discount)?;
        }

        if total_discount.is_positive() {
            write!(f, "Total Discount: {}", total_discount)?;
        }

        Ok(())
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub items_amount: Money,
    pub campaign_discount: Money,
    pub coupon_discount: Money,
    pub total_after_discounts: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            items_amount: cart.items_amount(),
            campaign_discount: cart.campaign_discount(),
            coupon_discount: cart.coupon_discount(),
            total_after_discounts: cart.total_amount_after_discounts(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
