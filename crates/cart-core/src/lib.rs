//! # cart-core: Pure Pricing Logic for a Shopping Cart
//!
//! This crate prices a shopping cart: line totals, category campaigns, a
//! cart-wide coupon and a delivery cost. Everything here is a pure function
//! of in-memory state with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Pricing Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    cart-cli (binary)                            │   │
//! │  │    config.toml ──► basket.toml ──► summary / JSON totals       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cart-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ delivery  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  formula  │  │   │
//! │  │   │  Campaign │  │  portion  │  │ discounts │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Category, Product, Campaign, Coupon, Discount
//! - [`money`] - Money type with exact decimal arithmetic (no floating point!)
//! - [`cart`] - Cart aggregate, discount resolution, summaries
//! - [`delivery`] - Delivery cost calculator
//! - [`error`] - Domain error types
//! - [`validation`] - Constructor input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use cart_core::{Campaign, Cart, Category, Coupon, Discount, Money, Product};
//!
//! let food = Category::new("food").unwrap();
//! let apple = Product::new("Apple", Money::from_major(100), &food).unwrap();
//! let almond = Product::new("Almonds", Money::from_major(150), &food).unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_item(&apple, 3);
//! cart.add_item(&almond, 1);
//!
//! cart.apply_discounts(vec![Campaign::new(&food, Discount::percent(20), 3).unwrap()]);
//! cart.apply_coupon(Coupon::new(Money::from_major(100), Discount::percent(10)).unwrap());
//!
//! assert_eq!(cart.campaign_discount(), Money::from_major(90));
//! assert_eq!(cart.coupon_discount(), Money::from_major(36));
//! assert_eq!(cart.total_amount_after_discounts(), Money::from_major(324));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod delivery;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AppliedCampaign, Cart, CartItem, CartTotals};
pub use delivery::DeliveryCostCalculator;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a category or product title.
pub const MAX_TITLE_LEN: usize = 200;
