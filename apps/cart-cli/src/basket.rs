//! # Basket Files
//!
//! A basket file describes a whole pricing scenario in TOML: the catalog,
//! what goes into the cart, the active campaigns and the coupon.
//!
//! ## Format
//! ```toml
//! [[categories]]
//! key = "food"
//! title = "Food"
//!
//! [[categories]]
//! key = "nuts"
//! title = "Nuts"
//! parent = "food"          # must be declared above
//!
//! [[products]]
//! key = "apple"
//! title = "Apple"
//! price = 0.99            # or "0.99"
//! category = "food"
//!
//! [[items]]
//! product = "apple"
//! quantity = 3
//!
//! [[campaigns]]
//! category = "food"
//! type = "rate"            # value is a percentage, 12.5 = 12.5%
//! value = 20
//! min_quantity = 3
//!
//! [coupon]
//! min_amount = 100
//! type = "amount"          # value is a currency amount
//! value = 10
//! ```
//!
//! Amounts and rates are exact decimals. TOML floats are read through their
//! shortest decimal form, so `0.99` means 0.99; quote a value to be explicit.
//!
//! Keys become the entity ids, so two products with the same title but
//! different keys stay separate line items.

use cart_core::{
    Campaign, Cart, Category, CoreError, Coupon, Discount, DiscountRate, DiscountType, Money,
    Product, ValidationError,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::error::CliResult;

// =============================================================================
// File Entries
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub delivery_cost: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductEntry {
    pub key: String,
    pub title: String,
    pub price: Decimal,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    pub product: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignEntry {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: DiscountType,
    pub value: Decimal,
    #[serde(default)]
    pub min_quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CouponEntry {
    #[serde(default)]
    pub min_amount: Decimal,
    #[serde(rename = "type")]
    pub kind: DiscountType,
    pub value: Decimal,
}

/// A parsed basket file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasketFile {
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
    #[serde(default)]
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
    #[serde(default)]
    pub campaigns: Vec<CampaignEntry>,
    #[serde(default)]
    pub coupon: Option<CouponEntry>,
}

// =============================================================================
// Loading
// =============================================================================

impl BasketFile {
    /// Reads and parses a basket file.
    pub fn load(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading basket");
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parses a basket document.
    pub fn parse(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Builds the cart the file describes.
    ///
    /// Items are added in file order, so the cart's grouping and line order
    /// follow the file. Items with a non-positive quantity are ignored by the
    /// cart itself.
    pub fn into_cart(self) -> CliResult<Cart> {
        let categories = build_categories(&self.categories)?;
        let products = build_products(&self.products, &categories)?;

        let mut cart = Cart::new();
        for item in &self.items {
            let product = products
                .get(item.product.as_str())
                .ok_or_else(|| CoreError::UnknownProduct(item.product.clone()))?;
            cart.add_item(product, item.quantity);
        }

        let campaigns = self
            .campaigns
            .iter()
            .map(|entry| -> CliResult<Campaign> {
                let category = lookup_category(&categories, &entry.category)?;
                let discount = to_discount(entry.kind, entry.value);
                Ok(Campaign::new(category, discount, entry.min_quantity)?)
            })
            .collect::<CliResult<Vec<_>>>()?;
        cart.apply_discounts(campaigns);

        if let Some(entry) = &self.coupon {
            let discount = to_discount(entry.kind, entry.value);
            let coupon = Coupon::new(Money::new(entry.min_amount), discount)?;
            cart.apply_coupon(coupon);
        }

        debug!(
            items = cart.item_count(),
            campaigns = cart.campaigns().len(),
            "Basket built"
        );
        Ok(cart)
    }
}

fn build_categories(entries: &[CategoryEntry]) -> CliResult<HashMap<String, Category>> {
    let mut categories: HashMap<String, Category> = HashMap::new();

    for entry in entries {
        if categories.contains_key(&entry.key) {
            return Err(duplicate("category", &entry.key).into());
        }

        let mut category = Category::with_id(entry.key.clone(), entry.title.clone())?
            .with_delivery_cost(Money::new(entry.delivery_cost))?;

        if let Some(parent_key) = &entry.parent {
            let parent = lookup_category(&categories, parent_key)?;
            category = category.with_parent(parent);
        }

        categories.insert(entry.key.clone(), category);
    }

    Ok(categories)
}

fn build_products(
    entries: &[ProductEntry],
    categories: &HashMap<String, Category>,
) -> CliResult<HashMap<String, Product>> {
    let mut products: HashMap<String, Product> = HashMap::new();

    for entry in entries {
        if products.contains_key(&entry.key) {
            return Err(duplicate("product", &entry.key).into());
        }

        let category = lookup_category(categories, &entry.category)?;
        let product = Product::with_id(
            entry.key.clone(),
            entry.title.clone(),
            Money::new(entry.price),
            category,
        )?;
        products.insert(entry.key.clone(), product);
    }

    Ok(products)
}

fn lookup_category<'a>(
    categories: &'a HashMap<String, Category>,
    key: &str,
) -> Result<&'a Category, CoreError> {
    categories
        .get(key)
        .ok_or_else(|| CoreError::UnknownCategory(key.to_string()))
}

fn duplicate(field: &str, key: &str) -> ValidationError {
    ValidationError::Duplicate {
        field: field.to_string(),
        value: key.to_string(),
    }
}

/// Rate values are percentages, amount values are currency amounts.
///
/// Sign checks happen in the `Campaign` / `Coupon` constructors.
fn to_discount(kind: DiscountType, value: Decimal) -> Discount {
    match kind {
        DiscountType::Rate => Discount::Rate(DiscountRate::new(value)),
        DiscountType::Amount => Discount::Amount(Money::new(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    const SCENARIO: &str = r#"
        [[categories]]
        key = "food"
        title = "food"

        [[categories]]
        key = "other"
        title = "other"

        [[products]]
        key = "apple"
        title = "Apple"
        price = 100
        category = "food"

        [[products]]
        key = "almond"
        title = "Almonds"
        price = 150
        category = "food"

        [[products]]
        key = "banana"
        title = "Banana"
        price = 100
        category = "other"

        [[items]]
        product = "apple"
        quantity = 3

        [[items]]
        product = "almond"
        quantity = 1

        [[items]]
        product = "banana"
        quantity = 1

        [[campaigns]]
        category = "food"
        type = "rate"
        value = 20
        min_quantity = 3

        [[campaigns]]
        category = "food"
        type = "rate"
        value = 50
        min_quantity = 5

        [[campaigns]]
        category = "food"
        type = "amount"
        value = 5
        min_quantity = 5

        [[campaigns]]
        category = "other"
        type = "rate"
        value = 50
        min_quantity = 1

        [coupon]
        min_amount = 100
        type = "amount"
        value = 100
    "#;

    #[test]
    fn test_scenario_totals() {
        let cart = BasketFile::parse(SCENARIO).unwrap().into_cart().unwrap();

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.campaigns().len(), 4);
        assert_eq!(cart.campaign_discount(), Money::from_major(140));
        assert_eq!(cart.coupon_discount(), Money::from_major(100));
        assert_eq!(cart.total_amount_after_discounts(), Money::from_major(310));
    }

    #[test]
    fn test_keys_become_ids() {
        let cart = BasketFile::parse(SCENARIO).unwrap().into_cart().unwrap();
        assert_eq!(cart.items()[0].product.id, "apple");
        assert_eq!(cart.items()[0].product.category.id, "food");
    }

    #[test]
    fn test_empty_file_is_empty_cart() {
        let cart = BasketFile::parse("").unwrap().into_cart().unwrap();
        assert!(cart.is_empty());
        assert_eq!(*cart.coupon(), Coupon::none());
    }

    #[test]
    fn test_parent_category() {
        let basket = BasketFile::parse(
            r#"
            [[categories]]
            key = "food"
            title = "food"

            [[categories]]
            key = "nuts"
            title = "nuts"
            parent = "food"

            [[products]]
            key = "almond"
            title = "Almonds"
            price = 150
            category = "nuts"

            [[items]]
            product = "almond"
            quantity = 1
            "#,
        )
        .unwrap();

        let cart = basket.into_cart().unwrap();
        let parent = cart.items()[0].category().parent().map(|p| p.id.clone());
        assert_eq!(parent.as_deref(), Some("food"));
    }

    #[test]
    fn test_unknown_references() {
        let result = BasketFile::parse("[[items]]\nproduct = \"ghost\"\nquantity = 1\n")
            .unwrap()
            .into_cart();
        assert!(matches!(
            result,
            Err(CliError::Core(CoreError::UnknownProduct(ref key))) if key == "ghost"
        ));

        let result = BasketFile::parse(
            "[[products]]\nkey = \"a\"\ntitle = \"A\"\nprice = 1\ncategory = \"ghost\"\n",
        )
        .unwrap()
        .into_cart();
        assert!(matches!(
            result,
            Err(CliError::Core(CoreError::UnknownCategory(_)))
        ));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = BasketFile::parse(
            r#"
            [[categories]]
            key = "food"
            title = "food"

            [[categories]]
            key = "food"
            title = "again"
            "#,
        )
        .unwrap()
        .into_cart();

        assert!(matches!(
            result,
            Err(CliError::Core(CoreError::Validation(ValidationError::Duplicate { .. })))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let negative_price = r#"
            [[categories]]
            key = "food"
            title = "food"

            [[products]]
            key = "apple"
            title = "Apple"
            price = -1
            category = "food"
        "#;
        assert!(BasketFile::parse(negative_price).unwrap().into_cart().is_err());

        let negative_rate = r#"
            [[categories]]
            key = "food"
            title = "food"

            [[campaigns]]
            category = "food"
            type = "rate"
            value = -5
        "#;
        assert!(matches!(
            BasketFile::parse(negative_rate).unwrap().into_cart(),
            Err(CliError::Core(CoreError::Validation(ValidationError::MustBeNonNegative { .. })))
        ));
    }

    #[test]
    fn test_decimal_prices_and_fractional_rates() {
        let basket = BasketFile::parse(
            r#"
            [[categories]]
            key = "food"
            title = "food"

            [[products]]
            key = "apple"
            title = "Apple"
            price = "0.99"
            category = "food"

            [[products]]
            key = "pear"
            title = "Pear"
            price = 0.5
            category = "food"

            [[items]]
            product = "apple"
            quantity = 3

            [[campaigns]]
            category = "food"
            type = "rate"
            value = "15"
            min_quantity = 1

            [coupon]
            type = "rate"
            value = 10
            "#,
        )
        .unwrap();

        assert_eq!(basket.products[1].price, Decimal::new(5, 1));

        let cart = basket.into_cart().unwrap();
        assert_eq!(cart.items()[0].product.price, Money::from_cents(99));
        assert_eq!(cart.campaign_discount(), Money::new(Decimal::new(4455, 4)));
        assert_eq!(
            cart.total_amount_after_discounts(),
            Money::new(Decimal::new(227205, 5))
        );
    }

    #[test]
    fn test_rates_above_hundred_percent_accepted() {
        assert_eq!(
            to_discount(DiscountType::Rate, Decimal::from(150)),
            Discount::percent(150)
        );
        assert_eq!(
            to_discount(DiscountType::Rate, Decimal::new(125, 1)),
            Discount::Rate(DiscountRate::new(Decimal::new(125, 1)))
        );
        assert_eq!(
            to_discount(DiscountType::Amount, Decimal::from(5)),
            Discount::cents(500)
        );
    }

    #[test]
    fn test_unknown_discount_type_fails_to_parse() {
        let result = BasketFile::parse(
            "[coupon]\ntype = \"bogus\"\nvalue = 1\n",
        );
        assert!(matches!(result, Err(CliError::TomlParse(_))));
    }
}
