//! # Report Rendering
//!
//! Turns a priced cart into either a text summary or a JSON document.

use cart_core::{Cart, CartTotals, DeliveryCostCalculator, Money};
use serde::Serialize;

use crate::config::DisplaySettings;
use crate::error::CliResult;

/// Everything the CLI reports about a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(flatten)]
    pub totals: CartTotals,
    pub delivery_cost: Money,
    pub grand_total: Money,
}

impl Report {
    pub fn new(cart: &Cart, calculator: &DeliveryCostCalculator) -> Self {
        let totals = CartTotals::from(cart);
        let delivery_cost = cart.delivery_cost(calculator);
        let grand_total = totals.total_after_discounts + delivery_cost;

        Report {
            totals,
            delivery_cost,
            grand_total,
        }
    }

    pub fn to_json(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Cart summary followed by the amounts footer.
    pub fn to_text(&self, cart: &Cart, display: &DisplaySettings) -> String {
        let mut out = cart.print();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        if !out.ends_with("\n\n") {
            out.push('\n');
        }

        let lines = [
            ("Items Amount", self.totals.items_amount),
            ("Total After Discounts", self.totals.total_after_discounts),
            ("Delivery Cost", self.delivery_cost),
            ("Grand Total", self.grand_total),
        ];
        for (label, amount) in lines {
            out.push_str(&format!("{}: {}\n", label, display.format(amount)));
        }

        out
    }
}
