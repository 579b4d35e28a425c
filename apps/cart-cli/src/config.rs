//! # CLI Configuration
//!
//! Delivery cost parameters and display settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CART_COST_PER_DELIVERY_CENTS=200                                   │
//! │     CART_CURRENCY_SYMBOL=€                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, or the platform default:                          │
//! │     ~/.config/cart-pricing/cart.toml (Linux)                           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     2.00 per delivery, 3.00 per product, 2.99 fixed                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [delivery]
//! cost_per_delivery_cents = 200
//! cost_per_product_cents = 300
//! fixed_cost_cents = 299
//!
//! [display]
//! currency_symbol = "$"
//! ```

use cart_core::{DeliveryCostCalculator, Money};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Delivery Settings
// =============================================================================

/// Parameters of the delivery cost formula, in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySettings {
    /// Charged per distinct category.
    #[serde(default = "default_cost_per_delivery")]
    pub cost_per_delivery_cents: i64,

    /// Charged per distinct product.
    #[serde(default = "default_cost_per_product")]
    pub cost_per_product_cents: i64,

    /// Charged once per non-empty cart.
    #[serde(default = "default_fixed_cost")]
    pub fixed_cost_cents: i64,
}

fn default_cost_per_delivery() -> i64 {
    200
}

fn default_cost_per_product() -> i64 {
    300
}

fn default_fixed_cost() -> i64 {
    299
}

impl Default for DeliverySettings {
    fn default() -> Self {
        DeliverySettings {
            cost_per_delivery_cents: default_cost_per_delivery(),
            cost_per_product_cents: default_cost_per_product(),
            fixed_cost_cents: default_fixed_cost(),
        }
    }
}

impl DeliverySettings {
    /// Builds the calculator these settings describe.
    pub fn calculator(&self) -> CliResult<DeliveryCostCalculator> {
        Ok(DeliveryCostCalculator::new(
            Money::from_cents(self.cost_per_delivery_cents),
            Money::from_cents(self.cost_per_product_cents),
            Money::from_cents(self.fixed_cost_cents),
        )?)
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// How amounts are rendered in the report footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for amounts, e.g. "$".
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl DisplaySettings {
    /// Formats an amount with the currency symbol (`$10.99`, `-$5.50`).
    pub fn format(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.currency_symbol, amount.abs())
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Delivery cost formula.
    #[serde(default)]
    pub delivery: DeliverySettings,

    /// Output formatting.
    #[serde(default)]
    pub display: DisplaySettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`cart.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. The platform default path is
    /// optional and skipped when absent.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => config = Self::read_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => config = Self::read_file(&path)?,
                Some(path) => debug!(?path, "Config file not found, using defaults"),
                None => debug!("No platform config directory, using defaults"),
            },
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn read_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses a TOML document. Missing sections and keys take defaults.
    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        let delivery = &self.delivery;
        for (name, value) in [
            ("cost_per_delivery_cents", delivery.cost_per_delivery_cents),
            ("cost_per_product_cents", delivery.cost_per_product_cents),
            ("fixed_cost_cents", delivery.fixed_cost_cents),
        ] {
            if value < 0 {
                return Err(CliError::InvalidConfig(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Applies overrides from `lookup` (the process environment in
    /// [`CartConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let cents_overrides: [(&str, &mut i64); 3] = [
            (
                "CART_COST_PER_DELIVERY_CENTS",
                &mut self.delivery.cost_per_delivery_cents,
            ),
            (
                "CART_COST_PER_PRODUCT_CENTS",
                &mut self.delivery.cost_per_product_cents,
            ),
            ("CART_FIXED_COST_CENTS", &mut self.delivery.fixed_cost_cents),
        ];

        for (key, slot) in cents_overrides {
            if let Some(raw) = lookup(key) {
                match raw.trim().parse::<i64>() {
                    Ok(cents) => {
                        debug!(key, cents, "Overriding delivery setting from environment");
                        *slot = cents;
                    }
                    Err(_) => warn!(key, value = %raw, "Ignoring non-numeric override"),
                }
            }
        }

        if let Some(symbol) = lookup("CART_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cart", "pricing")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }
}
