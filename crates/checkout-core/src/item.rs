//! # Checkout Item
//!
//! The single item on sale, with its price.
//! Loaded from `config/checkout.toml` when present.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Supported display currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Returns the lowercase ISO 4217 code the processor expects
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
        }
    }

    /// Number of decimal places (JPY has none)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Price with amount in the smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in minor units (cents for USD)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    pub fn from_minor_units(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Format for display (e.g., "$10.00", "-$0.50")
    pub fn display(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let units = self.amount.unsigned_abs();
        match self.currency.decimal_places() {
            0 => format!("{}{}{}", sign, self.currency.symbol(), units),
            places => {
                let divisor = 10_u64.pow(places as u32);
                format!(
                    "{}{}{}.{:0width$}",
                    sign,
                    self.currency.symbol(),
                    units / divisor,
                    units % divisor,
                    width = places as usize
                )
            }
        }
    }
}

/// The item sold by the checkout page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    /// Display name (e.g., "Workshop Fee")
    pub name: String,
    /// Short description shown on the landing page
    #[serde(default)]
    pub description: String,
    /// Price charged per checkout
    pub price: Price,
    /// Extra key/value tags attached to every payment (`[item.metadata]`)
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl CheckoutItem {
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            metadata: BTreeMap::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: add a metadata tag
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Parse an item from TOML. The price must be positive.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        #[derive(Deserialize)]
        struct ItemFile {
            item: CheckoutItem,
        }

        let item = toml::from_str::<ItemFile>(content)?.item;
        if item.price.amount <= 0 {
            return Err(serde::de::Error::custom(format!(
                "item price must be a positive amount, got {}",
                item.price.amount
            )));
        }
        Ok(item)
    }

    /// Load the item from the first readable path, or `None` if none exist
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Option<Self>, String> {
        for path in paths {
            let path = path.as_ref();
            if let Ok(content) = std::fs::read_to_string(path) {
                return Self::from_toml_str(&content)
                    .map(Some)
                    .map_err(|e| format!("Failed to parse {}: {}", path.display(), e));
            }
        }
        Ok(None)
    }
}

impl Default for CheckoutItem {
    fn default() -> Self {
        Self::new(
            "Workshop Fee",
            Price::from_minor_units(1000, Currency::USD),
        )
        .with_description("Learn how to accept card payments with Stripe")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_minor_units(1000, Currency::USD).display(), "$10.00");
        assert_eq!(Price::from_minor_units(1999, Currency::EUR).display(), "€19.99");
        assert_eq!(Price::from_minor_units(5, Currency::GBP).display(), "£0.05");
        assert_eq!(Price::from_minor_units(500, Currency::JPY).display(), "¥500");
    }

    #[test]
    fn test_negative_price_display_keeps_sign() {
        assert_eq!(Price::from_minor_units(-50, Currency::USD).display(), "-$0.50");
        assert_eq!(Price::from_minor_units(-1250, Currency::EUR).display(), "-€12.50");
        assert_eq!(Price::from_minor_units(-500, Currency::JPY).display(), "-¥500");
    }

    #[test]
    fn test_default_item() {
        let item = CheckoutItem::default();
        assert_eq!(item.price.amount, 1000);
        assert_eq!(item.price.currency.as_str(), "usd");
        assert_eq!(item.price.display(), "$10.00");
    }

    #[test]
    fn test_item_from_toml() {
        let toml = r#"
            [item]
            name = "Conference Ticket"
            description = "One day pass"

            [item.price]
            amount = 4500
            currency = "eur"
        "#;

        let item = CheckoutItem::from_toml_str(toml).unwrap();
        assert_eq!(item.name, "Conference Ticket");
        assert_eq!(item.price, Price::from_minor_units(4500, Currency::EUR));
        assert!(item.metadata.is_empty());
    }

    #[test]
    fn test_item_metadata_from_toml() {
        let toml = r#"
            [item]
            name = "Workshop Fee"

            [item.price]
            amount = 1000
            currency = "usd"

            [item.metadata]
            workshop = "WDC_Payment"
        "#;

        let item = CheckoutItem::from_toml_str(toml).unwrap();
        assert_eq!(
            item,
            CheckoutItem::new("Workshop Fee", Price::from_minor_units(1000, Currency::USD))
                .with_metadata("workshop", "WDC_Payment")
        );
    }

    #[test]
    fn test_item_rejects_non_positive_price() {
        for amount in [0, -50] {
            let toml = format!(
                "[item]\nname = \"Free\"\n\n[item.price]\namount = {}\ncurrency = \"usd\"\n",
                amount
            );

            let err = CheckoutItem::from_toml_str(&toml).unwrap_err();
            assert!(err.to_string().contains("positive"), "{}", err);
        }
    }

    #[test]
    fn test_load_rejects_non_positive_price() {
        let path = std::env::temp_dir().join(format!("checkout-item-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[item]\nname = \"Broken\"\n\n[item.price]\namount = -50\ncurrency = \"usd\"\n",
        )
        .unwrap();

        let result = CheckoutItem::load_from_paths(std::slice::from_ref(&path));
        std::fs::remove_file(&path).unwrap();

        assert!(result.unwrap_err().contains("positive"));
    }

    #[test]
    fn test_load_from_missing_paths() {
        let loaded = CheckoutItem::load_from_paths(&["does/not/exist.toml"]).unwrap();
        assert!(loaded.is_none());
    }
}
