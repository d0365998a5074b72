//! Quantity intent captured during recipe setup.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit for "amount I have" quantities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AmountUnit {
    #[default]
    Units,
    Grams,
}

impl FromStr for AmountUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "units" | "unidades" => Ok(AmountUnit::Units),
            "grams" | "gramos" | "g" => Ok(AmountUnit::Grams),
            _ => Err(format!("Invalid amount unit: {s}")),
        }
    }
}

/// Produce size modifier for boiled-tuber recipes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProduceSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FromStr for ProduceSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "pequena" | "pequeña" => Ok(ProduceSize::Small),
            "medium" | "mediana" => Ok(ProduceSize::Medium),
            "large" | "grande" => Ok(ProduceSize::Large),
            _ => Err(format!("Invalid produce size: {s}")),
        }
    }
}

/// How much food the user wants to cook.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Cook for this many people (1..=8)
    People(u8),
    /// Cook the amount on hand, in units or grams
    Amount { value: f64, unit: AmountUnit },
}

/// User-specified quantity intent, set during setup and consumed once to
/// produce a portion bucket and a timer scale factor. Immutable once
/// cooking starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuantityIntent {
    pub quantity: Quantity,

    /// Produce variety ("blanca", "huayro", ...) for boiled-tuber recipes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produce_type: Option<String>,

    #[serde(default)]
    pub produce_size: ProduceSize,
}

impl QuantityIntent {
    /// Intent for a people count, clamped to 1..=8.
    pub fn for_people(count: u8) -> Self {
        Self {
            quantity: Quantity::People(count.clamp(1, 8)),
            produce_type: None,
            produce_size: ProduceSize::default(),
        }
    }

    /// Intent for an amount on hand. Non-finite or negative values are
    /// floored to zero and later clamped by the resolver.
    pub fn for_amount(value: f64, unit: AmountUnit) -> Self {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        Self {
            quantity: Quantity::Amount { value, unit },
            produce_type: None,
            produce_size: ProduceSize::default(),
        }
    }

    pub fn with_produce(mut self, produce_type: Option<String>, size: ProduceSize) -> Self {
        self.produce_type = produce_type;
        self.produce_size = size;
        self
    }
}

impl Default for QuantityIntent {
    fn default() -> Self {
        Self::for_people(2)
    }
}
