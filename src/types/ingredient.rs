//! Ingredient types
//!
//! Defines the structured ingredient record and the canonical unit vocabulary.

use serde::{Deserialize, Serialize};

/// Broad family a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitFamily {
    Volume,
    Mass,
    Count,
}

/// Canonical representation of an ingredient unit
///
/// Every spelling, plural and abbreviation of a unit resolves to exactly one
/// variant. The serialized form is the canonical token (see [`CanonicalUnit::as_str`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalUnit {
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "cup")]
    Cup,
    #[serde(rename = "fl oz")]
    FluidOunce,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "pint")]
    Pint,
    #[serde(rename = "quart")]
    Quart,
    #[serde(rename = "gallon")]
    Gallon,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "pound")]
    Pound,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "pinch")]
    Pinch,
    #[serde(rename = "dash")]
    Dash,
    #[serde(rename = "clove")]
    Clove,
    #[serde(rename = "can")]
    Can,
    #[serde(rename = "package")]
    Package,
    #[serde(rename = "slice")]
    Slice,
    #[serde(rename = "piece")]
    Piece,
    #[serde(rename = "stick")]
    Stick,
    #[serde(rename = "bunch")]
    Bunch,
}

impl CanonicalUnit {
    /// Canonical token shown to the user
    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalUnit::Teaspoon => "tsp",
            CanonicalUnit::Tablespoon => "tbsp",
            CanonicalUnit::Cup => "cup",
            CanonicalUnit::FluidOunce => "fl oz",
            CanonicalUnit::Milliliter => "ml",
            CanonicalUnit::Liter => "l",
            CanonicalUnit::Pint => "pint",
            CanonicalUnit::Quart => "quart",
            CanonicalUnit::Gallon => "gallon",
            CanonicalUnit::Ounce => "oz",
            CanonicalUnit::Pound => "pound",
            CanonicalUnit::Gram => "g",
            CanonicalUnit::Kilogram => "kg",
            CanonicalUnit::Pinch => "pinch",
            CanonicalUnit::Dash => "dash",
            CanonicalUnit::Clove => "clove",
            CanonicalUnit::Can => "can",
            CanonicalUnit::Package => "package",
            CanonicalUnit::Slice => "slice",
            CanonicalUnit::Piece => "piece",
            CanonicalUnit::Stick => "stick",
            CanonicalUnit::Bunch => "bunch",
        }
    }

    pub fn family(self) -> UnitFamily {
        match self {
            CanonicalUnit::Teaspoon
            | CanonicalUnit::Tablespoon
            | CanonicalUnit::Cup
            | CanonicalUnit::FluidOunce
            | CanonicalUnit::Milliliter
            | CanonicalUnit::Liter
            | CanonicalUnit::Pint
            | CanonicalUnit::Quart
            | CanonicalUnit::Gallon => UnitFamily::Volume,
            CanonicalUnit::Ounce
            | CanonicalUnit::Pound
            | CanonicalUnit::Gram
            | CanonicalUnit::Kilogram => UnitFamily::Mass,
            _ => UnitFamily::Count,
        }
    }
}

impl std::fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single parsed ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Amount, or `None` when the line carried no leading number ("salt to taste")
    pub quantity: Option<f64>,
    /// Recognized unit, if any
    pub unit: Option<CanonicalUnit>,
    /// Display-cased ingredient name
    pub name: String,
}

impl Ingredient {
    pub fn new(quantity: Option<f64>, unit: Option<CanonicalUnit>, name: impl Into<String>) -> Self {
        Self {
            quantity,
            unit,
            name: name.into(),
        }
    }

    /// Lower-cased name used for matching
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Copy of this ingredient with the quantity multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            quantity: self.quantity.map(|q| q * factor),
            unit: self.unit,
            name: self.name.clone(),
        }
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(q) = self.quantity {
            parts.push(crate::types::quantity::format_quantity(q));
        }
        if let Some(unit) = self.unit {
            parts.push(unit.as_str().to_string());
        }
        if !self.name.is_empty() {
            parts.push(self.name.clone());
        }
        write!(f, "{}", parts.join(" "))
    }
}
