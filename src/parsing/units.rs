//! Unit normalization
//!
//! Resolves the many spellings of a unit found in free-text recipes to one
//! [`CanonicalUnit`]. Unknown tokens are not an error: they simply belong to
//! the ingredient name.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::types::CanonicalUnit;

static UNITS: Lazy<HashMap<&'static str, CanonicalUnit>> = Lazy::new(|| {
    use CanonicalUnit::*;

    let table: &[(CanonicalUnit, &[&str])] = &[
        (Teaspoon, &["tsp", "tsps", "teaspoon", "teaspoons", "t"]),
        (Tablespoon, &["tbsp", "tbsps", "tbs", "tbl", "tablespoon", "tablespoons"]),
        (Cup, &["cup", "cups", "c"]),
        (FluidOunce, &["floz", "fl.oz", "fl-oz"]),
        (Milliliter, &["ml", "mls", "milliliter", "milliliters", "millilitre", "millilitres"]),
        (Liter, &["l", "liter", "liters", "litre", "litres"]),
        (Pint, &["pint", "pints", "pt", "pts"]),
        (Quart, &["quart", "quarts", "qt", "qts"]),
        (Gallon, &["gallon", "gallons", "gal"]),
        (Ounce, &["oz", "ounce", "ounces"]),
        (Pound, &["pound", "pounds", "lb", "lbs"]),
        (Gram, &["g", "gr", "gram", "grams", "gramme", "grammes"]),
        (Kilogram, &["kg", "kgs", "kilogram", "kilograms"]),
        (Pinch, &["pinch", "pinches"]),
        (Dash, &["dash", "dashes"]),
        (Clove, &["clove", "cloves"]),
        (Can, &["can", "cans"]),
        (Package, &["package", "packages", "pkg", "pkgs", "packet", "packets"]),
        (Slice, &["slice", "slices"]),
        (Piece, &["piece", "pieces", "pc", "pcs"]),
        (Stick, &["stick", "sticks"]),
        (Bunch, &["bunch", "bunches"]),
    ];

    table
        .iter()
        .flat_map(|(unit, spellings)| spellings.iter().map(move |s| (*s, *unit)))
        .collect()
});

/// Resolve a raw unit token to its canonical unit
///
/// Matching ignores case and a trailing `.` or `,` ("Tbsp." -> tbsp).
/// A capital `T` on its own is the conventional tablespoon abbreviation and is
/// checked before case folding, since lower-case `t` means teaspoon.
pub fn normalize(raw: &str) -> Option<CanonicalUnit> {
    let token = raw.trim().trim_end_matches(['.', ',']);
    if token.is_empty() {
        return None;
    }
    if token == "T" {
        return Some(CanonicalUnit::Tablespoon);
    }

    UNITS.get(token.to_lowercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tablespoon_synonyms() {
        for raw in ["tbsp", "tbsps", "tablespoon", "tablespoons", "Tbsp.", "T"] {
            assert_eq!(normalize(raw), Some(CanonicalUnit::Tablespoon), "{raw}");
        }
    }

    #[test]
    fn test_lowercase_t_is_teaspoon() {
        assert_eq!(normalize("t"), Some(CanonicalUnit::Teaspoon));
        assert_eq!(normalize("teaspoons"), Some(CanonicalUnit::Teaspoon));
    }

    #[test]
    fn test_families() {
        assert_eq!(normalize("Cups"), Some(CanonicalUnit::Cup));
        assert_eq!(normalize("ounces"), Some(CanonicalUnit::Ounce));
        assert_eq!(normalize("lbs"), Some(CanonicalUnit::Pound));
        assert_eq!(normalize("kg"), Some(CanonicalUnit::Kilogram));
        assert_eq!(normalize("cloves,"), Some(CanonicalUnit::Clove));
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(normalize("apples"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("."), None);
        assert_eq!(normalize("large"), None);
    }
}
