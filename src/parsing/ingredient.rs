//! Ingredient line parser
//!
//! Turns a raw ingredient line such as `"1 1/2 cups (about 200g) of flour"`
//! into a structured [`Ingredient`]: leading quantity, optional unit, name.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsing::units;
use crate::types::{CanonicalUnit, Ingredient};

use super::ParseError;

/// Innermost bracketed remark: "(about 200g)", "[optional]"
static REMARKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(\([^()]*\)|\[[^\[\]]*\])\s*").expect("remark pattern is valid")
});

/// Parse a single ingredient line
///
/// Lines with no leading amount yield `quantity: None`; a token that is not a
/// known unit stays part of the name. A line holding only an amount is
/// accepted with an empty name. Without an amount, a lone unit word is the
/// name ("Cloves").
pub fn parse(raw_line: &str) -> Result<Ingredient, ParseError> {
    let cleaned = strip_remarks(raw_line);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(ParseError::EmptyLine);
    }

    let (quantity, mut rest) = match take_quantity(&tokens) {
        Some((q, used)) => (Some(q), &tokens[used..]),
        None => (None, &tokens[..]),
    };

    let unit = match take_unit(rest) {
        Some((unit, used)) if quantity.is_some() || used < rest.len() => {
            rest = &rest[used..];
            Some(unit)
        }
        _ => None,
    };

    if rest.first().is_some_and(|t| t.eq_ignore_ascii_case("of")) {
        rest = &rest[1..];
    }

    let name = rest.join(" ").trim().to_string();
    Ok(Ingredient::new(quantity, unit, name))
}

/// Removes remarks from the inside out, so nested ones go too
fn strip_remarks(line: &str) -> String {
    let mut cleaned = line.to_string();
    while REMARKS.is_match(&cleaned) {
        cleaned = REMARKS.replace_all(&cleaned, " ").into_owned();
    }
    cleaned.trim().to_string()
}

/// Consume a leading amount; returns the value and the number of tokens used
fn take_quantity(tokens: &[&str]) -> Option<(f64, usize)> {
    let first = parse_amount(amount_token(tokens.first()?))?;

    // "1 1/2" or "1 ½": a whole number followed by a proper fraction
    if first.fract() == 0.0 {
        if let Some(second) = tokens.get(1).and_then(|t| parse_fraction(amount_token(t))) {
            if second < 1.0 {
                return Some((first + second, 2));
            }
        }
    }

    Some((first, 1))
}

/// Scraped lines often carry a comma after the amount: "2, cups"
fn amount_token(token: &str) -> &str {
    token.strip_suffix(',').unwrap_or(token)
}

/// One token worth of amount: integer, decimal, fraction, glyph, "1½", "1-1/2"
///
/// Hyphenated amounts add their parts: "1-1/2" is 1.5 and a range such as
/// "2-3" counts as 5.
fn parse_amount(token: &str) -> Option<f64> {
    if let Some(value) = parse_number(token) {
        return Some(value);
    }
    if let Some(value) = parse_fraction(token) {
        return Some(value);
    }

    if let Some((left, right)) = token.split_once('-') {
        let part = |t: &str| parse_number(t).or_else(|| parse_fraction(t));
        return Some(part(left)? + part(right)?);
    }

    // "1½": digits glued to a glyph
    let glyph_at = token.char_indices().find(|(_, c)| glyph_value(*c).is_some())?.0;
    let (whole, glyph) = token.split_at(glyph_at);
    let whole = parse_number(whole)?;
    let frac = parse_fraction(glyph)?;
    (whole.fract() == 0.0).then_some(whole + frac)
}

/// Plain integer or decimal, digits and at most one dot only
fn parse_number(token: &str) -> Option<f64> {
    if token.is_empty()
        || !token.chars().all(|c| c.is_ascii_digit() || c == '.')
        || !token.chars().any(|c| c.is_ascii_digit())
        || token.matches('.').count() > 1
    {
        return None;
    }
    token.parse().ok()
}

/// "1/2", "1⁄2" (fraction slash) or a single unicode glyph such as "½"
fn parse_fraction(token: &str) -> Option<f64> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return glyph_value(c);
    }

    let (num, den) = token.split_once(['/', '\u{2044}'])?;
    if num.is_empty() || den.is_empty() {
        return None;
    }
    if !num.chars().all(|c| c.is_ascii_digit()) || !den.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

fn glyph_value(c: char) -> Option<f64> {
    let value = match c {
        '½' => 1.0 / 2.0,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '¼' => 1.0 / 4.0,
        '¾' => 3.0 / 4.0,
        '⅕' => 1.0 / 5.0,
        '⅖' => 2.0 / 5.0,
        '⅗' => 3.0 / 5.0,
        '⅘' => 4.0 / 5.0,
        '⅙' => 1.0 / 6.0,
        '⅚' => 5.0 / 6.0,
        '⅛' => 1.0 / 8.0,
        '⅜' => 3.0 / 8.0,
        '⅝' => 5.0 / 8.0,
        '⅞' => 7.0 / 8.0,
        _ => return None,
    };
    Some(value)
}

/// Consume a unit; "fl oz" spans two tokens
fn take_unit(tokens: &[&str]) -> Option<(CanonicalUnit, usize)> {
    let first = tokens.first()?;

    let fluid = matches!(first.to_lowercase().as_str(), "fl" | "fl." | "fluid");
    if fluid {
        if let Some(CanonicalUnit::Ounce) = tokens.get(1).and_then(|t| units::normalize(t)) {
            return Some((CanonicalUnit::FluidOunce, 2));
        }
    }

    units::normalize(first).map(|unit| (unit, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("quantity");
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_fraction_with_unit() {
        let ingredient = parse("1/2 cup sugar").unwrap();
        assert_eq!(ingredient.quantity, Some(0.5));
        assert_eq!(ingredient.unit, Some(CanonicalUnit::Cup));
        assert_eq!(ingredient.name, "sugar");
    }

    #[test]
    fn test_count_without_unit() {
        let ingredient = parse("3 apples").unwrap();
        assert_eq!(ingredient.quantity, Some(3.0));
        assert_eq!(ingredient.unit, None);
        assert_eq!(ingredient.name, "apples");
    }

    #[test]
    fn test_mixed_number() {
        let ingredient = parse("1 1/2 tablespoons olive oil").unwrap();
        assert_close(ingredient.quantity, 1.5);
        assert_eq!(ingredient.unit, Some(CanonicalUnit::Tablespoon));
        assert_eq!(ingredient.name, "olive oil");
    }

    #[test]
    fn test_hyphenated_mixed_number() {
        let ingredient = parse("4-1/2 cups flour").unwrap();
        assert_close(ingredient.quantity, 4.5);
        assert_eq!(ingredient.unit, Some(CanonicalUnit::Cup));
    }

    #[test]
    fn test_unicode_glyphs() {
        assert_close(parse("½ tsp salt").unwrap().quantity, 0.5);
        assert_close(parse("1½ cups milk").unwrap().quantity, 1.5);
        assert_close(parse("2 ¾ cups water").unwrap().quantity, 2.75);
    }

    #[test]
    fn test_decimal() {
        let ingredient = parse("2.5 kg potatoes").unwrap();
        assert_close(ingredient.quantity, 2.5);
        assert_eq!(ingredient.unit, Some(CanonicalUnit::Kilogram));
    }

    #[test]
    fn test_no_quantity() {
        let ingredient = parse("salt to taste").unwrap();
        assert_eq!(ingredient.quantity, None);
        assert_eq!(ingredient.unit, None);
        assert_eq!(ingredient.name, "salt to taste");
    }

    #[test]
    fn test_unit_without_quantity() {
        let ingredient = parse("pinch of nutmeg").unwrap();
        assert_eq!(ingredient.quantity, None);
        assert_eq!(ingredient.unit, Some(CanonicalUnit::Pinch));
        assert_eq!(ingredient.name, "nutmeg");
    }

    #[test]
    fn test_strips_parenthetical_remarks() {
        let ingredient = parse("1 can (14.5 ounces) diced tomatoes [drained]").unwrap();
        assert_eq!(ingredient.quantity, Some(1.0));
        assert_eq!(ingredient.unit, Some(CanonicalUnit::Can));
        assert_eq!(ingredient.name, "diced tomatoes");

        let nested = parse("1 cup ((heaping)) flour [sifted [twice]]").unwrap();
        assert_eq!(nested.unit, Some(CanonicalUnit::Cup));
        assert_eq!(nested.name, "flour");
    }

    #[test]
    fn test_range_adds_parts() {
        let ingredient = parse("2-3 cloves garlic").unwrap();
        assert_close(ingredient.quantity, 5.0);
        assert_eq!(ingredient.unit, Some(CanonicalUnit::Clove));
        assert_eq!(ingredient.name, "garlic");

        assert_close(parse("1/2-1 cup milk").unwrap().quantity, 1.5);
        assert_eq!(parse("2- cups").unwrap().quantity, None);
    }

    #[test]
    fn test_lone_unit_word_is_a_name() {
        let spice = parse("Cloves").unwrap();
        assert_eq!(spice.quantity, None);
        assert_eq!(spice.unit, None);
        assert_eq!(spice.name, "Cloves");

        let counted = parse("2 cloves").unwrap();
        assert_eq!(counted.unit, Some(CanonicalUnit::Clove));
        assert_eq!(counted.name, "");
    }

    #[test]
    fn test_fraction_slash_and_trailing_comma() {
        let slashed = parse("1\u{2044}2 cup butter").unwrap();
        assert_close(slashed.quantity, 0.5);
        assert_eq!(slashed.unit, Some(CanonicalUnit::Cup));

        assert_close(parse("1 3\u{2044}4 cups stock").unwrap().quantity, 1.75);

        let comma = parse("2, cups rice").unwrap();
        assert_close(comma.quantity, 2.0);
        assert_eq!(comma.unit, Some(CanonicalUnit::Cup));
        assert_eq!(comma.name, "rice");
    }

    #[test]
    fn test_leading_of_only() {
        assert_eq!(parse("1 cup of sugar").unwrap().name, "sugar");
        assert_eq!(parse("1 tsp cream of tartar").unwrap().name, "cream of tartar");
    }

    #[test]
    fn test_fluid_ounces() {
        let ingredient = parse("8 fl oz cream").unwrap();
        assert_eq!(ingredient.unit, Some(CanonicalUnit::FluidOunce));
        assert_eq!(ingredient.name, "cream");
    }

    #[test]
    fn test_name_keeps_display_case() {
        let ingredient = parse("2 Tbsp. Dijon Mustard").unwrap();
        assert_eq!(ingredient.unit, Some(CanonicalUnit::Tablespoon));
        assert_eq!(ingredient.name, "Dijon Mustard");
        assert_eq!(ingredient.key(), "dijon mustard");
    }

    #[test]
    fn test_zero_denominator_is_not_a_quantity() {
        let ingredient = parse("1/0 cup sugar").unwrap();
        assert_eq!(ingredient.quantity, None);
        assert_eq!(ingredient.name, "1/0 cup sugar");
    }

    #[test]
    fn test_quantity_only() {
        let ingredient = parse("  3  ").unwrap();
        assert_eq!(ingredient.quantity, Some(3.0));
        assert_eq!(ingredient.name, "");
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse(""), Err(ParseError::EmptyLine));
        assert_eq!(parse("   \t "), Err(ParseError::EmptyLine));
        assert_eq!(parse("(optional)"), Err(ParseError::EmptyLine));
    }

    #[test]
    fn test_deterministic() {
        let line = "1 1/2 cups (heaping) of all-purpose flour";
        assert_eq!(parse(line), parse(line));
    }
}
