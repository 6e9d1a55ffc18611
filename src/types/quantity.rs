//! Quantity formatting
//!
//! Turns floating point amounts into the kitchen-friendly form shown next to
//! an ingredient: whole numbers stay whole, everything else becomes a
//! (mixed) fraction with a denominator of at most 8.

const MAX_DENOMINATOR: u32 = 8;
const EPSILON: f64 = 1e-9;

/// Format a quantity for display
///
/// `2.0` -> `"2"`, `1.5` -> `"1 1/2"`, `0.333` -> `"1/3"`.
/// Amounts too small to be expressed in eighths keep up to two decimals, or
/// as many as it takes to show one significant digit.
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value < 0.0 {
        return format!("-{}", format_quantity(-value));
    }
    if (value - value.round()).abs() < EPSILON {
        return format!("{:.0}", value.round());
    }

    let whole = value.trunc();
    let frac = value - whole;
    let (num, den) = nearest_fraction(frac);

    if num == 0 {
        if whole == 0.0 {
            return trim_decimals(value);
        }
        return format!("{:.0}", whole);
    }
    if num == den {
        return format!("{:.0}", whole + 1.0);
    }

    if whole == 0.0 {
        format!("{}/{}", num, den)
    } else {
        format!("{:.0} {}/{}", whole, num, den)
    }
}

/// Closest `num/den` to `frac` (0 <= frac < 1), preferring small denominators
fn nearest_fraction(frac: f64) -> (u32, u32) {
    let mut best = (0, 1);
    let mut best_err = frac;

    for den in 1..=MAX_DENOMINATOR {
        let num = (frac * den as f64).round() as u32;
        let err = (frac - num as f64 / den as f64).abs();
        if err + EPSILON < best_err {
            best = (num, den);
            best_err = err;
        }
    }

    best
}

fn trim_decimals(value: f64) -> String {
    let decimals = (-value.log10()).ceil().max(2.0) as usize;
    let s = format!("{:.*}", decimals, value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
