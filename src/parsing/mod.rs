//! Ingredient text parsing
//!
//! This module turns free-text ingredient lines into structured records.

pub mod ingredient;
pub mod units;

use thiserror::Error;

pub use ingredient::parse;
pub use units::normalize;

/// Ingredient parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Ingredient line is empty")]
    EmptyLine,
}
