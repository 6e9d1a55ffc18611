//! Shared type definitions
//!
//! This module contains the data types passed between the parser, the
//! stores and the rendering layer.

pub mod ingredient;
pub mod quantity;
pub mod recipe;

pub use ingredient::{CanonicalUnit, Ingredient, UnitFamily};
pub use quantity::format_quantity;
pub use recipe::{LikedRecipe, SearchHit};
