//! Recipe Assistant Library
//!
//! Domain and state layer for a recipe assistant: ingredient parsing, serving
//! scaling, the shopping list, liked recipes and paged search results.

pub mod api;
pub mod app;
pub mod models;
pub mod parsing;
pub mod storage;
pub mod types;
