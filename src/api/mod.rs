//! Recipe data sources
//!
//! The stores never fetch anything themselves. Raw payloads come from a
//! [`RecipeRepository`] or [`SearchRepository`] and are validated when they
//! are turned into a `RecipeModel` or `SearchResultSet`.

pub mod forkify;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use forkify::ForkifyClient;

/// Fetch errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Looks up a single recipe by ID
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn fetch_by_id(&self, id: &str) -> Result<Value, FetchError>;
}

/// Runs a recipe search
#[async_trait]
pub trait SearchRepository: Send + Sync {
    async fn fetch_by_query(&self, query: &str) -> Result<Value, FetchError>;
}
