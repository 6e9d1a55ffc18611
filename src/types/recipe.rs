//! Recipe summary types
//!
//! Lightweight records shared by search results and the favorites store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(alias = "recipe_id")]
    pub id: String,
    pub title: String,
    #[serde(alias = "publisher")]
    pub author: String,
    #[serde(default)]
    pub image_url: String,
}

/// A recipe the user marked as liked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikedRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    /// When the like was recorded
    #[serde(default = "Utc::now")]
    pub liked_at: DateTime<Utc>,
}

impl LikedRecipe {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            image_url: image_url.into(),
            liked_at: Utc::now(),
        }
    }
}

impl PartialEq for LikedRecipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.author == other.author
            && self.image_url == other.image_url
    }
}
