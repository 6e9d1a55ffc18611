//! Favorites store
//!
//! Keeps the set of liked recipes and mirrors the whole collection into a
//! [`KeyValuePersistence`] backend after every change.

use std::sync::Arc;

use crate::storage::{KeyValuePersistence, StorageError};
use crate::types::LikedRecipe;

pub const DEFAULT_LIKES_KEY: &str = "likes";

/// Liked recipes, at most one per recipe ID, in the order they were liked
pub struct FavoritesStore {
    likes: Vec<LikedRecipe>,
    persistence: Arc<dyn KeyValuePersistence>,
    key: String,
}

impl FavoritesStore {
    pub fn new(persistence: Arc<dyn KeyValuePersistence>) -> Self {
        Self::with_key(persistence, DEFAULT_LIKES_KEY)
    }

    pub fn with_key(persistence: Arc<dyn KeyValuePersistence>, key: impl Into<String>) -> Self {
        Self {
            likes: Vec::new(),
            persistence,
            key: key.into(),
        }
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|like| like.id == id)
    }

    /// Record a like and persist the collection
    ///
    /// Liking an already liked recipe overwrites the entry in place.
    pub fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        image_url: impl Into<String>,
    ) -> LikedRecipe {
        self.insert(LikedRecipe::new(id, title, author, image_url))
    }

    /// Record an already built like and persist the collection
    pub fn insert(&mut self, like: LikedRecipe) -> LikedRecipe {
        match self.likes.iter_mut().find(|existing| existing.id == like.id) {
            Some(existing) => *existing = like.clone(),
            None => self.likes.push(like.clone()),
        }
        tracing::debug!("Liked recipe {}", like.id);
        self.sync();
        like
    }

    /// Remove a like and persist the collection; unknown IDs are ignored
    pub fn delete_like(&mut self, id: &str) -> Option<LikedRecipe> {
        let index = self.likes.iter().position(|like| like.id == id)?;
        let removed = self.likes.remove(index);
        tracing::debug!("Unliked recipe {}", id);
        self.sync();
        Some(removed)
    }

    pub fn count(&self) -> usize {
        self.likes.len()
    }

    pub fn get(&self, id: &str) -> Option<&LikedRecipe> {
        self.likes.iter().find(|like| like.id == id)
    }

    pub fn likes(&self) -> &[LikedRecipe] {
        &self.likes
    }

    pub fn iter(&self) -> impl Iterator<Item = &LikedRecipe> {
        self.likes.iter()
    }

    /// Replace the in-memory collection with the persisted one
    ///
    /// Nothing stored yet means no likes. Duplicate IDs in stored data keep
    /// the last entry.
    pub fn load(&mut self) -> Result<(), StorageError> {
        let stored: Vec<LikedRecipe> = match self.persistence.read_all(&self.key)? {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };

        let mut likes: Vec<LikedRecipe> = Vec::with_capacity(stored.len());
        for like in stored {
            match likes.iter_mut().find(|existing| existing.id == like.id) {
                Some(existing) => *existing = like,
                None => likes.push(like),
            }
        }

        tracing::info!("Loaded {} liked recipes", likes.len());
        self.likes = likes;
        Ok(())
    }

    /// Write the whole collection to the persistence backend
    pub fn persist(&self) -> Result<(), StorageError> {
        let value = serde_json::to_value(&self.likes)?;
        self.persistence.write_all(&self.key, &value)
    }

    /// Best-effort persist: failures are logged, the in-memory change stays
    fn sync(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!("Failed to persist liked recipes: {}", e);
        }
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("key", &self.key)
            .field("likes", &self.likes)
            .finish()
    }
}
