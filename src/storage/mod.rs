//! Persistent storage
//!
//! This module handles data persistence for liked recipes and settings.
//! Stores are addressed by a single key and hold one JSON document each.

pub mod kv;
pub mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use kv::{JsonFileStore, KeyValuePersistence, MemoryStore};

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine the data directory")]
    NoDataDir,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Per-user data directory
///
/// Linux: ~/.local/share/recipe-assistant
/// macOS: ~/Library/Application Support/com.RecipeAssistant.recipe-assistant
/// Windows: %APPDATA%/RecipeAssistant/recipe-assistant/data
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    directories::ProjectDirs::from("com", "RecipeAssistant", "recipe-assistant")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
