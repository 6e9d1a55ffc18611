//! Settings storage
//!
//! Manages persistence of application settings.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_API_BASE_URL: &str = "https://forkify-api.herokuapp.com/api";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the recipe API (search and recipe lookup)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Search results shown per page
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
    /// Servings assumed when a recipe payload does not say
    #[serde(default = "default_servings")]
    pub default_servings: u32,
    /// Minutes estimated per started group of three ingredients
    #[serde(default = "default_minutes_per_ingredient_group")]
    pub minutes_per_ingredient_group: u32,
    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Storage key the liked recipes are kept under
    #[serde(default = "default_likes_key")]
    pub likes_key: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_results_per_page() -> usize {
    10
}

fn default_servings() -> u32 {
    4
}

fn default_minutes_per_ingredient_group() -> u32 {
    15
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_likes_key() -> String {
    "likes".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            results_per_page: default_results_per_page(),
            default_servings: default_servings(),
            minutes_per_ingredient_group: default_minutes_per_ingredient_group(),
            request_timeout_secs: default_request_timeout_secs(),
            likes_key: default_likes_key(),
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Ensures all parameters are within acceptable ranges.
    pub fn validate(&mut self) {
        self.results_per_page = self.results_per_page.clamp(1, 100);
        self.default_servings = self.default_servings.clamp(1, 100);

        if self.minutes_per_ingredient_group == 0 {
            self.minutes_per_ingredient_group = default_minutes_per_ingredient_group();
        }

        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 300);

        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            self.api_base_url = default_api_base_url();
        } else if trimmed.len() != self.api_base_url.len() {
            self.api_base_url = trimmed.to_string();
        }

        let valid_key = !self.likes_key.is_empty()
            && self
                .likes_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_key {
            tracing::warn!("Invalid likes key '{}', using default", self.likes_key);
            self.likes_key = default_likes_key();
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match load_settings_internal() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Internal settings loading with error propagation
fn load_settings_internal() -> Result<AppSettings, StorageError> {
    load_settings_from(&get_settings_path()?)
}

fn load_settings_from(path: &Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;

    // Validate loaded settings
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    save_settings_to(&get_settings_path()?, settings)
}

fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), StorageError> {
    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.results_per_page, 10);
        assert_eq!(settings.default_servings, 4);
        assert_eq!(settings.minutes_per_ingredient_group, 15);
        assert_eq!(settings.likes_key, "likes");
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = AppSettings::default();

        settings.results_per_page = 0;
        settings.validate();
        assert_eq!(settings.results_per_page, 1);

        settings.default_servings = 0;
        settings.validate();
        assert_eq!(settings.default_servings, 1);

        settings.minutes_per_ingredient_group = 0;
        settings.validate();
        assert_eq!(settings.minutes_per_ingredient_group, 15);

        settings.api_base_url = "http://localhost:8080/api/".to_string();
        settings.validate();
        assert_eq!(settings.api_base_url, "http://localhost:8080/api");

        settings.api_base_url = "   ".to_string();
        settings.validate();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);

        settings.likes_key = "../likes".to_string();
        settings.validate();
        assert_eq!(settings.likes_key, "likes");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let json = r#"{"results_per_page": 20}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.results_per_page, 20);
        assert_eq!(settings.default_servings, 4);
        assert_eq!(settings.likes_key, "likes");
    }

    #[test]
    fn test_settings_serialization() {
        let settings = AppSettings::default();

        let json = serde_json::to_string_pretty(&settings).unwrap();
        let mut loaded: AppSettings = serde_json::from_str(&json).unwrap();
        loaded.validate();

        assert_eq!(settings.results_per_page, loaded.results_per_page);
        assert_eq!(settings.api_base_url, loaded.api_base_url);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("settings.json");

        let settings = AppSettings {
            results_per_page: 25,
            likes_key: "favorites".to_string(),
            ..AppSettings::default()
        };
        save_settings_to(&path, &settings).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded.results_per_page, 25);
        assert_eq!(loaded.likes_key, "favorites");
        assert_eq!(loaded.default_servings, 4);
    }

    #[test]
    fn test_reload_validates_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings_from(&path).unwrap().results_per_page, 10);

        fs::write(&path, r#"{"results_per_page": 0}"#).unwrap();
        assert_eq!(load_settings_from(&path).unwrap().results_per_page, 1);

        fs::write(&path, "{broken").unwrap();
        assert!(matches!(
            load_settings_from(&path),
            Err(StorageError::Serialization(_))
        ));
    }
}
