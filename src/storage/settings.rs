//! Settings storage
//!
//! Manages persistence of user preferences and resolves the backend URL.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the backend URL
pub const BACKEND_URL_ENV: &str = "CHATBOX_BACKEND_URL";

/// Backend used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the file upload service
    pub backend_url: Option<String>,
    /// UI theme: "dark" or "light"
    pub theme: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backend_url: None,
            theme: "dark".to_string(),
        }
    }
}

impl AppSettings {
    /// Validate settings values
    pub fn validate(&mut self) {
        if self.theme != "dark" && self.theme != "light" {
            self.theme = "dark".to_string();
        }

        // Blank URL means "not configured"
        if self
            .backend_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.backend_url = None;
        }
    }

    /// Backend URL, with the environment taking priority over this file
    pub fn backend_url(&self) -> String {
        resolve_backend_url(
            std::env::var(BACKEND_URL_ENV).ok(),
            self.backend_url.as_deref(),
        )
    }
}

/// Pick the backend URL: environment, then settings file, then the default.
///
/// Empty values are skipped and trailing slashes are removed.
pub fn resolve_backend_url(from_env: Option<String>, from_settings: Option<&str>) -> String {
    from_env
        .as_deref()
        .into_iter()
        .chain(from_settings)
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_BACKEND_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match get_settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Load settings from a specific file
pub fn load_settings_from(path: &Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    save_settings_to(&get_settings_path()?, settings)
}

/// Save settings to a specific file
pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), StorageError> {
    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}
