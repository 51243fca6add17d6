//! Settings location on disk
//!
//! Only `settings.json` lives here; sent messages are never persisted.

use std::path::PathBuf;
use thiserror::Error;

pub mod settings;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No home directory to keep settings in")]
    NoDataDir,
    #[error("Settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Platform data directory for Chatbox, e.g. `~/.local/share/chatbox` on Linux
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    directories::ProjectDirs::from("com", "Chatbox", "Chatbox")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
