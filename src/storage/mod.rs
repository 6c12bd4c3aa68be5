//! Local key-value persistence
//!
//! This module contains the stores that hold widget data between runs and the
//! best-effort adapter the widgets load from and save through.

pub mod persistence;
pub mod store;

use std::path::PathBuf;

// Re-export main types
pub use persistence::Persistence;
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};

/// Storage key for the committed pomodoro settings
pub const TIMER_SETTINGS_KEY: &str = "pomodoro_settings";
/// Storage key for the to-do list
pub const TODOS_KEY: &str = "todos";
/// Storage key for the kanban columns
pub const KANBAN_KEY: &str = "kanban_columns";

/// Default location of the storage file, `~/.config/focus-suite/storage.json`
pub fn default_data_file() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("focus-suite")
        .join("storage.json")
}
