mod config;
mod database;
mod port;
pub mod records;

pub use config::{ClassifierConfig, Config};
pub use database::SqliteStore;
pub use port::{
    KeyValueStore, MemoryStore, KEY_CUSTOM_TYPES, KEY_HISTORY, KEY_STREAK_RUNNING,
    KEY_STREAK_STARTED_AT,
};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `TRIUMPH_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/triumph[-dev]/`, with `TRIUMPH_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("TRIUMPH_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TRIUMPH_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("triumph-dev")
            } else {
                base_dir.join("triumph")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
