mod config;
pub mod task_store;

pub use config::{Config, PlannerConfig, ProfileConfig};
pub use task_store::TaskStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/dayblock[-dev]/` based on DAYBLOCK_ENV.
///
/// Set DAYBLOCK_ENV=dev to use development data directory. The directory is
/// not created here; writers create it on first save.
///
/// # Errors
/// Returns an error if the home directory cannot be determined.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?.join(".config");

    let env = std::env::var("DAYBLOCK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dayblock-dev")
    } else {
        base_dir.join("dayblock")
    };
    Ok(dir)
}
