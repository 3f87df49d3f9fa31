pub mod config;

use std::path::PathBuf;

pub use config::{AppConfig, ConfigError, Environment, DEFAULT_BIND_ADDR};

/// Populates the process environment from the nearest `.env` file.
///
/// Returns the path that was loaded. A missing file is not an error since
/// deployed builds configure everything through the real environment.
pub fn load_env_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

#[cfg(test)]
pub(crate) static ENV_GUARD: std::sync::LazyLock<std::sync::Mutex<()>> =
    std::sync::LazyLock::new(|| std::sync::Mutex::new(()));
