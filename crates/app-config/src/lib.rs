// In crates/app-config/src/lib.rs

use config::{Config, Environment, File, FileFormat};
use std::path::Path;

pub mod error;
pub mod tickers;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use tickers::TickerFileReader;
pub use types::{AlpacaSettings, ScannerSettings, Settings};

/// Loads the application settings from the `config/` directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file in `dir`.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings_from(dir: &Path) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    let base = dir.join("base");
    let overlay = dir.join(&environment);

    let settings = Config::builder()
        .add_source(File::with_name(&base.to_string_lossy()))
        .add_source(File::with_name(&overlay.to_string_lossy()).required(false))
        // e.g. `APP__ALPACA__API_KEY=...`
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    tracing::debug!(environment, "Settings loaded.");

    Ok(settings)
}

/// Parses settings from a TOML document without touching the filesystem or environment.
pub fn parse_settings(toml_src: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from_str(toml_src, FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}
