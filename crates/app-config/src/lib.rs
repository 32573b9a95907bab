// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AlertSettings, IndicatorSettings, MarketDataSettings, PushMode, Settings};

/// Loads the application settings from the `config/` directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from("config")
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings_from(dir: &str) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name(&format!("{}/base", dir)))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&format!("{}/{}", dir, environment)).required(false))
        // 3. Load settings from environment variables (e.g., `APP__MARKET_DATA__SYMBOL=...`).
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;
    validate(&settings)?;

    Ok(settings)
}

/// Catches threshold bands that could never fire.
pub fn validate(settings: &Settings) -> Result<()> {
    let bands = [
        ("signals.rsi", settings.signals.rsi),
        ("signals.stoch", settings.signals.stoch),
    ];
    for (key, band) in bands {
        if band.buy >= band.sell {
            return Err(Error::InvalidSetting {
                key: key.to_string(),
                reason: format!("buy ({}) must be below sell ({})", band.buy, band.sell),
            });
        }
    }
    if settings.market_data.symbol.trim().is_empty() {
        return Err(Error::InvalidSetting {
            key: "market_data.symbol".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}
