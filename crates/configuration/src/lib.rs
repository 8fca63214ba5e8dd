use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod args;
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use args::ConfigArgs;
pub use logging::init_tracing;
pub use settings::{
    AllocationSheet, CacheConfig, ColumnRef, Config, HistorySheet, LocaleConfig, LoggingConfig,
    ReturnsSheet, Sheets, SourceConfig,
};

/// Prefix of the environment variables that override file settings,
/// e.g. `MERIDIAN__SOURCE__SPREADSHEET_ID`.
pub const ENV_PREFIX: &str = "MERIDIAN";

/// Loads the application configuration from a TOML file.
///
/// This function is the primary entry point for this crate. It reads the file,
/// layers `MERIDIAN__*` environment variables on top, deserializes the result
/// into our strongly-typed `Config` struct and validates it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

    finish(builder)
}

/// Loads the configuration from TOML text, without environment overrides.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml));

    finish(builder)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
