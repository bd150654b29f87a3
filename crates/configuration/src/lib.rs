use crate::error::ConfigError;
use config::{Environment, File, FileFormat};

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod cli;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use cli::AnalysisArgs;
pub use settings::{
    AnalysisSettings, DataSourceSettings, LoggingSettings, Settings, StatisticsSettings,
};

/// The file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of the environment variables that override file values, e.g.
/// `NORMALITY__ANALYSIS__TICKER=AAPL`.
pub const ENV_PREFIX: &str = "NORMALITY";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file at `path`, then
/// `NORMALITY__*` environment variables. Only `DEFAULT_CONFIG_FILE` may be
/// absent; any other path must exist. The result is validated before it is
/// returned.
pub fn load_config(path: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::with_name(path).required(path != DEFAULT_CONFIG_FILE))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

/// Parses and validates settings from TOML text, without consulting the
/// environment.
pub fn parse_config(toml: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}
