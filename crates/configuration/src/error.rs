use thiserror::Error;

/// Failures while assembling or checking `Settings`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file or a `NORMALITY__*` variable could not be read or
    /// deserialized.
    #[error("Could not read settings from config file or environment: {0}")]
    LoadError(#[from] config::ConfigError),

    /// The settings were read but describe an impossible analysis.
    #[error("Invalid settings: {0}")]
    ValidationError(String),
}
