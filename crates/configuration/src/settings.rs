use crate::error::ConfigError;
use chrono::{Datelike, NaiveDate, Utc};
use core_types::{Interval, PriceRequest};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub analysis: AnalysisSettings,
    pub statistics: StatisticsSettings,
    pub data_source: DataSourceSettings,
    pub logging: LoggingSettings,
}

/// What to analyse. This replaces the ticker, interval and date pickers of an
/// interactive dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// The symbol to analyse (e.g., "^GSPC", "BTC-USD").
    pub ticker: String,
    /// The sampling frequency of the prices.
    pub interval: Interval,
    /// First day of the study period.
    pub start_date: NaiveDate,
    /// End of the study period (exclusive).
    pub end_date: NaiveDate,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let today = Utc::now().date_naive();
        Self {
            ticker: "^GSPC".to_string(),
            interval: Interval::Daily,
            start_date: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today),
        }
    }
}

impl AnalysisSettings {
    pub fn price_request(&self) -> PriceRequest {
        PriceRequest {
            ticker: self.ticker.clone(),
            interval: self.interval,
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// Parameters of the statistical pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatisticsSettings {
    /// A run needs strictly more returns than this.
    pub min_sample_size: usize,
    pub histogram_bins: usize,
    /// Skewness beyond +/- this value is reported as a tail.
    pub skew_threshold: f64,
    /// Excess kurtosis beyond +/- this value is reported as light or heavy tails.
    pub kurtosis_threshold: f64,
}

impl Default for StatisticsSettings {
    fn default() -> Self {
        Self {
            min_sample_size: 30,
            histogram_bins: 10,
            skew_threshold: 0.5,
            kurtosis_threshold: 0.5,
        }
    }
}

/// Connection parameters for the market-data provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataSourceSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Additional attempts after a failed request. 0 disables retrying.
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_secs: 30,
            max_retries: 2,
            retry_base_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// When set, logs are also written to daily rolling files in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            directory: None,
        }
    }
}

impl Settings {
    /// Checks the invariants the rest of the application relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let analysis = &self.analysis;
        if analysis.ticker.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "analysis.ticker must not be empty".to_string(),
            ));
        }
        if analysis.start_date >= analysis.end_date {
            return Err(ConfigError::ValidationError(format!(
                "analysis.start_date ({}) must be before analysis.end_date ({})",
                analysis.start_date, analysis.end_date
            )));
        }

        let stats = &self.statistics;
        // Excess kurtosis needs four observations; the gate is exclusive.
        if stats.min_sample_size < 3 {
            return Err(ConfigError::ValidationError(format!(
                "statistics.min_sample_size must be at least 3, got {}",
                stats.min_sample_size
            )));
        }
        if stats.histogram_bins == 0 {
            return Err(ConfigError::ValidationError(
                "statistics.histogram_bins must be greater than zero".to_string(),
            ));
        }
        for (name, value) in [
            ("statistics.skew_threshold", stats.skew_threshold),
            ("statistics.kurtosis_threshold", stats.kurtosis_threshold),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.data_source.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "data_source.base_url must not be empty".to_string(),
            ));
        }
        if self.data_source.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "data_source.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
