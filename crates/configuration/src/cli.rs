use crate::error::ConfigError;
use crate::settings::AnalysisSettings;
use chrono::{Datelike, NaiveDate};
use clap::Args;
use core_types::Interval;

/// Command-line overrides for the analysis settings.
///
/// Study periods are chosen by month: the start is the first day of the start
/// month and the end is the first day of the end month (exclusive).
#[derive(Debug, Clone, Default, Args)]
pub struct AnalysisArgs {
    /// The ticker to analyse (e.g., "^GSPC", "AAPL", "BTC-USD").
    #[arg(long)]
    pub ticker: Option<String>,

    /// The sampling interval: 1d, 1wk, 1mo or 3mo.
    #[arg(long)]
    pub interval: Option<Interval>,

    /// Start month of the study (1-12).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub start_month: Option<u32>,

    /// Start year of the study.
    #[arg(long)]
    pub start_year: Option<i32>,

    /// End month of the study (1-12).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub end_month: Option<u32>,

    /// End year of the study.
    #[arg(long)]
    pub end_year: Option<i32>,
}

impl AnalysisArgs {
    /// Applies the overrides on top of settings loaded from file and environment.
    pub fn apply(&self, settings: &mut AnalysisSettings) -> Result<(), ConfigError> {
        if let Some(ticker) = &self.ticker {
            settings.ticker = ticker.clone();
        }
        if let Some(interval) = self.interval {
            settings.interval = interval;
        }
        settings.start_date = month_start(settings.start_date, self.start_year, self.start_month)?;
        settings.end_date = month_start(settings.end_date, self.end_year, self.end_month)?;
        Ok(())
    }
}

fn month_start(
    current: NaiveDate,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<NaiveDate, ConfigError> {
    if year.is_none() && month.is_none() {
        return Ok(current);
    }
    let year = year.unwrap_or(current.year());
    let month = month.unwrap_or(current.month());
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        ConfigError::ValidationError(format!("{}-{:02} is not a valid month", year, month))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: AnalysisArgs,
    }

    fn base() -> AnalysisSettings {
        AnalysisSettings {
            ticker: "^GSPC".to_string(),
            interval: Interval::Daily,
            start_date: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn no_arguments_keep_settings() {
        let mut settings = base();
        AnalysisArgs::default().apply(&mut settings).unwrap();
        assert_eq!(settings, base());
    }

    #[test]
    fn parses_and_applies_overrides() {
        let cli = TestCli::try_parse_from([
            "test",
            "--ticker",
            "TSLA",
            "--interval",
            "1wk",
            "--start-month",
            "3",
            "--start-year",
            "2015",
            "--end-year",
            "2020",
        ])
        .unwrap();

        let mut settings = base();
        cli.args.apply(&mut settings).unwrap();

        assert_eq!(settings.ticker, "TSLA");
        assert_eq!(settings.interval, Interval::Weekly);
        assert_eq!(settings.start_date, NaiveDate::from_ymd_opt(2015, 3, 1).unwrap());
        // The end month is kept from the loaded settings.
        assert_eq!(settings.end_date, NaiveDate::from_ymd_opt(2020, 6, 1).unwrap());
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert!(TestCli::try_parse_from(["test", "--start-month", "13"]).is_err());
    }

    #[test]
    fn rejects_unknown_interval() {
        assert!(TestCli::try_parse_from(["test", "--interval", "4h"]).is_err());
    }
}
