use crate::classifier::Classification;
use crate::histogram::Histogram;
use crate::moments::MomentSummary;
use chrono::NaiveDate;
use core_types::{Interval, ReturnSeries};
use serde::{Deserialize, Serialize};

/// Identifies which series a report describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub ticker: String,
    pub interval: Interval,
    /// Date of the first return observation.
    pub first_date: NaiveDate,
    /// Date of the last return observation.
    pub last_date: NaiveDate,
}

/// One `description | value` line of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub description: &'static str,
    pub value: String,
}

/// The complete, read-only result of one analysis run.
///
/// This struct is the final output of the `AnalyticsEngine` and the only thing a
/// presentation sink receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub moments: MomentSummary,
    pub classification: Classification,
    pub returns: ReturnSeries,
    pub histogram: Histogram,
}

impl Report {
    /// The two-line reading of skew and kurtosis, values to two decimals.
    pub fn explanation_lines(&self) -> [String; 2] {
        let c = &self.classification;
        [
            format!(
                "Skew = {:.2} ({}): {}",
                self.moments.skewness, c.skew_category, c.skew_explanation
            ),
            format!(
                "Excess Kurtosis = {:.2} ({}): {}",
                self.moments.excess_kurtosis, c.kurtosis_category, c.kurtosis_explanation
            ),
        ]
    }

    pub fn histogram_title(&self) -> String {
        format!("{} {} returns", self.metadata.ticker, self.metadata.interval)
    }

    pub fn histogram_x_label(&self) -> String {
        format!("{} stock returns", self.metadata.interval)
    }

    /// The summary table, always these six rows in this order.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        vec![
            SummaryRow {
                description: "number of data points",
                value: self.moments.n.to_string(),
            },
            SummaryRow {
                description: "first data point",
                value: format_date(self.metadata.first_date),
            },
            SummaryRow {
                description: "last data point",
                value: format_date(self.metadata.last_date),
            },
            SummaryRow {
                description: "interval of returns",
                value: self.metadata.interval.to_string(),
            },
            SummaryRow {
                description: "average return",
                value: format_percent(self.moments.mean),
            },
            SummaryRow {
                description: "standard deviation of return",
                value: format_percent(self.moments.stddev),
            },
        ]
    }
}

/// Formats a fraction as a percentage with two decimals (`0.0123` -> `1.23%`).
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
