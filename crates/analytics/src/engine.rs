use crate::classifier::{ClassificationThresholds, Classifier};
use crate::error::AnalyticsError;
use crate::histogram::{DEFAULT_BIN_COUNT, Histogram};
use crate::moments::MomentEstimator;
use crate::report::{Report, ReportMetadata};
use crate::returns::log_returns;
use core_types::{Interval, PriceSeries};

/// A stateless calculator that turns one price series into one `Report`.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsEngine {
    estimator: MomentEstimator,
    classifier: Classifier,
    histogram_bins: usize,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            estimator: MomentEstimator::default(),
            classifier: Classifier::default(),
            histogram_bins: DEFAULT_BIN_COUNT,
        }
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A run needs strictly more than `min_sample_size` returns.
    pub fn with_min_sample_size(mut self, min_sample_size: usize) -> Self {
        self.estimator = MomentEstimator::new(min_sample_size);
        self
    }

    pub fn with_thresholds(mut self, thresholds: ClassificationThresholds) -> Self {
        self.classifier = Classifier::new(thresholds);
        self
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    pub fn min_sample_size(&self) -> usize {
        self.estimator.min_sample_size()
    }

    /// The main entry point for analysing a price series.
    ///
    /// # Arguments
    ///
    /// * `ticker` - The symbol the prices belong to, carried into the report.
    /// * `interval` - The sampling frequency of the prices.
    /// * `prices` - The ordered closing prices.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Report` or the first `AnalyticsError` raised by
    /// the return transformation or the moment estimator.
    pub fn calculate(
        &self,
        ticker: &str,
        interval: Interval,
        prices: &PriceSeries,
    ) -> Result<Report, AnalyticsError> {
        let returns = log_returns(prices)?;
        let moments = self.estimator.estimate(&returns)?;
        let classification = self.classifier.classify(&moments);
        let histogram = Histogram::from_values(&returns.values(), self.histogram_bins);

        // The gate guarantees at least one return, so both bounds exist.
        let (first_date, last_date) = returns
            .first_date()
            .zip(returns.last_date())
            .ok_or(AnalyticsError::InsufficientData {
                required: 1,
                actual: 0,
            })?;

        tracing::debug!(
            ticker,
            %interval,
            skew = ?classification.skew_category,
            kurtosis = ?classification.kurtosis_category,
            "Assembled report."
        );

        Ok(Report {
            metadata: ReportMetadata {
                ticker: ticker.to_string(),
                interval,
                first_date,
                last_date,
            },
            moments,
            classification,
            returns,
            histogram,
        })
    }
}
