//! Sample moment estimators.
//!
//! The free functions validate their own minimum sample sizes so they can be used
//! outside the analysis pipeline. `MomentEstimator` adds the analysis-wide gate on
//! top of them and produces a `MomentSummary`.

use crate::error::AnalyticsError;
use core_types::ReturnSeries;
use serde::{Deserialize, Serialize};

/// The analysis-wide gate: a run needs strictly more returns than this.
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 30;

/// Standard deviations within this many ulps of `1 + |mean|` count as zero.
const DEGENERATE_SPREAD_ULPS: f64 = 64.0;

/// The first four sample moments of a return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentSummary {
    pub n: usize,
    pub mean: f64,
    /// Bessel-corrected sample variance.
    pub variance: f64,
    pub stddev: f64,
    /// Adjusted Fisher-Pearson skewness.
    pub skewness: f64,
    /// Unbiased excess kurtosis (0 for a normal distribution).
    pub excess_kurtosis: f64,
}

impl MomentSummary {
    /// Computes every moment in a single pass over the mean and variance.
    ///
    /// Requires at least four values, the minimum for excess kurtosis.
    pub fn from_values(values: &[f64]) -> Result<Self, AnalyticsError> {
        require(values, 4)?;
        let base = Standardized::of(values)?;
        let skewness = adjusted_skewness(base.n, base.power_sum(values, 3)?)?;
        let excess_kurtosis = adjusted_excess_kurtosis(base.n, base.power_sum(values, 4)?)?;

        Ok(Self {
            n: values.len(),
            mean: base.mean,
            variance: base.variance,
            stddev: base.stddev,
            skewness,
            excess_kurtosis,
        })
    }
}

/// Arithmetic mean. Requires at least one value.
pub fn mean(values: &[f64]) -> Result<f64, AnalyticsError> {
    require(values, 1)?;
    finite("mean", values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with Bessel's correction. Requires at least two values.
pub fn sample_variance(values: &[f64]) -> Result<f64, AnalyticsError> {
    require(values, 2)?;
    Ok(Standardized::of(values)?.variance)
}

/// Sample standard deviation. Requires at least two values.
pub fn sample_stddev(values: &[f64]) -> Result<f64, AnalyticsError> {
    require(values, 2)?;
    Ok(Standardized::of(values)?.stddev)
}

/// Adjusted Fisher-Pearson skewness:
/// `n / ((n-1)(n-2)) * Σ ((x - mean) / s)^3`. Requires at least three values.
pub fn skewness(values: &[f64]) -> Result<f64, AnalyticsError> {
    require(values, 3)?;
    let base = Standardized::of(values)?;
    adjusted_skewness(base.n, base.power_sum(values, 3)?)
}

/// Unbiased excess kurtosis:
/// `n(n+1) / ((n-1)(n-2)(n-3)) * Σ z^4 - 3(n-1)^2 / ((n-2)(n-3))`.
/// Requires at least four values.
pub fn excess_kurtosis(values: &[f64]) -> Result<f64, AnalyticsError> {
    require(values, 4)?;
    let base = Standardized::of(values)?;
    adjusted_excess_kurtosis(base.n, base.power_sum(values, 4)?)
}

fn adjusted_skewness(n: f64, sum_cubes: f64) -> Result<f64, AnalyticsError> {
    finite("skewness", sum_cubes * n / ((n - 1.0) * (n - 2.0)))
}

fn adjusted_excess_kurtosis(n: f64, sum_fourths: f64) -> Result<f64, AnalyticsError> {
    let scale = n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0));
    let correction = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    finite("excess kurtosis", sum_fourths * scale - correction)
}

/// Mean and spread shared by the higher-moment estimators.
struct Standardized {
    n: f64,
    mean: f64,
    variance: f64,
    stddev: f64,
}

impl Standardized {
    /// Callers have already checked `values.len() >= 2`.
    fn of(values: &[f64]) -> Result<Self, AnalyticsError> {
        let n = values.len() as f64;
        let mean = mean(values)?;
        let variance = finite(
            "variance",
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0),
        )?;
        Ok(Self {
            n,
            mean,
            variance,
            stddev: variance.sqrt(),
        })
    }

    /// `Σ ((x - mean) / s)^power`, refusing a series with no spread.
    fn power_sum(&self, values: &[f64], power: i32) -> Result<f64, AnalyticsError> {
        // Log ratios carry an absolute rounding error of about one ulp, so a spread
        // below this floor is a constant series.
        if self.stddev <= DEGENERATE_SPREAD_ULPS * f64::EPSILON * (1.0 + self.mean.abs()) {
            return Err(AnalyticsError::DegenerateSeries);
        }
        Ok(values
            .iter()
            .map(|v| ((v - self.mean) / self.stddev).powi(power))
            .sum())
    }
}

fn require(values: &[f64], required: usize) -> Result<(), AnalyticsError> {
    if values.len() < required {
        return Err(AnalyticsError::InsufficientData {
            required,
            actual: values.len(),
        });
    }
    Ok(())
}

fn finite(statistic: &'static str, value: f64) -> Result<f64, AnalyticsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticsError::NonFinite { statistic })
    }
}

/// Applies the minimum-sample gate and computes a `MomentSummary`.
#[derive(Debug, Clone, Copy)]
pub struct MomentEstimator {
    min_sample_size: usize,
}

impl Default for MomentEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SAMPLE_SIZE)
    }
}

impl MomentEstimator {
    /// A run needs strictly more than `min_sample_size` returns.
    pub fn new(min_sample_size: usize) -> Self {
        Self { min_sample_size }
    }

    pub fn min_sample_size(&self) -> usize {
        self.min_sample_size
    }

    pub fn estimate(&self, returns: &ReturnSeries) -> Result<MomentSummary, AnalyticsError> {
        self.estimate_values(&returns.values())
    }

    pub fn estimate_values(&self, values: &[f64]) -> Result<MomentSummary, AnalyticsError> {
        if values.len() <= self.min_sample_size {
            return Err(AnalyticsError::InsufficientData {
                required: self.min_sample_size + 1,
                actual: values.len(),
            });
        }

        let summary = MomentSummary::from_values(values)?;
        tracing::debug!(
            n = summary.n,
            mean = summary.mean,
            stddev = summary.stddev,
            skewness = summary.skewness,
            excess_kurtosis = summary.excess_kurtosis,
            "Estimated sample moments."
        );
        Ok(summary)
    }
}
