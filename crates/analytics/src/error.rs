use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {required} points required, {actual} available")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid price {price} at position {index}: prices must be positive and finite")]
    InvalidPrice { index: usize, price: f64 },

    #[error("The return series has zero variance; skewness and kurtosis are undefined")]
    DegenerateSeries,

    #[error("Calculation of '{statistic}' produced a non-finite value")]
    NonFinite { statistic: &'static str },
}
