//! # Normality Analytics Engine
//!
//! This crate answers one question about a price series: do its log returns look
//! like a bell curve?
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of external systems. Prices come in
//!   as a `PriceSeries` from `core-types`; results leave as a `Report` handed to a
//!   `ReportSink`.
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless calculator. Each
//!   call runs the whole pipeline (returns, moments, classification, histogram)
//!   and builds a fresh, immutable `Report`.
//! - **Typed Failures:** Short, invalid or constant series are reported as
//!   `AnalyticsError` variants. No NaN or infinity ever reaches a report.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: Runs the pipeline.
//! - `Report`: The result of one run, with the formatting helpers the sinks use.
//! - `ReportSink`: The presentation seam.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod classifier;
pub mod engine;
pub mod error;
pub mod histogram;
pub mod moments;
pub mod report;
pub mod returns;
pub mod sink;

// Re-export the key components to create a clean, public-facing API.
pub use classifier::{
    Classification, ClassificationThresholds, Classifier, KurtosisCategory, SkewCategory,
};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use histogram::{Histogram, HistogramBin};
pub use moments::{MomentEstimator, MomentSummary};
pub use report::{Report, ReportMetadata, SummaryRow};
pub use returns::log_returns;
pub use sink::ReportSink;
