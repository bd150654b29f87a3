use crate::error::ApiError;
use async_trait::async_trait;
use core_types::{PriceRequest, PriceSeries};

pub mod error;
pub mod responses;
pub mod retry;
pub mod yahoo;

// --- Public API ---
pub use retry::RetryPolicy;
pub use yahoo::YahooClient;

/// The abstract interface for a market-data provider.
///
/// The analysis only ever sees the `PriceSeries` this returns, so the concrete
/// provider (live or mock) can be swapped out freely.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches closing prices for `request.ticker` at `request.interval`, from
    /// `request.start` up to but excluding `request.end`.
    async fn fetch_prices(&self, request: &PriceRequest) -> Result<PriceSeries, ApiError>;
}
