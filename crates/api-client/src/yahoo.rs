use crate::PriceSource;
use crate::error::ApiError;
use crate::responses::{ChartResponse, parse_chart};
use crate::retry::RetryPolicy;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use configuration::DataSourceSettings;
use core_types::{PriceRequest, PriceSeries};
use reqwest::Url;
use std::time::Duration;

/// A `PriceSource` backed by the Yahoo Finance v8 chart API.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl YahooClient {
    pub fn new(settings: &DataSourceSettings) -> Result<Self, ApiError> {
        let base_url = Url::parse(settings.base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidData(format!("Invalid base url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidData(format!(
                "Invalid base url: {}",
                settings.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            retry: RetryPolicy {
                max_retries: settings.max_retries,
                base_delay: Duration::from_millis(settings.retry_base_delay_ms),
                ..RetryPolicy::default()
            },
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The chart endpoint for one ticker; the ticker is percent-encoded as a
    /// single path segment.
    pub fn chart_url(&self, ticker: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(ticker);
        }
        url
    }

    /// Query parameters for a request. The end date is exclusive.
    pub fn query_params(request: &PriceRequest) -> Vec<(&'static str, String)> {
        vec![
            ("period1", unix_midnight(request.start).to_string()),
            ("period2", unix_midnight(request.end).to_string()),
            ("interval", request.interval.as_str().to_string()),
            ("events", "div,splits".to_string()),
            ("includeAdjustedClose", "true".to_string()),
        ]
    }

    async fn fetch_once(&self, request: &PriceRequest) -> Result<PriceSeries, ApiError> {
        let response = self
            .client
            .get(self.chart_url(&request.ticker))
            .query(&Self::query_params(request))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return parse_chart(&body);
        }
        if status.as_u16() == 429 || status.is_server_error() {
            return Err(ApiError::Status(status.as_u16()));
        }

        // Unknown tickers come back as 404 with a chart error payload.
        match serde_json::from_str::<ChartResponse>(&body) {
            Ok(payload) if payload.chart.error.is_some() => payload.into_price_series(),
            _ => Err(ApiError::Status(status.as_u16())),
        }
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn fetch_prices(&self, request: &PriceRequest) -> Result<PriceSeries, ApiError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(request).await {
                Ok(series) => {
                    tracing::info!(
                        ticker = %request.ticker,
                        interval = %request.interval,
                        points = series.len(),
                        "Fetched price series."
                    );
                    return Ok(series);
                }
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay(attempt);
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        ?delay,
                        "Price request failed, retrying."
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
