use analytics::{AnalyticsEngine, AnalyticsError, Report};
use anyhow::Context;
use api_client::PriceSource;
use api_client::error::ApiError;
use core_types::PriceRequest;

/// How a single analysis request ended, short of an outright failure.
#[derive(Debug)]
pub enum AnalysisOutcome {
    Completed(Box<Report>),
    /// Too few observations; the user should widen the study period or change
    /// the interval.
    InsufficientData { required: usize, actual: usize },
}

/// Fetches prices once and runs them through the engine.
///
/// Insufficient data (including an empty provider response) is an outcome, not
/// an error, so callers can show an advisory instead of failing.
pub async fn run_analysis<S>(
    source: &S,
    request: &PriceRequest,
    engine: &AnalyticsEngine,
) -> anyhow::Result<AnalysisOutcome>
where
    S: PriceSource + ?Sized,
{
    let required = engine.min_sample_size() + 1;

    let prices = match source.fetch_prices(request).await {
        Ok(prices) => prices,
        Err(ApiError::NoData) => {
            tracing::info!(ticker = %request.ticker, "Provider returned no prices.");
            return Ok(AnalysisOutcome::InsufficientData {
                required,
                actual: 0,
            });
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Failed to fetch {} {} prices from {} to {}",
                    request.ticker, request.interval, request.start, request.end
                )
            });
        }
    };

    match engine.calculate(&request.ticker, request.interval, &prices) {
        Ok(report) => Ok(AnalysisOutcome::Completed(Box::new(report))),
        Err(AnalyticsError::InsufficientData { actual, .. }) => {
            // The transform needs two prices and the gate needs `required` returns;
            // either way the user-facing threshold is the gate.
            let actual = if prices.len() < 2 { 0 } else { actual };
            Ok(AnalysisOutcome::InsufficientData { required, actual })
        }
        Err(e) => Err(e).with_context(|| format!("Failed to analyse {}", request.ticker)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::SkewCategory;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use core_types::{Interval, PricePoint, PriceSeries};

    enum MockSource {
        Prices(PriceSeries),
        NoData,
        Provider,
    }

    #[async_trait]
    impl PriceSource for MockSource {
        async fn fetch_prices(&self, _request: &PriceRequest) -> Result<PriceSeries, ApiError> {
            match self {
                MockSource::Prices(series) => Ok(series.clone()),
                MockSource::NoData => Err(ApiError::NoData),
                MockSource::Provider => Err(ApiError::Provider {
                    code: "Not Found".to_string(),
                    description: "No data found, symbol may be delisted".to_string(),
                }),
            }
        }
    }

    fn request() -> PriceRequest {
        PriceRequest {
            ticker: "TEST".to_string(),
            interval: Interval::Daily,
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        }
    }

    fn alternating(len: usize) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let points = (0..len)
            .map(|i| {
                let close = if i % 2 == 0 { 100.0 } else { 105.0 };
                PricePoint::new(start + Duration::days(i as i64), close)
            })
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[tokio::test]
    async fn completes_with_a_report() {
        let source = MockSource::Prices(alternating(41));
        let outcome = run_analysis(&source, &request(), &AnalyticsEngine::new())
            .await
            .unwrap();

        match outcome {
            AnalysisOutcome::Completed(report) => {
                assert_eq!(report.metadata.ticker, "TEST");
                assert_eq!(report.moments.n, 40);
                assert_eq!(report.classification.skew_category, SkewCategory::Symmetric);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn short_series_is_an_advisory_outcome() {
        let source = MockSource::Prices(alternating(20));
        let outcome = run_analysis(&source, &request(), &AnalyticsEngine::new())
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            AnalysisOutcome::InsufficientData { required: 31, actual: 19 }
        ));
    }

    #[tokio::test]
    async fn single_price_reports_zero_returns() {
        let source = MockSource::Prices(alternating(1));
        let outcome = run_analysis(&source, &request(), &AnalyticsEngine::new())
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            AnalysisOutcome::InsufficientData { required: 31, actual: 0 }
        ));
    }

    #[tokio::test]
    async fn empty_provider_response_is_an_advisory_outcome() {
        let outcome = run_analysis(&MockSource::NoData, &request(), &AnalyticsEngine::new())
            .await
            .unwrap();
        assert!(matches!(outcome, AnalysisOutcome::InsufficientData { actual: 0, .. }));
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let err = run_analysis(&MockSource::Provider, &request(), &AnalyticsEngine::new())
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<ApiError>().is_some());
    }

    #[tokio::test]
    async fn degenerate_series_is_an_error() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let flat = PriceSeries::new(
            (0..40)
                .map(|i| PricePoint::new(start + Duration::days(i), 10.0))
                .collect(),
        )
        .unwrap();
        let err = run_analysis(&MockSource::Prices(flat), &request(), &AnalyticsEngine::new())
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalyticsError>(),
            Some(&AnalyticsError::DegenerateSeries)
        );
    }
}
