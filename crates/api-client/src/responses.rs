use crate::error::ApiError;
use chrono::{Duration, TimeZone, Utc};
use core_types::{PricePoint, PriceSeries};
use serde::Deserialize;

// Mirrors the subset of the Yahoo Finance v8 chart payload that we read.

/// The top-level body of `GET /v8/finance/chart/{symbol}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

/// Represents an error response from the chart API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
    /// Unix seconds. Absent when the range holds no trading sessions.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartMeta {
    /// Seconds east of UTC for the exchange the symbol trades on.
    #[serde(default, rename = "gmtoffset")]
    pub gmt_offset: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
    #[serde(default)]
    pub adjclose: Vec<AdjCloseIndicator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjCloseIndicator {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

impl ChartResponse {
    /// Builds a price series from the split- and dividend-adjusted close,
    /// falling back to the raw close. Sessions without a price are skipped.
    ///
    /// Timestamps are shifted by the exchange's UTC offset, so their calendar
    /// date is the local trading day.
    pub fn into_price_series(self) -> Result<PriceSeries, ApiError> {
        if let Some(error) = self.chart.error {
            return Err(ApiError::Provider {
                code: error.code,
                description: error.description,
            });
        }

        let result = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or(ApiError::NoData)?;

        let offset = Duration::seconds(result.meta.as_ref().map_or(0, |m| m.gmt_offset));
        let closes = result.indicators.quote.first().map(|q| &q.close);
        let adjusted = result.indicators.adjclose.first().map(|a| &a.adjclose);

        let mut points = Vec::with_capacity(result.timestamp.len());
        for (i, &secs) in result.timestamp.iter().enumerate() {
            let adjusted_close = adjusted.and_then(|a| a.get(i).copied().flatten());
            let raw_close = closes.and_then(|c| c.get(i).copied().flatten());
            let Some(close) = adjusted_close.or(raw_close) else {
                continue;
            };
            let timestamp = Utc
                .timestamp_opt(secs, 0)
                .single()
                .and_then(|t| t.checked_add_signed(offset))
                .ok_or_else(|| ApiError::InvalidData(format!("Invalid timestamp: {}", secs)))?;
            points.push(PricePoint::new(timestamp, close));
        }

        if points.is_empty() {
            return Err(ApiError::NoData);
        }

        PriceSeries::new(points).map_err(|e| ApiError::InvalidData(e.to_string()))
    }
}

/// Parses a raw chart body into a price series.
pub fn parse_chart(body: &str) -> Result<PriceSeries, ApiError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    response.into_price_series()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn prefers_adjusted_close_and_skips_empty_sessions() {
        let body = r#"{
            "chart": {
                "result": [{
                    "meta": {"symbol": "AAPL", "currency": "USD"},
                    "timestamp": [1704153600, 1704240000, 1704326400, 1704412800],
                    "indicators": {
                        "quote": [{"open": [1,2,3,4], "close": [185.64, null, 181.91, 181.18]}],
                        "adjclose": [{"adjclose": [184.73, null, null, 180.29]}]
                    }
                }],
                "error": null
            }
        }"#;

        let series = parse_chart(body).unwrap();
        let closes: Vec<f64> = series.closes().collect();
        assert_eq!(closes, vec![184.73, 181.91, 180.29]);
        assert_eq!(series.points()[0].timestamp.timestamp(), 1704153600);
        assert_eq!(series.points()[1].timestamp.timestamp(), 1704326400);
    }

    #[test]
    fn session_dates_follow_the_exchange_offset() {
        // NZX opens at 10:00 NZDT, which is 21:00 UTC on the previous day.
        let body = r#"{"chart": {"result": [{
            "meta": {"symbol": "AIR.NZ", "gmtoffset": 46800, "exchangeTimezoneName": "Pacific/Auckland"},
            "timestamp": [1704142800, 1704229200],
            "indicators": {"quote": [{"close": [0.71, 0.72]}]}
        }], "error": null}}"#;

        let series = parse_chart(body).unwrap();
        let dates: Vec<NaiveDate> = series
            .points()
            .iter()
            .map(|p| p.timestamp.date_naive())
            .collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            ]
        );
    }

    #[test]
    fn falls_back_to_raw_close_without_adjclose() {
        let body = r#"{"chart": {"result": [{
            "timestamp": [1704153600, 1704240000],
            "indicators": {"quote": [{"close": [10.0, 11.0]}]}
        }], "error": null}}"#;

        let closes: Vec<f64> = parse_chart(body).unwrap().closes().collect();
        assert_eq!(closes, vec![10.0, 11.0]);
    }

    #[test]
    fn provider_error_is_surfaced() {
        let body = r#"{"chart": {"result": null, "error": {
            "code": "Not Found",
            "description": "No data found, symbol may be delisted"
        }}}"#;

        match parse_chart(body).unwrap_err() {
            ApiError::Provider { code, .. } => assert_eq!(code, "Not Found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_range_is_no_data() {
        let body = r#"{"chart": {"result": [{"indicators": {"quote": [{}]}}], "error": null}}"#;
        assert!(matches!(parse_chart(body).unwrap_err(), ApiError::NoData));
    }

    #[test]
    fn unordered_timestamps_are_invalid() {
        let body = r#"{"chart": {"result": [{
            "timestamp": [1704240000, 1704153600],
            "indicators": {"quote": [{"close": [10.0, 11.0]}]}
        }], "error": null}}"#;
        assert!(matches!(parse_chart(body).unwrap_err(), ApiError::InvalidData(_)));
    }

    #[test]
    fn malformed_body_is_a_deserialization_error() {
        assert!(matches!(
            parse_chart("<html>rate limited</html>").unwrap_err(),
            ApiError::Deserialization(_)
        ));
    }
}
