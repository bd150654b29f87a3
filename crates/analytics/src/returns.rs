use crate::error::AnalyticsError;
use core_types::{PriceSeries, ReturnPoint, ReturnSeries};

/// Converts a closing-price series into continuously-compounded returns.
///
/// The first price has no predecessor, so the result is one element shorter than
/// the input. Every price is checked before any return is produced.
pub fn log_returns(prices: &PriceSeries) -> Result<ReturnSeries, AnalyticsError> {
    let points = prices.points();
    if points.len() < 2 {
        return Err(AnalyticsError::InsufficientData {
            required: 2,
            actual: points.len(),
        });
    }

    if let Some((index, point)) = points
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.close.is_finite() && p.close > 0.0))
    {
        return Err(AnalyticsError::InvalidPrice {
            index,
            price: point.close,
        });
    }

    let returns = points
        .windows(2)
        .map(|w| ReturnPoint {
            timestamp: w[1].timestamp,
            value: (w[1].close / w[0].close).ln(),
        })
        .collect::<Vec<_>>();

    tracing::debug!(prices = points.len(), returns = returns.len(), "Computed log returns.");

    Ok(ReturnSeries::from_points(returns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use core_types::PricePoint;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + Duration::days(i as i64), c))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn drops_first_point_and_keeps_later_timestamps() {
        let prices = series(&[100.0, 110.0, 99.0, 99.0]);
        let returns = log_returns(&prices).unwrap();

        assert_eq!(returns.len(), prices.len() - 1);
        for (i, r) in returns.points().iter().enumerate() {
            let prev = prices.points()[i].close;
            let curr = prices.points()[i + 1].close;
            assert_eq!(r.value, (curr / prev).ln());
            assert_eq!(r.timestamp, prices.points()[i + 1].timestamp);
        }
        assert_eq!(returns.points()[2].value, 0.0);
    }

    #[test]
    fn single_price_is_insufficient() {
        let err = log_returns(&series(&[100.0])).unwrap_err();
        assert_eq!(err, AnalyticsError::InsufficientData { required: 2, actual: 1 });
    }

    #[test]
    fn empty_series_is_insufficient() {
        let err = log_returns(&series(&[])).unwrap_err();
        assert_eq!(err, AnalyticsError::InsufficientData { required: 2, actual: 0 });
    }

    #[test]
    fn rejects_zero_price() {
        let err = log_returns(&series(&[100.0, 0.0, 101.0])).unwrap_err();
        assert_eq!(err, AnalyticsError::InvalidPrice { index: 1, price: 0.0 });
    }

    #[test]
    fn rejects_negative_price_in_first_position() {
        let err = log_returns(&series(&[-5.0, 10.0])).unwrap_err();
        assert_eq!(err, AnalyticsError::InvalidPrice { index: 0, price: -5.0 });
    }

    #[test]
    fn rejects_nan_price() {
        let err = log_returns(&series(&[1.0, 2.0, f64::NAN])).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidPrice { index: 2, .. }));
    }
}
