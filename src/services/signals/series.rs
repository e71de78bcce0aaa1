//! Utilities over ordered numeric series (oldest first).

use super::{check_period, Result};

/// Drop non-finite entries, keeping order.
pub fn sanitize(series: &[f64]) -> Vec<f64> {
    series.iter().copied().filter(|v| v.is_finite()).collect()
}

/// First-order deltas. Empty or single-element input yields an empty result.
pub fn differences(series: &[f64]) -> Vec<f64> {
    series.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Exponential moving average with `k = 2 / (period + 1)`.
///
/// The output has the same length as the input and is seeded with the
/// first value rather than an SMA, so a period longer than the series
/// still produces a result.
pub fn ema(series: &[f64], period: usize) -> Result<Vec<f64>> {
    check_period("EMA", period)?;

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(series.len());
    let mut prev = match series.first() {
        Some(first) => *first,
        None => return Ok(out),
    };
    out.push(prev);

    for price in series.iter().skip(1) {
        prev = price * k + prev * (1.0 - k);
        out.push(prev);
    }

    Ok(out)
}

/// Arithmetic mean, `None` for an empty series.
pub fn mean(series: &[f64]) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    Some(series.iter().sum::<f64>() / series.len() as f64)
}

/// Percent change from `from` to `to`.
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if !from.is_finite() || !to.is_finite() || from == 0.0 {
        return None;
    }
    Some((to - from) / from * 100.0)
}

/// Trailing `n` elements (the whole series if shorter).
pub fn tail(series: &[f64], n: usize) -> &[f64] {
    &series[series.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::SignalError;

    #[test]
    fn test_differences() {
        assert_eq!(differences(&[1.0, 3.0, 2.0]), vec![2.0, -1.0]);
        assert!(differences(&[]).is_empty());
        assert!(differences(&[5.0]).is_empty());
    }

    #[test]
    fn test_ema_seed_and_length() {
        let series = [10.0, 11.0, 12.0, 13.0];
        let out = ema(&series, 3).unwrap();
        assert_eq!(out.len(), series.len());
        assert_eq!(out[0], 10.0);
        // k = 0.5
        assert!((out[1] - 10.5).abs() < 1e-12);
        assert!((out[2] - 11.25).abs() < 1e-12);
    }

    #[test]
    fn test_ema_period_one_tracks_input() {
        let series = [4.0, 8.0, 2.0];
        assert_eq!(ema(&series, 1).unwrap(), series.to_vec());
    }

    #[test]
    fn test_ema_period_longer_than_series() {
        let out = ema(&[1.0, 2.0], 26).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], 1.0);
    }

    #[test]
    fn test_ema_empty() {
        assert!(ema(&[], 12).unwrap().is_empty());
    }

    #[test]
    fn test_ema_zero_period_rejected() {
        assert!(matches!(
            ema(&[1.0], 0),
            Err(SignalError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sanitize_drops_non_finite() {
        let cleaned = sanitize(&[1.0, f64::NAN, 2.0, f64::INFINITY, f64::NEG_INFINITY, 3.0]);
        assert_eq!(cleaned, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_mean_and_percent_change() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
        assert_eq!(percent_change(100.0, 110.0), Some(10.0));
        assert_eq!(percent_change(0.0, 110.0), None);
        assert_eq!(percent_change(f64::NAN, 1.0), None);
    }

    #[test]
    fn test_tail() {
        let series = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(tail(&series, 2), &[3.0, 4.0]);
        assert_eq!(tail(&series, 10), &series);
        assert!(tail(&series, 0).is_empty());
    }
}
