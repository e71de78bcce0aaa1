//! Technical indicator implementations.

pub mod macd;
pub mod rsi;

pub use macd::compute_macd;
pub use rsi::compute_rsi;

use super::series::sanitize;
use super::Result;
use crate::types::IndicatorSnapshot;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Compute RSI and MACD together over one close series.
pub fn compute_snapshot(series: &[f64], rsi_period: usize) -> Result<IndicatorSnapshot> {
    let closes = sanitize(series);

    Ok(IndicatorSnapshot {
        rsi: compute_rsi(&closes, rsi_period)?,
        macd: compute_macd(&closes)?,
        last_close: closes.last().copied(),
        points: closes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IndicatorSignal;

    #[test]
    fn test_snapshot_on_empty_series() {
        let snapshot = compute_snapshot(&[], DEFAULT_RSI_PERIOD).unwrap();
        assert_eq!(snapshot.rsi.value, 50.0);
        assert_eq!(snapshot.macd.value, 0.0);
        assert_eq!(snapshot.last_close, None);
        assert_eq!(snapshot.points, 0);
    }

    #[test]
    fn test_snapshot_counts_finite_points() {
        let series = [1.0, f64::NAN, 2.0, 3.0];
        let snapshot = compute_snapshot(&series, DEFAULT_RSI_PERIOD).unwrap();
        assert_eq!(snapshot.points, 3);
        assert_eq!(snapshot.last_close, Some(3.0));
        assert_eq!(snapshot.rsi.signal, IndicatorSignal::Neutral);
    }

    #[test]
    fn test_snapshot_rejects_zero_period() {
        assert!(compute_snapshot(&[1.0, 2.0], 0).is_err());
    }
}
