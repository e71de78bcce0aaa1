//! Relative Strength Index (RSI) indicator.

use crate::services::signals::series::{differences, sanitize};
use crate::services::signals::{check_period, Result};
use crate::types::{IndicatorResult, IndicatorSignal};

/// Value returned when the series is too short.
pub const NEUTRAL_RSI: f64 = 50.0;
pub const OVERBOUGHT_LEVEL: f64 = 70.0;
pub const OVERSOLD_LEVEL: f64 = 30.0;

/// Compute RSI over a close series.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - 70 and above: Overbought
/// - 30 and below: Oversold
///
/// Fewer than `period + 1` finite closes yields the neutral value 50.
pub fn compute_rsi(series: &[f64], period: usize) -> Result<IndicatorResult> {
    check_period("RSI", period)?;

    let closes = sanitize(series);
    let value = calculate_rsi(&closes, period).unwrap_or(NEUTRAL_RSI);
    let signal = rsi_signal(value);

    Ok(IndicatorResult {
        value,
        signal,
        description: describe(value, signal),
    })
}

/// Wilder-smoothed RSI, `None` if there is not enough data.
fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if closes.len() <= period {
        return None;
    }

    let deltas = differences(closes);
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    // Seed with simple averages over the first window
    let mut avg_gain = gains.iter().take(period).sum::<f64>() / period as f64;
    let mut avg_loss = losses.iter().take(period).sum::<f64>() / period as f64;

    for i in period..deltas.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// Map an RSI value onto a signal.
pub fn rsi_signal(value: f64) -> IndicatorSignal {
    if value >= OVERBOUGHT_LEVEL {
        IndicatorSignal::Overbought
    } else if value <= OVERSOLD_LEVEL {
        IndicatorSignal::Oversold
    } else {
        IndicatorSignal::Neutral
    }
}

fn describe(value: f64, signal: IndicatorSignal) -> String {
    match signal {
        IndicatorSignal::Overbought => {
            format!("RSI {:.1}: overbought, buying pressure may be exhausted", value)
        }
        IndicatorSignal::Oversold => {
            format!("RSI {:.1}: oversold, selling pressure may be exhausted", value)
        }
        _ => format!("RSI {:.1}: neutral momentum", value),
    }
}
