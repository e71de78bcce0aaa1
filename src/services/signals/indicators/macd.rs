//! MACD (Moving Average Convergence Divergence) indicator.

use crate::services::signals::series::{ema, sanitize};
use crate::services::signals::Result;
use crate::types::{IndicatorResult, IndicatorSignal};

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;

/// Line threshold in raw price units (dollars for BTC/MSTR).
pub const SIGNAL_THRESHOLD: f64 = 50.0;

/// Compute the MACD line over a close series.
///
/// MACD Line = last EMA(12) - last EMA(26), both taken over the full
/// series. The signal compares the line against fixed dollar thresholds
/// rather than a signal-line crossover.
pub fn compute_macd(series: &[f64]) -> Result<IndicatorResult> {
    let closes = sanitize(series);

    let fast = ema(&closes, FAST_PERIOD)?;
    let slow = ema(&closes, SLOW_PERIOD)?;

    let value = match (fast.last(), slow.last()) {
        (Some(f), Some(s)) => f - s,
        _ => 0.0,
    };
    let signal = macd_signal(value);

    Ok(IndicatorResult {
        value,
        signal,
        description: describe(signal).to_string(),
    })
}

/// Map a MACD line value onto a signal.
pub fn macd_signal(value: f64) -> IndicatorSignal {
    if value > SIGNAL_THRESHOLD {
        IndicatorSignal::Bullish
    } else if value < -SIGNAL_THRESHOLD {
        IndicatorSignal::Bearish
    } else {
        IndicatorSignal::Neutral
    }
}

fn describe(signal: IndicatorSignal) -> &'static str {
    match signal {
        IndicatorSignal::Bullish => "Bullish momentum: fast EMA is pulling away above the slow EMA",
        IndicatorSignal::Bearish => "Bearish momentum: fast EMA is pulling away below the slow EMA",
        _ => "No clear trend: fast and slow EMAs are converged",
    }
}
