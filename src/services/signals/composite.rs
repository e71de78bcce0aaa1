//! VaultSignal composite scorer.
//!
//! Linear blend of window momentum, daily change and a volume-trend bonus,
//! clamped to [-100, 100] and mapped onto a [`Recommendation`].

use super::series::{mean, percent_change, sanitize, tail};
use crate::config::ScoringConfig;
use crate::types::{CompositeScore, Recommendation, ScoreBreakdown};

pub const SCORE_MIN: f64 = -100.0;
pub const SCORE_MAX: f64 = 100.0;

/// Inputs for one asset's composite score.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeInputs<'a> {
    pub current_price: Option<f64>,
    pub previous_price: Option<f64>,
    /// Daily closes, oldest first.
    pub closes: &'a [f64],
    /// Daily volumes, oldest first.
    pub volumes: &'a [f64],
}

/// Points for a volume trend ratio.
pub fn volume_bonus(ratio: f64) -> f64 {
    if ratio > 1.2 {
        15.0
    } else if ratio < 0.8 {
        -10.0
    } else {
        0.0
    }
}

/// Score one asset. Missing or malformed inputs contribute nothing.
pub fn compute_composite_score(inputs: CompositeInputs<'_>, config: &ScoringConfig) -> CompositeScore {
    let closes = sanitize(inputs.closes);
    let volumes = sanitize(inputs.volumes);

    let momentum_pct = momentum(&closes, config.momentum_period);
    let daily_change_pct = match (inputs.previous_price, inputs.current_price) {
        (Some(prev), Some(cur)) => percent_change(prev, cur).unwrap_or(0.0),
        _ => 0.0,
    };
    let volume_trend = volume_trend(&volumes, config.volume_window);
    let bonus = volume_bonus(volume_trend);

    let score = bound(
        momentum_pct * config.momentum_weight + daily_change_pct * config.daily_change_weight + bonus,
    );

    CompositeScore {
        score,
        label: Recommendation::from_score(score),
        breakdown: ScoreBreakdown {
            momentum_pct,
            daily_change_pct,
            volume_trend,
            volume_bonus: bonus,
        },
    }
}

/// Add a correlated asset's score at `weight` to the primary score.
pub fn blend_scores(primary: &CompositeScore, secondary: &CompositeScore, weight: f64) -> CompositeScore {
    let score = bound(primary.score + secondary.score * weight);

    CompositeScore {
        score,
        label: Recommendation::from_score(score),
        breakdown: primary.breakdown.clone(),
    }
}

/// Percent change across the trailing `period` closes.
fn momentum(closes: &[f64], period: usize) -> f64 {
    let window = tail(closes, period);
    match (window.first(), window.last()) {
        (Some(first), Some(last)) if window.len() >= 2 => percent_change(*first, *last).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Latest volume over the trailing window mean; 1.0 when undefined.
fn volume_trend(volumes: &[f64], window: usize) -> f64 {
    let window = tail(volumes, window);
    match (window.last(), mean(window)) {
        (Some(latest), Some(avg)) if avg > 0.0 => latest / avg,
        _ => 1.0,
    }
}

fn bound(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(SCORE_MIN, SCORE_MAX)
}
