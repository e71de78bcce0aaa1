use serde::{Deserialize, Serialize};

/// Categorical reading of a single indicator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorSignal {
    Overbought,
    Oversold,
    Bullish,
    Bearish,
    Neutral,
}

impl IndicatorSignal {
    /// Get display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorSignal::Overbought => "OVERBOUGHT",
            IndicatorSignal::Oversold => "OVERSOLD",
            IndicatorSignal::Bullish => "BULLISH",
            IndicatorSignal::Bearish => "BEARISH",
            IndicatorSignal::Neutral => "NEUTRAL",
        }
    }
}

/// Output from a single indicator calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorResult {
    /// Raw indicator value.
    pub value: f64,
    /// Signal derived from the value.
    pub signal: IndicatorSignal,
    /// Human-readable explanation of the signal.
    pub description: String,
}

/// RSI and MACD computed over one price series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub rsi: IndicatorResult,
    pub macd: IndicatorResult,
    /// Latest usable close, if the series had any.
    pub last_close: Option<f64>,
    /// Number of finite points the indicators were computed over.
    pub points: usize,
}

/// Discrete recommendation derived from a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "STRONG SELL")]
    StrongSell,
}

impl Recommendation {
    /// Map a score (-100 to +100) onto a recommendation.
    /// Each band includes its lower bound.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 50.0 => Recommendation::StrongBuy,
            s if s >= 20.0 => Recommendation::Buy,
            s if s >= -20.0 => Recommendation::Neutral,
            s if s >= -50.0 => Recommendation::Sell,
            _ => Recommendation::StrongSell,
        }
    }

    /// Get display label for this recommendation.
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "STRONG BUY",
            Recommendation::Buy => "BUY",
            Recommendation::Neutral => "NEUTRAL",
            Recommendation::Sell => "SELL",
            Recommendation::StrongSell => "STRONG SELL",
        }
    }
}

/// Terms that went into a composite score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Percent change across the momentum window.
    pub momentum_pct: f64,
    /// Percent change from the previous price to the current price.
    pub daily_change_pct: f64,
    /// Latest volume divided by the window mean.
    pub volume_trend: f64,
    /// Points added for the volume trend.
    pub volume_bonus: f64,
}

/// Bounded composite ("VaultSignal") score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScore {
    /// Score clamped to [-100, 100].
    pub score: f64,
    pub label: Recommendation,
    pub breakdown: ScoreBreakdown,
}

impl CompositeScore {
    /// Neutral score used when no usable inputs are available.
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            label: Recommendation::Neutral,
            breakdown: ScoreBreakdown {
                volume_trend: 1.0,
                ..ScoreBreakdown::default()
            },
        }
    }
}
