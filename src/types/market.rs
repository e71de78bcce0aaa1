use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracked asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Btc,
    Mstr,
}

impl Asset {
    /// Parse from a path segment or symbol.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "btc" | "bitcoin" | "btc-usd" => Some(Asset::Btc),
            "mstr" | "microstrategy" | "strategy" => Some(Asset::Mstr),
            _ => None,
        }
    }

    /// CoinGecko coin id, for assets CoinGecko lists.
    pub fn coingecko_id(&self) -> Option<&'static str> {
        match self {
            Asset::Btc => Some("bitcoin"),
            Asset::Mstr => None,
        }
    }

    /// Yahoo Finance ticker.
    pub fn yahoo_symbol(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC-USD",
            Asset::Mstr => "MSTR",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Btc => write!(f, "btc"),
            Asset::Mstr => write!(f, "mstr"),
        }
    }
}

/// Latest price for an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub asset: Asset,
    pub price: f64,
    /// Close of the previous session, used for daily change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,
    /// Provider that answered, or "fallback".
    pub source: String,
    /// Unix timestamp (milliseconds).
    pub timestamp: i64,
}

/// Daily closes with a parallel volume series, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSeries {
    pub closes: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl MarketSeries {
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

/// Series for an asset plus which provider supplied it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub asset: Asset,
    pub days: u32,
    pub source: String,
    pub series: MarketSeries,
}

/// MSTR net asset value against its bitcoin holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSnapshot {
    pub btc_price: f64,
    pub mstr_price: f64,
    pub btc_holdings: f64,
    pub shares_outstanding: f64,
    pub btc_per_share: f64,
    pub nav_per_share: f64,
    /// Positive for a premium to NAV, negative for a discount.
    pub premium_pct: f64,
}
