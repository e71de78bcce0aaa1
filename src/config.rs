use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Longest history window the API serves, in days.
pub const MAX_HISTORY_DAYS: u32 = 365;

/// Prices and treasury figures used when every provider fails.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackConstants {
    /// BTC price (USD) when no provider answers.
    pub btc_price: f64,
    /// MSTR price (USD) when no provider answers.
    pub mstr_price: f64,
    /// Bitcoin held by MSTR.
    pub mstr_btc_holdings: f64,
    /// MSTR shares outstanding.
    pub mstr_shares_outstanding: f64,
}

impl Default for FallbackConstants {
    fn default() -> Self {
        Self {
            btc_price: 95_000.0,
            mstr_price: 350.0,
            mstr_btc_holdings: 499_096.0,
            mstr_shares_outstanding: 246_537_000.0,
        }
    }
}

/// Weights and windows for the composite scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Multiplier on window momentum (percent).
    pub momentum_weight: f64,
    /// Multiplier on daily change (percent).
    pub daily_change_weight: f64,
    /// Share of the secondary asset's score blended into the primary.
    pub secondary_weight: f64,
    /// Closes in the momentum window.
    pub momentum_period: usize,
    /// Volumes in the volume-trend window.
    pub volume_window: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            momentum_weight: 2.0,
            daily_change_weight: 3.0,
            secondary_weight: 0.3,
            momentum_period: 7,
            volume_window: 7,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// CoinGecko API key (optional, for pro tier).
    pub coingecko_api_key: Option<String>,
    /// Per-provider timeout inside a fallback chain (ms).
    pub provider_timeout_ms: u64,
    /// TTL for cached provider responses (seconds, 0 disables).
    pub cache_ttl_secs: u64,
    /// Append-only analytics event log.
    pub analytics_log_path: PathBuf,
    /// Days of history used for indicators and scoring.
    pub history_days: u32,
    /// RSI lookback.
    pub rsi_period: usize,
    pub fallback: FallbackConstants,
    pub scoring: ScoringConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            coingecko_api_key: None,
            provider_timeout_ms: 8_000,
            cache_ttl_secs: 60,
            analytics_log_path: PathBuf::from("data/analytics.jsonl"),
            history_days: 60,
            rsi_period: 14,
            fallback: FallbackConstants::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            coingecko_api_key: env::var("COINGECKO_API_KEY").ok().filter(|k| !k.is_empty()),
            provider_timeout_ms: parse_var("PROVIDER_TIMEOUT_MS")
                .unwrap_or(defaults.provider_timeout_ms),
            cache_ttl_secs: parse_var("CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl_secs),
            analytics_log_path: env::var("ANALYTICS_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.analytics_log_path),
            history_days: parse_var("HISTORY_DAYS")
                .filter(|d| (1..=MAX_HISTORY_DAYS).contains(d))
                .unwrap_or(defaults.history_days),
            rsi_period: parse_var("RSI_PERIOD")
                .filter(|p| *p > 0)
                .unwrap_or(defaults.rsi_period),
            fallback: FallbackConstants {
                btc_price: parse_var("FALLBACK_BTC_PRICE").unwrap_or(defaults.fallback.btc_price),
                mstr_price: parse_var("FALLBACK_MSTR_PRICE")
                    .unwrap_or(defaults.fallback.mstr_price),
                mstr_btc_holdings: parse_var("MSTR_BTC_HOLDINGS")
                    .unwrap_or(defaults.fallback.mstr_btc_holdings),
                mstr_shares_outstanding: parse_var("MSTR_SHARES_OUTSTANDING")
                    .unwrap_or(defaults.fallback.mstr_shares_outstanding),
            },
            scoring: ScoringConfig {
                momentum_weight: parse_var("MOMENTUM_WEIGHT")
                    .unwrap_or(defaults.scoring.momentum_weight),
                daily_change_weight: parse_var("DAILY_CHANGE_WEIGHT")
                    .unwrap_or(defaults.scoring.daily_change_weight),
                secondary_weight: parse_var("SECONDARY_WEIGHT")
                    .unwrap_or(defaults.scoring.secondary_weight),
                momentum_period: parse_var("MOMENTUM_PERIOD")
                    .unwrap_or(defaults.scoring.momentum_period),
                volume_window: parse_var("VOLUME_WINDOW")
                    .unwrap_or(defaults.scoring.volume_window),
            },
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
