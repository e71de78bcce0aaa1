//! VaultSignal - Bitcoin/MSTR market intelligence server
//!
//! Proxies CoinGecko and Yahoo Finance behind ordered fallback chains and
//! serves RSI, MACD, NAV premium and the VaultSignal composite score.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::{AnalyticsLog, MarketDataGateway};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gateway: Arc<MarketDataGateway>,
    pub analytics: Arc<AnalyticsLog>,
}

impl AppState {
    /// Wire state with the default provider stack.
    pub fn from_config(config: Config) -> Self {
        let gateway = MarketDataGateway::from_config(&config);
        Self::new(config, gateway)
    }

    /// Wire state around an explicit gateway (used to inject test providers).
    pub fn new(config: Config, gateway: MarketDataGateway) -> Self {
        let analytics = AnalyticsLog::new(config.analytics_log_path.clone());
        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
            analytics: Arc::new(analytics),
        }
    }
}

// Re-export commonly used types
pub use types::*;
