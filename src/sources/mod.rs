pub mod coingecko;
pub mod yahoo;

pub use coingecko::CoinGeckoClient;
pub use yahoo::YahooFinanceClient;

use crate::types::{Asset, MarketSeries, Quote};
use futures_util::future::BoxFuture;

/// A market data provider the gateway can fall back across.
pub trait MarketProvider: Send + Sync {
    /// Short identifier reported as the data source.
    fn name(&self) -> &'static str;

    /// Whether this provider carries the asset at all.
    fn supports(&self, asset: Asset) -> bool;

    /// Latest price.
    fn quote(&self, asset: Asset) -> BoxFuture<'_, anyhow::Result<Quote>>;

    /// Daily closes and volumes for the last `days` days, oldest first.
    fn history(&self, asset: Asset, days: u32) -> BoxFuture<'_, anyhow::Result<MarketSeries>>;
}
