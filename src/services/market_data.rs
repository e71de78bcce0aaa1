use crate::config::{Config, FallbackConstants};
use crate::services::fallback::{FallbackChain, Resolved};
use crate::services::Cache;
use crate::sources::{CoinGeckoClient, MarketProvider, YahooFinanceClient};
use crate::types::{Asset, MarketSeries, Quote};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Front door for market data.
///
/// Each lookup walks the providers that support the asset in priority
/// order and ends at a terminal default: the configured fallback price
/// for quotes, an empty series for history.
pub struct MarketDataGateway {
    providers: Vec<Arc<dyn MarketProvider>>,
    fallback: FallbackConstants,
    timeout: Duration,
    quotes: Cache<Asset, Resolved<Quote>>,
    histories: Cache<(Asset, u32), Resolved<MarketSeries>>,
}

impl MarketDataGateway {
    /// Create a gateway over an explicit provider list (highest priority first).
    pub fn new(
        providers: Vec<Arc<dyn MarketProvider>>,
        fallback: FallbackConstants,
        timeout: Duration,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            providers,
            fallback,
            timeout,
            quotes: Cache::new(cache_ttl),
            histories: Cache::new(cache_ttl),
        }
    }

    /// CoinGecko first, then Yahoo Finance.
    pub fn from_config(config: &Config) -> Self {
        let providers: Vec<Arc<dyn MarketProvider>> = vec![
            Arc::new(CoinGeckoClient::new(config.coingecko_api_key.clone())),
            Arc::new(YahooFinanceClient::new()),
        ];
        info!(
            "Market data gateway: {} providers, {}ms timeout",
            providers.len(),
            config.provider_timeout_ms
        );

        Self::new(
            providers,
            config.fallback.clone(),
            Duration::from_millis(config.provider_timeout_ms),
            Duration::from_secs(config.cache_ttl_secs),
        )
    }

    pub fn fallback_constants(&self) -> &FallbackConstants {
        &self.fallback
    }

    fn fallback_price(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Btc => self.fallback.btc_price,
            Asset::Mstr => self.fallback.mstr_price,
        }
    }

    /// Latest quote for an asset.
    pub async fn quote(&self, asset: Asset) -> Resolved<Quote> {
        if let Some(mut hit) = self.quotes.get(&asset) {
            hit.cached = true;
            return hit;
        }

        let chain = self
            .providers
            .iter()
            .filter(|p| p.supports(asset))
            .fold(
                FallbackChain::new(format!("{} quote", asset), self.timeout),
                |chain, provider| chain.attempt(provider.name(), provider.quote(asset)),
            );

        let default = Quote {
            asset,
            price: self.fallback_price(asset),
            previous_close: None,
            source: crate::services::fallback::FALLBACK_SOURCE.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        let resolved = chain.resolve_or(default).await;
        if !resolved.fallback {
            self.quotes.set(asset, resolved.clone());
        }
        resolved
    }

    /// Daily history for an asset; empty when every provider fails.
    pub async fn history(&self, asset: Asset, days: u32) -> Resolved<MarketSeries> {
        if let Some(mut hit) = self.histories.get(&(asset, days)) {
            hit.cached = true;
            return hit;
        }

        let chain = self
            .providers
            .iter()
            .filter(|p| p.supports(asset))
            .fold(
                FallbackChain::new(format!("{} {}d history", asset, days), self.timeout),
                |chain, provider| chain.attempt(provider.name(), provider.history(asset, days)),
            );

        let resolved = chain.resolve_or(MarketSeries::default()).await;
        if !resolved.fallback {
            self.histories.set((asset, days), resolved.clone());
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::{BoxFuture, FutureExt};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        name: &'static str,
        price: Option<f64>,
        assets: Vec<Asset>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(name: &'static str, price: Option<f64>, assets: Vec<Asset>) -> Arc<Self> {
            Arc::new(Self {
                name,
                price,
                assets,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl MarketProvider for StubProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn supports(&self, asset: Asset) -> bool {
            self.assets.contains(&asset)
        }

        fn quote(&self, asset: Asset) -> BoxFuture<'_, anyhow::Result<Quote>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let price = self.price;
            let name = self.name;
            async move {
                let price = price.ok_or_else(|| anyhow::anyhow!("{} down", name))?;
                Ok(Quote {
                    asset,
                    price,
                    previous_close: None,
                    source: name.to_string(),
                    timestamp: 0,
                })
            }
            .boxed()
        }

        fn history(&self, _asset: Asset, days: u32) -> BoxFuture<'_, anyhow::Result<MarketSeries>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let price = self.price;
            async move {
                let price = price.ok_or_else(|| anyhow::anyhow!("down"))?;
                Ok(MarketSeries {
                    closes: vec![price; days as usize],
                    volumes: vec![1.0; days as usize],
                })
            }
            .boxed()
        }
    }

    fn gateway(providers: Vec<Arc<dyn MarketProvider>>, ttl: Duration) -> MarketDataGateway {
        MarketDataGateway::new(
            providers,
            FallbackConstants::default(),
            Duration::from_millis(200),
            ttl,
        )
    }

    #[tokio::test]
    async fn test_quote_falls_back_to_second_provider() {
        let down = StubProvider::new("down", None, vec![Asset::Btc]);
        let up = StubProvider::new("up", Some(70000.0), vec![Asset::Btc]);
        let gw = gateway(vec![down, up], Duration::ZERO);

        let quote = gw.quote(Asset::Btc).await;
        assert_eq!(quote.value.price, 70000.0);
        assert_eq!(quote.source, "up");
        assert!(!quote.fallback);
    }

    #[tokio::test]
    async fn test_quote_skips_unsupported_providers() {
        let btc_only = StubProvider::new("btc_only", Some(1.0), vec![Asset::Btc]);
        let both = StubProvider::new("both", Some(300.0), vec![Asset::Btc, Asset::Mstr]);
        let gw = gateway(vec![btc_only.clone(), both], Duration::ZERO);

        let quote = gw.quote(Asset::Mstr).await;
        assert_eq!(quote.source, "both");
        assert_eq!(btc_only.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_quote_terminal_default() {
        let down = StubProvider::new("down", None, vec![Asset::Btc, Asset::Mstr]);
        let gw = gateway(vec![down], Duration::ZERO);

        let quote = gw.quote(Asset::Mstr).await;
        assert!(quote.fallback);
        assert_eq!(quote.value.price, FallbackConstants::default().mstr_price);
        assert_eq!(quote.value.source, "fallback");
    }

    #[tokio::test]
    async fn test_history_terminal_default_is_empty() {
        let gw = gateway(vec![], Duration::ZERO);

        let history = gw.history(Asset::Btc, 30).await;
        assert!(history.fallback);
        assert!(history.value.is_empty());
    }

    #[tokio::test]
    async fn test_successful_lookups_are_cached() {
        let up = StubProvider::new("up", Some(5.0), vec![Asset::Btc]);
        let gw = gateway(vec![up.clone()], Duration::from_secs(60));

        let first = gw.history(Asset::Btc, 3).await;
        let second = gw.history(Asset::Btc, 3).await;

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(second.value.len(), 3);
        assert_eq!(up.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallback_results_are_not_cached() {
        let down = StubProvider::new("down", None, vec![Asset::Btc]);
        let gw = gateway(vec![down.clone()], Duration::from_secs(60));

        gw.quote(Asset::Btc).await;
        gw.quote(Asset::Btc).await;

        assert_eq!(down.calls.load(Ordering::SeqCst), 2);
    }
}
