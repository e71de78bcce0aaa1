use super::MarketProvider;
use crate::types::{Asset, MarketSeries, Quote};
use anyhow::{anyhow, Context};
use futures_util::future::{BoxFuture, FutureExt};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
const COINGECKO_PRO_API_URL: &str = "https://pro-api.coingecko.com/api/v3";

#[derive(Debug, Deserialize)]
struct CoinGeckoPrice {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
}

/// `/coins/{id}/market_chart` response: `[timestamp_ms, value]` pairs.
#[derive(Debug, Deserialize)]
struct MarketChart {
    #[serde(default)]
    prices: Vec<(f64, Option<f64>)>,
    #[serde(default)]
    total_volumes: Vec<(f64, Option<f64>)>,
}

/// CoinGecko REST client.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// Create a new CoinGecko client.
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .user_agent("VaultSignal/0.1 (Market Intelligence)")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    fn base_url(&self) -> &str {
        if self.api_key.is_some() {
            COINGECKO_PRO_API_URL
        } else {
            COINGECKO_API_URL
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(ref key) = self.api_key {
            request = request.header("x-cg-pro-api-key", key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            warn!("CoinGecko API returned {}: {}", status, snippet);
            return Err(anyhow!("CoinGecko API error: {}", status));
        }

        Ok(response.json().await?)
    }

    async fn fetch_quote(&self, asset: Asset) -> anyhow::Result<Quote> {
        let id = asset
            .coingecko_id()
            .ok_or_else(|| anyhow!("CoinGecko does not list {}", asset))?;
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.base_url(),
            id
        );

        let response: HashMap<String, CoinGeckoPrice> = self.get(&url).await?;
        let quote = quote_from_price(asset, response.get(id))?;
        debug!("CoinGecko quote: {} = ${}", asset, quote.price);
        Ok(quote)
    }

    async fn fetch_history(&self, asset: Asset, days: u32) -> anyhow::Result<MarketSeries> {
        let id = asset
            .coingecko_id()
            .ok_or_else(|| anyhow!("CoinGecko does not list {}", asset))?;
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency=usd&days={}&interval=daily",
            self.base_url(),
            id,
            days
        );

        let chart: MarketChart = self.get(&url).await?;
        let series = series_from_chart(chart);
        if series.is_empty() {
            return Err(anyhow!("CoinGecko returned no prices for {}", asset));
        }
        debug!("CoinGecko history: {} points for {}", series.len(), asset);
        Ok(series)
    }
}

impl MarketProvider for CoinGeckoClient {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    fn supports(&self, asset: Asset) -> bool {
        asset.coingecko_id().is_some()
    }

    fn quote(&self, asset: Asset) -> BoxFuture<'_, anyhow::Result<Quote>> {
        self.fetch_quote(asset).boxed()
    }

    fn history(&self, asset: Asset, days: u32) -> BoxFuture<'_, anyhow::Result<MarketSeries>> {
        self.fetch_history(asset, days).boxed()
    }
}

/// Build a quote, deriving the previous close from the 24h change.
fn quote_from_price(asset: Asset, price: Option<&CoinGeckoPrice>) -> anyhow::Result<Quote> {
    let data = price.context("asset missing from CoinGecko response")?;
    let price = data
        .usd
        .filter(|p| p.is_finite() && *p > 0.0)
        .context("CoinGecko returned no USD price")?;

    let previous_close = data
        .usd_24h_change
        .filter(|c| c.is_finite() && *c > -100.0)
        .map(|change| price / (1.0 + change / 100.0));

    Ok(Quote {
        asset,
        price,
        previous_close,
        source: "coingecko".to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

/// Pair prices with volumes by position; null prices are dropped along with their volume.
fn series_from_chart(chart: MarketChart) -> MarketSeries {
    let mut series = MarketSeries::default();
    for (i, (_, price)) in chart.prices.iter().enumerate() {
        let Some(price) = price.filter(|p| p.is_finite()) else {
            continue;
        };
        let volume = chart
            .total_volumes
            .get(i)
            .and_then(|(_, v)| *v)
            .unwrap_or(0.0);
        series.closes.push(price);
        series.volumes.push(volume);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_switches_with_key() {
        assert_eq!(CoinGeckoClient::new(None).base_url(), COINGECKO_API_URL);
        assert_eq!(
            CoinGeckoClient::new(Some("key".to_string())).base_url(),
            COINGECKO_PRO_API_URL
        );
    }

    #[test]
    fn test_supports_only_btc() {
        let client = CoinGeckoClient::new(None);
        assert!(client.supports(Asset::Btc));
        assert!(!client.supports(Asset::Mstr));
    }

    #[test]
    fn test_quote_from_price_derives_previous_close() {
        let json = r#"{"bitcoin": {"usd": 110.0, "usd_24h_change": 10.0}}"#;
        let response: HashMap<String, CoinGeckoPrice> = serde_json::from_str(json).unwrap();
        let quote = quote_from_price(Asset::Btc, response.get("bitcoin")).unwrap();

        assert_eq!(quote.price, 110.0);
        assert!((quote.previous_close.unwrap() - 100.0).abs() < 1e-9);
        assert_eq!(quote.source, "coingecko");
    }

    #[test]
    fn test_quote_from_price_missing_usd() {
        let json = r#"{"bitcoin": {}}"#;
        let response: HashMap<String, CoinGeckoPrice> = serde_json::from_str(json).unwrap();
        assert!(quote_from_price(Asset::Btc, response.get("bitcoin")).is_err());
        assert!(quote_from_price(Asset::Btc, None).is_err());
    }

    #[test]
    fn test_series_from_chart() {
        let json = r#"{
            "prices": [[1700000000000, 100.0], [1700086400000, null], [1700172800000, 102.0]],
            "total_volumes": [[1700000000000, 5.0], [1700086400000, 6.0], [1700172800000, 7.0]]
        }"#;
        let chart: MarketChart = serde_json::from_str(json).unwrap();
        let series = series_from_chart(chart);

        assert_eq!(series.closes, vec![100.0, 102.0]);
        assert_eq!(series.volumes, vec![5.0, 7.0]);
    }

    #[test]
    fn test_series_from_chart_missing_volumes() {
        let json = r#"{"prices": [[1700000000000, 100.0]]}"#;
        let chart: MarketChart = serde_json::from_str(json).unwrap();
        let series = series_from_chart(chart);

        assert_eq!(series.closes, vec![100.0]);
        assert_eq!(series.volumes, vec![0.0]);
    }
}
