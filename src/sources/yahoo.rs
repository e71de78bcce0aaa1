//! Yahoo Finance chart client.
//!
//! Serves both BTC-USD and MSTR from the unofficial v8 chart endpoint,
//! which needs no API key.

use super::MarketProvider;
use crate::types::{Asset, MarketSeries, Quote};
use anyhow::{anyhow, Context};
use futures_util::future::{BoxFuture, FutureExt};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SECONDS_PER_DAY: i64 = 86_400;

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    meta: YahooMeta,
    #[serde(default)]
    indicators: Option<YahooIndicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooMeta {
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance API client.
#[derive(Clone)]
pub struct YahooFinanceClient {
    client: Client,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch the chart for a symbol over the trailing `days` days at daily interval.
    async fn fetch_chart(&self, asset: Asset, days: u32) -> anyhow::Result<YahooResult> {
        let now = chrono::Utc::now().timestamp();
        let start = now - i64::from(days.max(1)) * SECONDS_PER_DAY;
        let url = format!(
            "{}/{}?period1={}&period2={}&interval=1d&includePrePost=false",
            YAHOO_CHART_URL,
            asset.yahoo_symbol(),
            start,
            now
        );

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Yahoo API error: {}", response.status()));
        }

        let data: YahooChartResponse = response.json().await?;
        first_result(data)
    }

    async fn fetch_quote(&self, asset: Asset) -> anyhow::Result<Quote> {
        let result = self.fetch_chart(asset, 5).await?;
        quote_from_meta(asset, &result.meta)
    }

    async fn fetch_history(&self, asset: Asset, days: u32) -> anyhow::Result<MarketSeries> {
        let result = self.fetch_chart(asset, days).await?;
        let series = series_from_result(result);
        if series.is_empty() {
            return Err(anyhow!("Yahoo returned no closes for {}", asset));
        }
        Ok(series)
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketProvider for YahooFinanceClient {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn supports(&self, _asset: Asset) -> bool {
        true
    }

    fn quote(&self, asset: Asset) -> BoxFuture<'_, anyhow::Result<Quote>> {
        self.fetch_quote(asset).boxed()
    }

    fn history(&self, asset: Asset, days: u32) -> BoxFuture<'_, anyhow::Result<MarketSeries>> {
        self.fetch_history(asset, days).boxed()
    }
}

fn first_result(data: YahooChartResponse) -> anyhow::Result<YahooResult> {
    if let Some(error) = data.chart.error {
        return Err(anyhow!(
            "Yahoo API error: {} - {}",
            error.code,
            error.description
        ));
    }

    data.chart
        .result
        .and_then(|results| results.into_iter().next())
        .context("No results in Yahoo response")
}

fn quote_from_meta(asset: Asset, meta: &YahooMeta) -> anyhow::Result<Quote> {
    let price = meta
        .regular_market_price
        .filter(|p| p.is_finite() && *p > 0.0)
        .context("Yahoo returned no market price")?;

    Ok(Quote {
        asset,
        price,
        previous_close: meta.previous_close.or(meta.chart_previous_close),
        source: "yahoo".to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

/// Closes with their volumes; rows without a positive close are skipped.
fn series_from_result(result: YahooResult) -> MarketSeries {
    let Some(quote) = result
        .indicators
        .and_then(|indicators| indicators.quote.into_iter().next())
    else {
        return MarketSeries::default();
    };

    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let mut series = MarketSeries::default();
    for (i, close) in closes.iter().enumerate() {
        let Some(close) = close.filter(|c| c.is_finite() && *c > 0.0) else {
            continue;
        };
        series.closes.push(close);
        series
            .volumes
            .push(volumes.get(i).copied().flatten().unwrap_or(0.0));
    }
    series
}
