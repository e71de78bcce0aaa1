//! VaultSignal endpoint: BTC composite score with MSTR blended in.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::{validate_days, ApiResponse};
use crate::error::Result;
use crate::services::fallback::Resolved;
use crate::services::signals::{blend_scores, compute_composite_score, compute_snapshot, CompositeInputs};
use crate::types::{Asset, CompositeScore, IndicatorResult, MarketSeries, Quote, Recommendation};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSignalResponse {
    /// Blended score, clamped to [-100, 100].
    pub score: f64,
    pub label: Recommendation,
    pub btc: CompositeScore,
    pub mstr: CompositeScore,
    pub secondary_weight: f64,
    /// BTC RSI over the scoring history.
    pub rsi: IndicatorResult,
    /// BTC MACD over the scoring history.
    pub macd: IndicatorResult,
    pub timestamp: i64,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_vaultsignal))
}

async fn get_vaultsignal(State(state): State<AppState>) -> Result<Json<ApiResponse<VaultSignalResponse>>> {
    let days = validate_days(state.config.history_days)?;
    let gateway = &state.gateway;

    let (btc_quote, mstr_quote, btc_history, mstr_history) = tokio::join!(
        gateway.quote(Asset::Btc),
        gateway.quote(Asset::Mstr),
        gateway.history(Asset::Btc, days),
        gateway.history(Asset::Mstr, days)
    );

    let scoring = &state.config.scoring;
    let btc = compute_composite_score(score_inputs(&btc_quote, &btc_history.value), scoring);
    let mstr = compute_composite_score(score_inputs(&mstr_quote, &mstr_history.value), scoring);
    let blended = blend_scores(&btc, &mstr, scoring.secondary_weight);

    let snapshot = compute_snapshot(&btc_history.value.closes, state.config.rsi_period)?;

    let cached = btc_quote.cached && mstr_quote.cached && btc_history.cached && mstr_history.cached;
    let fallback =
        btc_quote.fallback || mstr_quote.fallback || btc_history.fallback || mstr_history.fallback;

    Ok(Json(ApiResponse::with_meta(
        VaultSignalResponse {
            score: blended.score,
            label: blended.label,
            btc,
            mstr,
            secondary_weight: scoring.secondary_weight,
            rsi: snapshot.rsi,
            macd: snapshot.macd,
            timestamp: chrono::Utc::now().timestamp_millis(),
        },
        cached,
        fallback,
    )))
}

/// Scoring inputs for one asset.
///
/// A fallback quote carries no live information, so it contributes no
/// daily change. Without a provider previous close the second-to-last
/// daily close stands in.
fn score_inputs<'a>(quote: &Resolved<Quote>, history: &'a MarketSeries) -> CompositeInputs<'a> {
    let closes = &history.closes;
    let (current_price, previous_price) = if quote.fallback {
        (None, None)
    } else {
        let previous = quote
            .value
            .previous_close
            .or_else(|| closes.len().checked_sub(2).map(|i| closes[i]));
        (Some(quote.value.price), previous)
    };

    CompositeInputs {
        current_price,
        previous_price,
        closes,
        volumes: &history.volumes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(price: f64, previous_close: Option<f64>) -> Quote {
        Quote {
            asset: Asset::Btc,
            price,
            previous_close,
            source: "test".to_string(),
            timestamp: 0,
        }
    }

    #[test]
    fn test_inputs_from_live_quote() {
        let history = MarketSeries {
            closes: vec![90.0, 95.0, 100.0],
            volumes: vec![1.0, 1.0, 1.0],
        };
        let resolved = Resolved::fresh(quote(105.0, Some(100.0)), "test");
        let inputs = score_inputs(&resolved, &history);

        assert_eq!(inputs.current_price, Some(105.0));
        assert_eq!(inputs.previous_price, Some(100.0));
        assert_eq!(inputs.closes.len(), 3);
    }

    #[test]
    fn test_inputs_previous_close_from_history() {
        let history = MarketSeries {
            closes: vec![90.0, 95.0, 100.0],
            volumes: vec![],
        };
        let resolved = Resolved::fresh(quote(105.0, None), "test");
        let inputs = score_inputs(&resolved, &history);

        assert_eq!(inputs.previous_price, Some(95.0));
    }

    #[test]
    fn test_inputs_ignore_fallback_quote() {
        let history = MarketSeries::default();
        let resolved = Resolved::default_value(quote(95000.0, None));
        let inputs = score_inputs(&resolved, &history);

        assert_eq!(inputs.current_price, None);
        assert_eq!(inputs.previous_price, None);
    }
}
