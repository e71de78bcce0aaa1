//! Indicator API endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::extract::ApiQuery;
use super::{parse_asset, validate_days, validate_period, ApiResponse};
use crate::error::Result;
use crate::services::signals::compute_snapshot;
use crate::types::{Asset, IndicatorSnapshot};
use crate::AppState;

/// Query parameters for the indicators endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct IndicatorsQuery {
    /// Days of daily history to compute over.
    pub days: Option<u32>,
    /// RSI lookback.
    pub period: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorsResponse {
    pub asset: Asset,
    pub days: u32,
    pub rsi_period: usize,
    /// Provider that supplied the history.
    pub source: String,
    #[serde(flatten)]
    pub snapshot: IndicatorSnapshot,
    pub timestamp: i64,
}

/// Create the indicators router.
pub fn router() -> Router<AppState> {
    Router::new().route("/:asset", get(get_indicators))
}

/// RSI and MACD for an asset.
async fn get_indicators(
    State(state): State<AppState>,
    Path(asset): Path<String>,
    ApiQuery(query): ApiQuery<IndicatorsQuery>,
) -> Result<Json<ApiResponse<IndicatorsResponse>>> {
    let asset = parse_asset(&asset)?;
    let days = validate_days(query.days.unwrap_or(state.config.history_days))?;
    let rsi_period = validate_period(query.period.unwrap_or(state.config.rsi_period))?;

    let history = state.gateway.history(asset, days).await;
    let snapshot = compute_snapshot(&history.value.closes, rsi_period)?;

    Ok(Json(ApiResponse::with_meta(
        IndicatorsResponse {
            asset,
            days,
            rsi_period,
            source: history.source,
            snapshot,
            timestamp: chrono::Utc::now().timestamp_millis(),
        },
        history.cached,
        history.fallback,
    )))
}
