//! Market data API endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::extract::ApiQuery;
use super::{parse_asset, validate_days, ApiResponse};
use crate::error::Result;
use crate::services::compute_nav;
use crate::types::{Asset, HistoryResponse, NavSnapshot, Quote};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricesResponse {
    pub btc: Quote,
    pub mstr: Quote,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<u32>,
}

/// Create the market router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prices", get(get_prices))
        .route("/nav", get(get_nav))
        .route("/history/:asset", get(get_history))
}

/// Latest BTC and MSTR quotes.
async fn get_prices(State(state): State<AppState>) -> Json<ApiResponse<PricesResponse>> {
    let (btc, mstr) = tokio::join!(
        state.gateway.quote(Asset::Btc),
        state.gateway.quote(Asset::Mstr)
    );

    Json(ApiResponse::with_meta(
        PricesResponse {
            btc: btc.value,
            mstr: mstr.value,
        },
        btc.cached && mstr.cached,
        btc.fallback || mstr.fallback,
    ))
}

/// MSTR NAV premium against its bitcoin holdings.
async fn get_nav(State(state): State<AppState>) -> Json<ApiResponse<NavSnapshot>> {
    let (btc, mstr) = tokio::join!(
        state.gateway.quote(Asset::Btc),
        state.gateway.quote(Asset::Mstr)
    );

    let nav = compute_nav(
        btc.value.price,
        mstr.value.price,
        state.gateway.fallback_constants(),
    );

    Json(ApiResponse::with_meta(
        nav,
        btc.cached && mstr.cached,
        btc.fallback || mstr.fallback,
    ))
}

/// Daily closes and volumes for an asset.
async fn get_history(
    State(state): State<AppState>,
    Path(asset): Path<String>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryResponse>>> {
    let asset = parse_asset(&asset)?;
    let days = validate_days(query.days.unwrap_or(state.config.history_days))?;

    let history = state.gateway.history(asset, days).await;

    Ok(Json(ApiResponse::with_meta(
        HistoryResponse {
            asset,
            days,
            source: history.source,
            series: history.value,
        },
        history.cached,
        history.fallback,
    )))
}
