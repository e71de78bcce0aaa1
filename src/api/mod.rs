pub mod analytics;
pub mod extract;
pub mod health;
pub mod indicators;
pub mod market;
pub mod vaultsignal;

use crate::error::AppError;
use crate::types::Asset;
use crate::AppState;
use axum::Router;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use crate::config::MAX_HISTORY_DAYS;

/// Longest RSI lookback accepted from a request.
pub const MAX_RSI_PERIOD: usize = 200;

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Default, Serialize)]
pub struct ApiMeta {
    /// Served from the provider cache.
    pub cached: bool,
    /// At least one value came from the terminal fallback.
    pub fallback: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta::default(),
        }
    }

    pub fn with_meta(data: T, cached: bool, fallback: bool) -> Self {
        Self {
            data,
            meta: ApiMeta { cached, fallback },
        }
    }
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/market", market::router())
        .nest("/api/indicators", indicators::router())
        .nest("/api/vaultsignal", vaultsignal::router())
        .nest("/api/analytics", analytics::router())
}

/// Full application with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) fn parse_asset(raw: &str) -> Result<Asset, AppError> {
    Asset::from_str(raw).ok_or_else(|| AppError::NotFound(format!("Unknown asset: {}", raw)))
}

pub(crate) fn validate_days(days: u32) -> Result<u32, AppError> {
    if days == 0 || days > MAX_HISTORY_DAYS {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {}",
            MAX_HISTORY_DAYS
        )));
    }
    Ok(days)
}

/// Upper bound only; a zero period is reported by the indicator engine.
pub(crate) fn validate_period(period: usize) -> Result<usize, AppError> {
    if period > MAX_RSI_PERIOD {
        return Err(AppError::BadRequest(format!(
            "period must be at most {}",
            MAX_RSI_PERIOD
        )));
    }
    Ok(period)
}
