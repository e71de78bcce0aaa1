//! Analytics event endpoints.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use super::extract::{ApiJson, ApiQuery};
use super::ApiResponse;
use crate::error::Result;
use crate::services::analytics::DEFAULT_RECENT_LIMIT;
use crate::types::{AnalyticsEvent, NewAnalyticsEvent};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub limit: Option<usize>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/events", get(list_events).post(record_event))
}

/// Append an event to the log.
async fn record_event(
    State(state): State<AppState>,
    ApiJson(event): ApiJson<NewAnalyticsEvent>,
) -> Result<(StatusCode, Json<ApiResponse<AnalyticsEvent>>)> {
    let stored = state.analytics.append(event).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(stored))))
}

/// Most recent events, oldest first.
async fn list_events(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EventsQuery>,
) -> Result<Json<ApiResponse<Vec<AnalyticsEvent>>>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let events = state.analytics.recent(limit).await?;
    Ok(Json(ApiResponse::new(events)))
}
