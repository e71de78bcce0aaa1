use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event submitted by a dashboard page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnalyticsEvent {
    /// Event name (e.g., "page_view", "calculator_run").
    pub event: String,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub properties: serde_json::Value,
}

/// Stored analytics event, one per log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default)]
    pub properties: serde_json::Value,
    /// Unix timestamp (milliseconds).
    pub timestamp: i64,
}

impl AnalyticsEvent {
    pub fn from_new(new: NewAnalyticsEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            event: new.event,
            page: new.page,
            properties: new.properties,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}
