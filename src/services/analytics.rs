//! Append-only analytics event log.
//!
//! One JSON object per line. No durability guarantees: writes go straight
//! to the file and appends are only serialised within this process.

use crate::error::{AppError, Result};
use crate::types::{AnalyticsEvent, NewAnalyticsEvent};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const DEFAULT_RECENT_LIMIT: usize = 100;
pub const MAX_RECENT_LIMIT: usize = 500;
const MAX_EVENT_NAME_LEN: usize = 128;

pub struct AnalyticsLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AnalyticsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp and append an event.
    pub async fn append(&self, new: NewAnalyticsEvent) -> Result<AnalyticsEvent> {
        let name = new.event.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("event name is required".to_string()));
        }
        if name.len() > MAX_EVENT_NAME_LEN {
            return Err(AppError::BadRequest(format!(
                "event name longer than {} bytes",
                MAX_EVENT_NAME_LEN
            )));
        }

        let event = AnalyticsEvent::from_new(NewAnalyticsEvent {
            event: name.to_string(),
            ..new
        });
        let mut line = serde_json::to_string(&event)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!("Logged analytics event {} ({})", event.event, event.id);
        Ok(event)
    }

    /// Newest `limit` events, oldest first. A missing log reads as empty.
    pub async fn recent(&self, limit: usize) -> Result<Vec<AnalyticsEvent>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let limit = limit.min(MAX_RECENT_LIMIT);
        let mut events: Vec<AnalyticsEvent> = content
            .lines()
            .rev()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!("Skipping malformed analytics line: {}", e);
                    None
                }
            })
            .take(limit)
            .collect();
        events.reverse();

        Ok(events)
    }
}
