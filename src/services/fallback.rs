//! Ordered provider fallback.
//!
//! Attempts run one at a time in priority order, each bounded by the same
//! timeout. The first success wins; when every attempt fails the chain
//! hands back a terminal default.

use futures_util::future::BoxFuture;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Source name reported when the terminal default was used.
pub const FALLBACK_SOURCE: &str = "fallback";

/// Value produced by a chain, with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolved<T> {
    pub value: T,
    /// Name of the attempt that answered, or [`FALLBACK_SOURCE`].
    pub source: String,
    /// True if the terminal default was used.
    pub fallback: bool,
    /// True if served from the gateway cache.
    pub cached: bool,
}

impl<T> Resolved<T> {
    pub fn fresh(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            source: source.into(),
            fallback: false,
            cached: false,
        }
    }

    pub fn default_value(value: T) -> Self {
        Self {
            value,
            source: FALLBACK_SOURCE.to_string(),
            fallback: true,
            cached: false,
        }
    }
}

/// Prioritised list of attempts for one lookup.
pub struct FallbackChain<'a, T> {
    label: String,
    timeout: Duration,
    attempts: Vec<(String, BoxFuture<'a, anyhow::Result<T>>)>,
}

impl<'a, T: Send + 'a> FallbackChain<'a, T> {
    pub fn new(label: impl Into<String>, timeout: Duration) -> Self {
        Self {
            label: label.into(),
            timeout,
            attempts: Vec::new(),
        }
    }

    /// Queue an attempt. Futures are not polled until the chain resolves.
    pub fn attempt<F>(mut self, name: impl Into<String>, fut: F) -> Self
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'a,
    {
        self.attempts.push((name.into(), Box::pin(fut)));
        self
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Run attempts in order; `None` if all of them fail.
    pub async fn resolve(self) -> Option<Resolved<T>> {
        for (name, fut) in self.attempts {
            match tokio::time::timeout(self.timeout, fut).await {
                Ok(Ok(value)) => {
                    debug!("{} resolved by {}", self.label, name);
                    return Some(Resolved::fresh(value, name));
                }
                Ok(Err(e)) => warn!("{} via {} failed: {}", self.label, name, e),
                Err(_) => warn!(
                    "{} via {} timed out after {}ms",
                    self.label,
                    name,
                    self.timeout.as_millis()
                ),
            }
        }
        None
    }

    /// Run attempts in order, falling back to `default` on exhaustion.
    pub async fn resolve_or(self, default: T) -> Resolved<T> {
        let label = self.label.clone();
        match self.resolve().await {
            Some(resolved) => resolved,
            None => {
                warn!("{}: all providers failed, using fallback value", label);
                Resolved::default_value(default)
            }
        }
    }
}
