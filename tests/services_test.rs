//! Tests for the cache, fallback chain, NAV and analytics log services

use std::time::Duration;
use vaultsignal::config::FallbackConstants;
use vaultsignal::services::analytics::MAX_RECENT_LIMIT;
use vaultsignal::services::{compute_nav, AnalyticsLog, Cache, FallbackChain};
use vaultsignal::types::NewAnalyticsEvent;

fn temp_log() -> AnalyticsLog {
    let dir = std::env::temp_dir().join(format!("vaultsignal-services-{}", uuid::Uuid::new_v4()));
    AnalyticsLog::new(dir.join("analytics.jsonl"))
}

fn event(name: &str) -> NewAnalyticsEvent {
    NewAnalyticsEvent {
        event: name.to_string(),
        page: None,
        properties: serde_json::Value::Null,
    }
}

#[test]
fn test_cache_set_and_get() {
    let cache: Cache<String, u32> = Cache::new(Duration::from_secs(60));

    cache.set("key1".to_string(), 1);
    assert_eq!(cache.get(&"key1".to_string()), Some(1));
    assert_eq!(cache.get(&"key2".to_string()), None);
}

#[test]
fn test_cache_expiration() {
    let cache: Cache<&'static str, u32> = Cache::new(Duration::from_millis(10));

    cache.set("key1", 1);
    assert_eq!(cache.get(&"key1"), Some(1));

    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(cache.get(&"key1"), None);
}

#[test]
fn test_cache_zero_ttl_disabled() {
    let cache: Cache<&'static str, u32> = Cache::new(Duration::ZERO);

    cache.set("key1", 1);
    assert!(!cache.is_enabled());
    assert_eq!(cache.get(&"key1"), None);
}

#[test]
fn test_fallback_chain_uses_later_attempt() {
    let resolved = tokio_test::block_on(
        FallbackChain::new("prices", Duration::from_secs(1))
            .attempt("primary", async { Err(anyhow::anyhow!("rate limited")) })
            .attempt("secondary", async { Ok(64_000.0) })
            .resolve_or(95_000.0),
    );

    assert_eq!(resolved.value, 64_000.0);
    assert_eq!(resolved.source, "secondary");
    assert!(!resolved.fallback);
}

#[test]
fn test_fallback_chain_empty_uses_default() {
    let chain = FallbackChain::<f64>::new("prices", Duration::from_secs(1));
    assert!(chain.is_empty());

    let resolved = tokio_test::block_on(chain.resolve_or(95_000.0));
    assert_eq!(resolved.value, 95_000.0);
    assert_eq!(resolved.source, "fallback");
    assert!(resolved.fallback);
}

#[test]
fn test_nav_premium_and_discount() {
    let treasury = FallbackConstants {
        mstr_btc_holdings: 100.0,
        mstr_shares_outstanding: 1_000.0,
        ..FallbackConstants::default()
    };

    let premium = compute_nav(50_000.0, 10_000.0, &treasury);
    assert_eq!(premium.btc_per_share, 0.1);
    assert_eq!(premium.nav_per_share, 5_000.0);
    assert_eq!(premium.premium_pct, 100.0);

    let discount = compute_nav(50_000.0, 4_000.0, &treasury);
    assert!((discount.premium_pct + 20.0).abs() < 1e-9);
}

#[test]
fn test_analytics_log_keeps_newest_events() {
    let log = temp_log();

    tokio_test::block_on(async {
        for i in 0..5 {
            log.append(event(&format!("event_{}", i))).await.unwrap();
        }

        let recent = log.recent(2).await.unwrap();
        let names: Vec<_> = recent.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(names, vec!["event_3", "event_4"]);

        let all = log.recent(MAX_RECENT_LIMIT + 1).await.unwrap();
        assert_eq!(all.len(), 5);
    });
}

#[test]
fn test_analytics_log_missing_file_is_empty() {
    let log = temp_log();
    let recent = tokio_test::block_on(log.recent(10)).unwrap();
    assert!(recent.is_empty());
    assert!(!log.path().exists());
}
