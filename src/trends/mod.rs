//! Trending-topics cache.
//!
//! A small freshness-window cache in front of the trend source. Entries are
//! immutable value objects, so duplicate in-flight fetches are a benign
//! race: last write wins and both callers converge on equivalent data.
//!
//! The store is a trait so the window logic can be unit-tested against a
//! fake with hand-set timestamps; the default [`MemoryStore`] is a bounded
//! moka cache.

use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;
use crate::telemetry;

/// Fixed key the trend set is cached under.
pub const TREND_CACHE_KEY: &str = "novus.trending";

/// Maximum age before a cached trend set is considered stale.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(6 * 60 * 60);

/// A trending-topic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendEntry {
    pub title: String,
    pub topic: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A cached trend set with the time it was fetched.
#[derive(Debug, Clone)]
pub struct CachedTrends {
    pub entries: Vec<TrendEntry>,
    pub fetched_at: SystemTime,
}

/// Durable store the cache reads and writes through.
pub trait TrendStore: Send + Sync {
    fn read(&self, key: &str) -> Option<CachedTrends>;
    fn write(&self, key: &str, value: CachedTrends);
}

/// In-memory store backed by a bounded moka cache.
pub struct MemoryStore {
    entries: moka::sync::Cache<String, CachedTrends>,
}

impl MemoryStore {
    pub fn new() -> Self {
        // One fixed key in practice; the bound guards against misuse.
        Self {
            entries: moka::sync::Cache::new(8),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendStore for MemoryStore {
    fn read(&self, key: &str) -> Option<CachedTrends> {
        self.entries.get(key)
    }

    fn write(&self, key: &str, value: CachedTrends) {
        self.entries.insert(key.to_string(), value);
    }
}

/// Upstream supplier of trend entries.
#[async_trait]
pub trait TrendSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<TrendEntry>>;
}

/// Source returning the curated editorial list.
///
/// Stands in for an external news API; gives the feed its "headless CMS"
/// shape without a network dependency.
#[derive(Debug, Clone, Copy, Default)]
pub struct CuratedSource;

#[async_trait]
impl TrendSource for CuratedSource {
    async fn fetch(&self) -> Result<Vec<TrendEntry>> {
        Ok(curated_trends())
    }
}

/// Freshness-window cache in front of a [`TrendSource`].
pub struct TrendCache<S, F> {
    store: S,
    source: F,
    window: Duration,
}

impl<S: TrendStore, F: TrendSource> TrendCache<S, F> {
    /// Create a cache with the default six-hour freshness window.
    pub fn new(store: S, source: F) -> Self {
        Self::with_window(store, source, FRESHNESS_WINDOW)
    }

    /// Create a cache with an explicit freshness window.
    pub fn with_window(store: S, source: F, window: Duration) -> Self {
        Self {
            store,
            source,
            window,
        }
    }

    /// Return the cached trend set, refetching when stale.
    ///
    /// Never fails: a fetch failure yields the curated fallback set and
    /// leaves the store untouched, so a still-valid entry is never
    /// overwritten with fallback data.
    pub async fn get(&self) -> Vec<TrendEntry> {
        if let Some(cached) = self.store.read(TREND_CACHE_KEY) {
            let age = SystemTime::now()
                .duration_since(cached.fetched_at)
                .unwrap_or_default();
            if age < self.window {
                metrics::counter!(telemetry::TREND_CACHE_HITS_TOTAL).increment(1);
                return cached.entries;
            }
        }
        metrics::counter!(telemetry::TREND_CACHE_MISSES_TOTAL).increment(1);

        match self.source.fetch().await {
            Ok(entries) => {
                self.store.write(
                    TREND_CACHE_KEY,
                    CachedTrends {
                        entries: entries.clone(),
                        fetched_at: SystemTime::now(),
                    },
                );
                entries
            }
            Err(e) => {
                warn!(error = %e, "trend fetch failed, serving curated fallback");
                curated_trends()
            }
        }
    }
}

/// The curated high-impact trend set used as seed content and fetch-failure
/// fallback.
pub fn curated_trends() -> Vec<TrendEntry> {
    vec![
        TrendEntry {
            title: "AI Regulation Summit".into(),
            topic: "Artificial Intelligence".into(),
            summary: "Global leaders gather in Geneva to establish the first comprehensive \
                      framework for AI safety and ethics, aiming to curb autonomous weapon systems."
                .into(),
            details: Some("## The Geneva AI Accord\n\nLeaders from 40 nations have convened to \
                           draft binding commitments on autonomous systems."
                .into()),
        },
        TrendEntry {
            title: "Quantum Computing Breakthrough".into(),
            topic: "Technology".into(),
            summary: "Researchers achieve quantum supremacy with a new stable qubit processor, \
                      potentially rendering current encryption standards obsolete within the decade."
                .into(),
            details: Some("## Quantum Leap\n\nA joint team demonstrated sustained error-corrected \
                           computation on a 1,000-qubit array."
                .into()),
        },
        TrendEntry {
            title: "Global Water Futures".into(),
            topic: "Resources".into(),
            summary: "New desalination tech promises to lower costs by 60%, offering a lifeline \
                      to drought-stricken regions in North Africa and the Middle East."
                .into(),
            details: Some("## Quenching the Thirst\n\nThe breakthrough uses graphene membranes to \
                           cut the energy cost of reverse osmosis."
                .into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Plain fake store so tests can plant entries with arbitrary timestamps.
    #[derive(Default)]
    struct FakeStore {
        entries: Mutex<HashMap<String, CachedTrends>>,
    }

    impl TrendStore for FakeStore {
        fn read(&self, key: &str) -> Option<CachedTrends> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        fn write(&self, key: &str, value: CachedTrends) {
            self.entries.lock().unwrap().insert(key.to_string(), value);
        }
    }

    struct CountingSource {
        fetches: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl TrendSource for CountingSource {
        async fn fetch(&self) -> Result<Vec<TrendEntry>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(crate::GatewayError::Http("upstream down".into()));
            }
            Ok(vec![TrendEntry {
                title: "Fresh".into(),
                topic: "Test".into(),
                summary: "freshly fetched".into(),
                details: None,
            }])
        }
    }

    fn planted(fetched_at: SystemTime) -> CachedTrends {
        CachedTrends {
            entries: vec![TrendEntry {
                title: "Cached".into(),
                topic: "Test".into(),
                summary: "from the store".into(),
                details: None,
            }],
            fetched_at,
        }
    }

    #[tokio::test]
    async fn fresh_entry_short_circuits_the_source() {
        let store = FakeStore::default();
        store.write(
            TREND_CACHE_KEY,
            planted(SystemTime::now() - (FRESHNESS_WINDOW - Duration::from_secs(1))),
        );
        let cache = TrendCache::new(store, CountingSource::new(false));

        let entries = cache.get().await;
        assert_eq!(entries[0].title, "Cached");
        assert_eq!(cache.source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stale_entry_triggers_fetch_and_rewrite() {
        let store = FakeStore::default();
        store.write(
            TREND_CACHE_KEY,
            planted(SystemTime::now() - (FRESHNESS_WINDOW + Duration::from_secs(1))),
        );
        let cache = TrendCache::new(store, CountingSource::new(false));

        let entries = cache.get().await;
        assert_eq!(entries[0].title, "Fresh");
        assert_eq!(cache.source.fetches.load(Ordering::SeqCst), 1);

        // The store now holds the fresh set.
        let rewritten = cache.store.read(TREND_CACHE_KEY).unwrap();
        assert_eq!(rewritten.entries[0].title, "Fresh");
    }

    #[tokio::test]
    async fn empty_store_fetches() {
        let cache = TrendCache::new(FakeStore::default(), CountingSource::new(false));
        let entries = cache.get().await;
        assert_eq!(entries[0].title, "Fresh");
    }

    #[tokio::test]
    async fn fetch_failure_serves_fallback_without_writing() {
        let cache = TrendCache::new(FakeStore::default(), CountingSource::new(true));
        let entries = cache.get().await;
        assert_eq!(entries, curated_trends());
        assert!(cache.store.read(TREND_CACHE_KEY).is_none());
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.read(TREND_CACHE_KEY).is_none());
        store.write(TREND_CACHE_KEY, planted(SystemTime::now()));
        let cached = store.read(TREND_CACHE_KEY).unwrap();
        assert_eq!(cached.entries[0].title, "Cached");
    }

    #[tokio::test]
    async fn curated_source_supplies_seed_content() {
        let entries = CuratedSource.fetch().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title, "AI Regulation Summit");
    }
}
