//! In-Memory Evaluation Cache
//!
//! Thread-safe TTL cache for address evaluations, backed by DashMap.
//!
//! Features:
//! - TTL-based expiration (5 minutes default)
//! - Namespaced, lower-cased address keys
//! - Bounded capacity (expired entries first, then the oldest)
//! - Cache HIT/MISS logging and counters

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::models::types::CheckResult;
use crate::utils::constants::{
    CACHE_CLEANUP_INTERVAL_SECS, CHECK_CACHE_NAMESPACE, DEFAULT_CACHE_MAX_ENTRIES,
    DEFAULT_CACHE_TTL_SECS,
};

/// Cache entry with insertion time for TTL validation
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub result: CheckResult,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    /// Seconds left before expiry
    pub fn remaining_ttl(&self) -> u64 {
        self.ttl.saturating_sub(self.created_at.elapsed()).as_secs()
    }
}

/// Evaluation cache keyed by `check:<lowercase address>`
#[derive(Clone)]
pub struct EvaluationCache {
    store: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Default for EvaluationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationCache {
    /// Cache with the default 300s TTL
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_limits(ttl, DEFAULT_CACHE_MAX_ENTRIES)
    }

    pub fn with_limits(ttl: Duration, max_entries: usize) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    #[inline]
    pub fn cache_key(address: &str) -> String {
        format!("{}{}", CHECK_CACHE_NAMESPACE, address.trim().to_lowercase())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stored result if present and not expired
    pub fn get(&self, address: &str) -> Option<CheckResult> {
        let key = Self::cache_key(address);

        let hit = match self.store.get(&key) {
            Some(entry) if !entry.is_expired() => {
                info!("✅ CACHE HIT: {} (TTL: {}s remaining)", key, entry.remaining_ttl());
                Some(entry.result.clone())
            }
            Some(_) => {
                debug!("📭 CACHE MISS (expired): {}", key);
                None
            }
            None => {
                debug!("📭 CACHE MISS: {}", key);
                None
            }
        };

        match hit {
            Some(result) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(result)
            }
            None => {
                self.store.remove_if(&key, |_, entry| entry.is_expired());
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a result for the configured TTL
    pub fn set(&self, address: &str, result: CheckResult) {
        let key = Self::cache_key(address);

        if !self.store.contains_key(&key) && self.store.len() >= self.max_entries {
            self.make_room();
        }

        self.store.insert(
            key.clone(),
            CacheEntry {
                result,
                created_at: Instant::now(),
                ttl: self.ttl,
            },
        );
        info!("💾 CACHE SET: {} (TTL: {}s)", key, self.ttl.as_secs());
    }

    fn make_room(&self) {
        if self.cleanup_expired() > 0 && self.store.len() < self.max_entries {
            return;
        }

        let oldest = self
            .store
            .iter()
            .min_by_key(|entry| entry.value().created_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.store.remove(&key);
            debug!("🗑️ CACHE EVICT: {}", key);
        }
    }

    /// Remove every expired entry
    pub fn cleanup_expired(&self) -> usize {
        let before = self.store.len();
        self.store.retain(|_, entry| !entry.is_expired());
        let removed = before.saturating_sub(self.store.len());
        if removed > 0 {
            info!("🧹 CACHE CLEANUP: {} expired entries removed", removed);
        }
        removed
    }

    /// Purge expired entries every minute
    pub fn spawn_cleanup_task(&self) -> tokio::task::JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(CACHE_CLEANUP_INTERVAL_SECS));
            loop {
                interval.tick().await;
                cache.cleanup_expired();
            }
        })
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            entries: self.store.len(),
            hits,
            misses,
            hit_rate,
            ttl_secs: self.ttl.as_secs(),
        }
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub ttl_secs: u64,
}
