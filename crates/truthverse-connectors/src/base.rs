//! Pieces shared by all connectors: normalized items, response cache,
//! failure circuit, and the blocking bridge

use crate::error::ConnectorError;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, error};
use truthverse_domain::CapabilityError;

/// One article or review, normalized across providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItem {
    /// Publisher name
    pub source_name: String,
    /// Publisher domain
    pub source_domain: String,
    /// Item URL (may be empty)
    pub url: String,
    /// Headline or claim text
    pub title: String,
    /// Description, content, or review summary
    pub body_text: String,
    /// Publication or review timestamp as reported
    pub published_at: Option<String>,
}

/// Deterministic cache key: SHA-256 over `connector:method:` plus the
/// parameters sorted by name
pub fn cache_key(connector: &str, method: &str, params: &[(&str, &str)]) -> String {
    let mut sorted: Vec<(&str, &str)> = params.to_vec();
    sorted.sort();

    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}:", connector, method).as_bytes());
    for (name, value) in sorted {
        hasher.update(format!("{}={};", name, value).as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// In-process TTL cache of connector responses
///
/// Holds at most `capacity` entries, evicting the least recently used.
/// Expired entries are dropped on read. A miss is never an error.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<LruCache<String, (Instant, Vec<NormalizedItem>)>>,
}

impl ResponseCache {
    /// Create a cache of up to `capacity` entries, each living for `ttl`
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cached items for `key`, if present and fresh
    pub fn get(&self, key: &str) -> Option<Vec<NormalizedItem>> {
        let mut entries = self.entries.lock().ok()?;
        let stale = match entries.get(key) {
            Some((stored, items)) if stored.elapsed() < self.ttl => return Some(items.clone()),
            Some(_) => true,
            None => false,
        };
        if stale {
            entries.pop(key);
        }
        None
    }

    /// Store items under `key`, evicting the least recently used entry when full
    pub fn insert(&self, key: String, items: Vec<NormalizedItem>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(key, (Instant::now(), items));
        }
    }

    /// Number of stored entries, fresh or not
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries held
    pub fn capacity(&self) -> usize {
        self.entries.lock().map(|e| e.cap().get()).unwrap_or(0)
    }
}

/// Consecutive-failure circuit
///
/// After `max_failures` failures in a row the connector reports itself
/// disabled; one success resets it.
pub struct ConnectorHealth {
    name: String,
    failures: AtomicU32,
    max_failures: u32,
}

impl ConnectorHealth {
    /// Create a healthy circuit
    pub fn new(name: impl Into<String>, max_failures: u32) -> Self {
        Self {
            name: name.into(),
            failures: AtomicU32::new(0),
            max_failures: max_failures.max(1),
        }
    }

    /// Whether the connector has disabled itself
    pub fn is_disabled(&self) -> bool {
        self.failures.load(Ordering::SeqCst) >= self.max_failures
    }

    /// Consecutive failures so far
    pub fn failure_count(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }

    /// Record a successful call
    pub fn record_success(&self) {
        self.failures.store(0, Ordering::SeqCst);
    }

    /// Record a failed call
    pub fn record_failure(&self) {
        let failures = self.failures.fetch_add(1, Ordering::SeqCst) + 1;
        if failures == self.max_failures {
            error!("{} disabled due to repeated failures", self.name);
        }
    }

    /// Fail fast when disabled
    pub fn check(&self) -> Result<(), ConnectorError> {
        if self.is_disabled() {
            debug!("{} skipped: disabled", self.name);
            return Err(ConnectorError::Disabled(self.name.clone()));
        }
        Ok(())
    }
}

/// Host part of a URL, or "unknown"
pub fn domain_of(raw: &str) -> String {
    url::Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Drive an async connector call from a synchronous capability method
///
/// Must run on a runtime's blocking pool (`spawn_blocking`).
pub(crate) fn block_on_current<F: Future>(future: F) -> Result<F::Output, CapabilityError> {
    let handle = tokio::runtime::Handle::try_current().map_err(|_| {
        CapabilityError::Unavailable("no async runtime for connector".to_string())
    })?;
    Ok(handle.block_on(future))
}
