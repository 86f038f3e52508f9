//! # Response Cache
//!
//! In-memory store of successful responses keyed by request identity. Entries
//! carry their insertion instant and expire after the configured TTL; an
//! expired entry found during lookup is removed on the spot. Only successes
//! ever reach [`ResponseCache::insert`] — failed classifications are never
//! cached.

use crate::core::types::ResponseEnvelope;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// A cached upstream response.
#[derive(Debug, Clone)]
struct CachedResponse {
    body: serde_json::Value,
    status: u16,
    inserted_at: Instant,
    cached_at: DateTime<Utc>,
}

impl CachedResponse {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// TTL-bounded response cache.
pub(crate) struct ResponseCache {
    ttl: Duration,
    entries: DashMap<String, CachedResponse>,
}

impl ResponseCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// Look up a live entry, removing it if the TTL has lapsed.
    pub(crate) fn get(&self, key: &str) -> Option<ResponseEnvelope> {
        let entry = self.entries.get(key)?;

        if entry.is_expired(self.ttl) {
            drop(entry);
            self.entries.remove(key);
            debug!(key, "Evicted expired cache entry");
            return None;
        }

        Some(ResponseEnvelope {
            data: entry.body.clone(),
            status: entry.status,
            cached_at: Some(entry.cached_at),
        })
    }

    /// Insert a successful response, replacing any previous entry.
    pub(crate) fn insert(&self, key: &str, body: serde_json::Value, status: u16) {
        self.entries.insert(
            key.to_string(),
            CachedResponse {
                body,
                status,
                inserted_at: Instant::now(),
                cached_at: Utc::now(),
            },
        );
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
