//! Bounded TTL cache with FIFO insertion-order eviction.
//!
//! The eviction order is deliberately FIFO by first insertion, not LRU:
//! reads never refresh an entry's position, and overwriting an existing key
//! keeps its original slot in the queue. Expiry is lazy: a stale entry is
//! deleted by the read that observes it; there is no background sweep.
//!
//! None of the operations can fail; invalidating an absent key is a no-op.

use bidsync_core::CollectionSpec;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// Counters for observing cache behavior. Monotonically increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

pub struct BoundedTtlCache {
    entries: HashMap<String, CacheEntry>,
    /// Keys in first-insertion order; front is the eviction candidate.
    order: VecDeque<String>,
    ttl: Duration,
    max_entries: usize,
    stats: CacheStats,
}

impl BoundedTtlCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            ttl,
            max_entries: max_entries.max(1),
            stats: CacheStats::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Insert or overwrite. Overwrites keep the key's original queue
    /// position; inserting a new key at capacity evicts the oldest-inserted
    /// entry first.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.stored_at = Instant::now();
            return;
        }

        if self.entries.len() >= self.max_entries {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                self.stats.evictions += 1;
                tracing::debug!(key = %oldest, "Evicted oldest cache entry");
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Returns a copy of the stored value, or `None` if the key is absent
    /// or its entry has outlived the TTL (in which case the entry is
    /// deleted by this read).
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let stale = match self.entries.get(key) {
            None => {
                self.stats.misses += 1;
                return None;
            }
            Some(entry) => entry.stored_at.elapsed() > self.ttl,
        };

        if stale {
            self.remove(key);
            self.stats.expirations += 1;
            self.stats.misses += 1;
            tracing::debug!(key, "Cache entry expired on read");
            return None;
        }

        self.stats.hits += 1;
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Remove one entry by exact key. Absent keys are a no-op.
    pub fn invalidate(&mut self, key: &str) {
        self.remove(key);
    }

    /// Remove every entry in the entity's statically-known template set:
    /// the detail key, each sub-resource key, and the aggregate list key.
    pub fn invalidate_entity(&mut self, spec: &CollectionSpec, id: &str) {
        for key in spec.invalidation_keys(id) {
            self.remove(&key);
        }
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }

    #[cfg(test)]
    fn backdate(&mut self, key: &str, by: Duration) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.stored_at -= by;
        }
    }
}
