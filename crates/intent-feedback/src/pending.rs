//! The short-lived `request_id -> PendingResolution` cache `submit()` reads
//! from: an in-memory short-TTL cache, evicted after a bounded window or
//! when capacity is reached.
//!
//! No background sweeper; just a lazily-applied expiry check performed on
//! the access path.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use intent_types::PendingResolution;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingCacheConfig {
    pub ttl: Duration,
    pub max_capacity: usize,
}

impl Default for PendingCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_capacity: 10_000,
        }
    }
}

pub struct PendingCache {
    entries: DashMap<Uuid, (PendingResolution, Instant)>,
    config: PendingCacheConfig,
}

impl PendingCache {
    pub fn new(config: PendingCacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
        }
    }

    /// Record a just-completed resolution for later feedback lookup. Evicts
    /// expired entries first; if still at capacity, drops the single oldest
    /// entry to make room (an unlikely path under the default 1h/10k
    /// settings, but the cache must stay bounded regardless).
    pub fn insert(&self, pending: PendingResolution) {
        self.evict_expired();
        if self.entries.len() >= self.config.max_capacity {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().1)
                .map(|entry| *entry.key())
            {
                self.entries.remove(&oldest);
            }
        }
        let request_id = pending.request_id;
        self.entries.insert(request_id, (pending, Instant::now()));
    }

    /// Remove and return the pending record for `request_id`, if present and
    /// not yet expired. A hit is consumed: the same `request_id` cannot be
    /// used to reinforce twice.
    pub fn take(&self, request_id: Uuid) -> Option<PendingResolution> {
        let (_, (pending, inserted_at)) = self.entries.remove(&request_id)?;
        if inserted_at.elapsed() > self.config.ttl {
            return None;
        }
        Some(pending)
    }

    fn evict_expired(&self) {
        let ttl = self.config.ttl;
        self.entries.retain(|_, (_, inserted_at)| inserted_at.elapsed() <= ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intent_types::PendingResolution;

    fn sample(request_id: Uuid) -> PendingResolution {
        PendingResolution {
            request_id,
            normalized_input: "transfer 500 to john".into(),
            embedding: vec![0.1, 0.2],
            confidence: 0.9,
            context_fingerprint: "loc=_|purpose=_|user=_".into(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn insert_then_take_round_trips() {
        let cache = PendingCache::new(PendingCacheConfig::default());
        let id = Uuid::from_u128(1);
        cache.insert(sample(id));
        assert_eq!(cache.len(), 1);
        let got = cache.take(id).unwrap();
        assert_eq!(got.request_id, id);
        assert!(cache.is_empty());
    }

    #[test]
    fn take_is_a_one_shot_lookup() {
        let cache = PendingCache::new(PendingCacheConfig::default());
        let id = Uuid::from_u128(1);
        cache.insert(sample(id));
        assert!(cache.take(id).is_some());
        assert!(cache.take(id).is_none());
    }

    #[test]
    fn unknown_request_id_misses() {
        let cache = PendingCache::new(PendingCacheConfig::default());
        assert!(cache.take(Uuid::from_u128(99)).is_none());
    }

    #[test]
    fn expired_entry_is_not_returned() {
        let cache = PendingCache::new(PendingCacheConfig {
            ttl: Duration::from_millis(1),
            max_capacity: 10,
        });
        let id = Uuid::from_u128(1);
        cache.insert(sample(id));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.take(id).is_none());
    }

    #[test]
    fn over_capacity_evicts_the_oldest_entry() {
        let cache = PendingCache::new(PendingCacheConfig {
            ttl: Duration::from_secs(3600),
            max_capacity: 1,
        });
        let first = Uuid::from_u128(1);
        let second = Uuid::from_u128(2);
        cache.insert(sample(first));
        std::thread::sleep(Duration::from_millis(2));
        cache.insert(sample(second));
        assert_eq!(cache.len(), 1);
        assert!(cache.take(first).is_none());
        assert!(cache.take(second).is_some());
    }
}
