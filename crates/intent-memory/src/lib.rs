//! Fast Memory (C4): the runtime vector store of golden records.
//!
//! A single-writer-many-reader store: `insert` is serialised through a
//! `RwLock` write guard, `query` takes a read guard and always observes a
//! consistent (non-torn) snapshot. Exact top-K cosine similarity — not
//! approximate nearest-neighbour search — because ranking must be
//! deterministic and `record_id`-tie-broken, which an ANN index's
//! approximate recall can't guarantee.

mod backend;
mod error;
mod eviction;

pub use backend::{JsonLinesBackend, MemoryBackend, NullBackend};
pub use error::MemoryError;
pub use eviction::EvictionPolicy;

use std::fs;
use std::path::Path;
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use intent_embed::cosine_similarity;
use intent_types::GoldenRecord;
use uuid::Uuid;

/// How a persisted-embedder-model mismatch is handled at startup (spec
/// §4.7 "Invalidation": "either rejected (fail-fast) or cleared
/// (configurable), never silently used").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelMismatchPolicy {
    #[default]
    FailFast,
    Clear,
}

fn read_model_sidecar(path: &Path) -> Result<Option<String>, MemoryError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|e| MemoryError::PersistenceRead(e.to_string()))?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

fn write_model_sidecar(path: &Path, model_id: &str) -> Result<(), MemoryError> {
    fs::write(path, model_id).map_err(|e| MemoryError::PersistenceWrite(e.to_string()))
}

/// The runtime vector store of golden records, keyed by `record_id`.
pub struct FastMemory {
    records: RwLock<Vec<GoldenRecord>>,
    backend: Box<dyn MemoryBackend>,
    eviction: EvictionPolicy,
}

impl FastMemory {
    pub fn new(backend: Box<dyn MemoryBackend>, eviction: EvictionPolicy) -> Result<Self, MemoryError> {
        let existing = backend.load_all()?;
        Ok(Self {
            records: RwLock::new(existing),
            backend,
            eviction,
        })
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(NullBackend), EvictionPolicy::Unbounded)
            .expect("NullBackend::load_all is infallible")
    }

    /// As `new`, but first compares `current_model_id` against the id recorded
    /// in `model_sidecar` (if any) the last time this stream was written.
    /// A mismatch is never silently ignored: `FailFast` surfaces
    /// `MemoryError::ModelMismatch`; `Clear` logs a warning and starts from an
    /// empty store instead of replaying embeddings from a retired model. On
    /// success (match, or no prior sidecar — first run) the sidecar is
    /// (re)written with `current_model_id`.
    pub fn load_with_model_check(
        backend: Box<dyn MemoryBackend>,
        eviction: EvictionPolicy,
        model_sidecar: Option<&Path>,
        current_model_id: &str,
        policy: ModelMismatchPolicy,
    ) -> Result<Self, MemoryError> {
        if let Some(sidecar) = model_sidecar {
            if let Some(persisted) = read_model_sidecar(sidecar)? {
                if persisted != current_model_id {
                    match policy {
                        ModelMismatchPolicy::FailFast => {
                            return Err(MemoryError::ModelMismatch {
                                persisted,
                                current: current_model_id.to_string(),
                            });
                        }
                        ModelMismatchPolicy::Clear => {
                            tracing::warn!(
                                persisted_model = %persisted,
                                current_model = %current_model_id,
                                "embedder model changed: clearing Fast Memory instead of replaying stale embeddings"
                            );
                            backend.clear()?;
                            write_model_sidecar(sidecar, current_model_id)?;
                            let records = RwLock::new(Vec::new());
                            return Ok(Self { records, backend, eviction });
                        }
                    }
                }
            }
            write_model_sidecar(sidecar, current_model_id)?;
        }
        Self::new(backend, eviction)
    }

    /// Insert `record`. Idempotent on `record_id`: inserting the same
    /// record twice leaves the store in the same state as inserting it
    /// once.
    pub fn insert(&self, record: GoldenRecord) -> Result<(), MemoryError> {
        self.backend.append(&record)?;
        let mut guard = self.records.write().expect("fast memory lock poisoned");
        if let Some(existing) = guard.iter_mut().find(|r| r.record_id == record.record_id) {
            *existing = record.clone();
        } else {
            guard.push(record.clone());
        }
        self.evict_locked(&mut guard, record.record_id);
        Ok(())
    }

    /// Remove records over the configured cap/age, protecting `just_inserted`
    /// from removal regardless of its age: eviction must never remove a
    /// record inserted within the current request's processing window.
    fn evict_locked(&self, guard: &mut Vec<GoldenRecord>, just_inserted: Uuid) {
        match self.eviction {
            EvictionPolicy::Unbounded => {}
            EvictionPolicy::MaxCount(cap) => {
                while guard.len() > cap {
                    let victim = guard
                        .iter()
                        .enumerate()
                        .filter(|(_, r)| r.record_id != just_inserted)
                        .min_by_key(|(_, r)| r.created_at)
                        .map(|(idx, _)| idx);
                    match victim {
                        Some(idx) => {
                            guard.remove(idx);
                        }
                        None => break,
                    }
                }
            }
            EvictionPolicy::MaxAge(max_age) => {
                let cutoff = Utc::now() - chrono::Duration::from_std(max_age).unwrap_or_default();
                guard.retain(|r| r.record_id == just_inserted || r.created_at >= cutoff);
            }
        }
    }

    /// Top-k records by cosine similarity to `embedding`, similarity
    /// descending, ties broken by `record_id` lexicographic order. `k` is
    /// clamped to the current record count.
    pub fn query(&self, embedding: &[f32], k: usize) -> Vec<(GoldenRecord, f32)> {
        let guard = self.records.read().expect("fast memory lock poisoned");
        let mut scored: Vec<(GoldenRecord, f32)> = guard
            .iter()
            .map(|r| (r.clone(), cosine_similarity(&r.embedding, embedding)))
            .collect();
        scored.sort_by(|(ra, sa), (rb, sb)| {
            sb.partial_cmp(sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| ra.record_id.cmp(&rb.record_id))
        });
        let k = k.min(scored.len());
        scored.truncate(k);
        scored
    }

    pub fn count(&self) -> usize {
        self.records.read().expect("fast memory lock poisoned").len()
    }

    /// An immutable point-in-time copy, for persistence snapshotting.
    pub fn snapshot(&self) -> Vec<GoldenRecord> {
        self.records.read().expect("fast memory lock poisoned").clone()
    }

    /// Replace the store's contents wholesale (used when restoring from a
    /// persisted snapshot at startup).
    pub fn restore(&self, snapshot: Vec<GoldenRecord>) {
        let mut guard = self.records.write().expect("fast memory lock poisoned");
        *guard = snapshot;
    }
}

/// Monotonic-enough timestamp helper for callers that need a `created_at`
/// without pulling in a full clock abstraction. Exposed so `intent-feedback`
/// doesn't need its own `chrono` dependency just for this.
pub fn now() -> DateTime<Utc> {
    let _ = SystemTime::now().duration_since(UNIX_EPOCH);
    Utc::now()
}
