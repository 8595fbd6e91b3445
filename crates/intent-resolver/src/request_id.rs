//! Pluggable request-id generation (Design Note: "Determinism vs random
//! request_id"). Resolution *results* never depend on the request id —
//! only observability and the feedback round-trip do — so production and
//! test callers can use different sources without changing behaviour.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

pub trait RequestIdSource: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// Production source: a proper random UUID v4 per call.
#[derive(Debug, Default)]
pub struct RandomRequestIds;

impl RequestIdSource for RandomRequestIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic source for reproducible tests: a monotonically increasing
/// counter encoded into a UUID's low bits.
#[derive(Debug, Default)]
pub struct SeededRequestIds {
    counter: AtomicU64,
}

impl RequestIdSource for SeededRequestIds {
    fn next_id(&self) -> Uuid {
        let next = self.counter.fetch_add(1, Ordering::Relaxed);
        Uuid::from_u128(next as u128)
    }
}
