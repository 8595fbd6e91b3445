//! Optional eviction strategies for Fast Memory's durable store.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    #[default]
    Unbounded,
    MaxCount(usize),
    MaxAge(Duration),
}
