//! The short-lived record a resolution leaves behind for the feedback path.
//!
//! The Hybrid Resolver (C6) never writes to Fast Memory itself; it only has
//! the normalised input, embedding, and confidence a
//! later `submit()` call would need to build a `GoldenRecord`. This type is
//! the hand-off between the two: the orchestrating caller stores one per
//! `request_id` in the Feedback Manager's pending cache.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct PendingResolution {
    pub request_id: Uuid,
    pub normalized_input: String,
    pub embedding: Vec<f32>,
    pub confidence: f32,
    /// `ContextSnapshot::fingerprint()` at resolution time, carried forward
    /// so a later reinforcement can build a complete `GoldenRecord` without
    /// the feedback path needing its own copy of the context.
    pub context_fingerprint: String,
    /// The engine's own answer for this request — either a real intent id or
    /// the fallback id. The Feedback Manager needs this to populate
    /// `ReviewItem.resolved_intent_id`; carrying it here means the stateless
    /// HTTP layer never has to re-derive or separately track it.
    pub resolved_intent_id: String,
    pub created_at: DateTime<Utc>,
}
