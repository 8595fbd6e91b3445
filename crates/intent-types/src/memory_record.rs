//! The persistent `GoldenRecord` written by positive feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A `(normalised input, embedding, resolved intent, context fingerprint)`
/// tuple stored on successful feedback. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldenRecord {
    pub record_id: Uuid,
    pub original_input: String,
    pub embedding: Vec<f32>,
    pub resolved_intent_id: String,
    pub confidence_at_time: f32,
    pub context_fingerprint: String,
    pub created_at: DateTime<Utc>,
}
