//! The append-only `ReviewItem` written by negative feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Reviewed,
}

/// One negative-feedback record awaiting human adjudication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub item_id: Uuid,
    pub request_id: Uuid,
    pub original_input: String,
    /// What the engine chose.
    pub resolved_intent_id: String,
    /// What the user said was correct.
    pub user_correction: String,
    pub confidence_at_time: f32,
    pub created_at: DateTime<Utc>,
    pub status: ReviewStatus,
    /// Preserved from the richer (legacy) feedback shape's `correct_intent`/
    /// `notes` fields when present. Never influences routing.
    #[serde(default)]
    pub notes: Option<String>,
}
