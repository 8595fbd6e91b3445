//! `POST /feedback`, `GET /feedback/stats`, `GET /feedback/review-queue` —
//! the reinforcement-loop surface: a thin extractor/serialise wrapper
//! around one domain-crate call apiece.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use intent_feedback::FeedbackExtras;
use intent_types::LearningStats;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub request_id: uuid::Uuid,
    pub user_correction: String,
    pub was_successful: bool,
    /// Preserved from a richer, legacy feedback shape; never changes
    /// routing.
    #[serde(default)]
    pub correct_intent: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub success: bool,
    pub request_id: uuid::Uuid,
    pub action_taken: String,
    pub user_correction: String,
    pub message: String,
    pub learning_status: LearningStats,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

pub async fn submit_feedback(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<FeedbackRequest>,
) -> ServerResult<impl IntoResponse> {
    if !state.is_ready() {
        return Err(ServerError::NotReady("startup not complete".to_string()));
    }

    let extras = FeedbackExtras {
        correct_intent: request.correct_intent,
        notes: request.notes,
    };

    let manager = state.feedback_manager();
    let receipt = manager.submit(request.request_id, &request.user_correction, request.was_successful, extras)?;

    Ok(Json(FeedbackResponse {
        success: true,
        request_id: request.request_id,
        action_taken: receipt.action.as_str().to_string(),
        user_correction: request.user_correction,
        message: format!("feedback recorded: {}", receipt.action.as_str()),
        learning_status: receipt.stats_snapshot,
        timestamp: intent_memory::now(),
    }))
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: LearningStats,
    pub now: chrono::DateTime<chrono::Utc>,
}

pub async fn feedback_stats(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(StatsResponse {
        stats: state.stats.snapshot(),
        now: intent_memory::now(),
    })
}

#[derive(Debug, Serialize)]
pub struct ReviewQueueResponse {
    pub pending_reviews: usize,
    pub items: Vec<intent_types::ReviewItem>,
}

pub async fn review_queue(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let items = state.review_queue.list_pending();
    Json(ReviewQueueResponse {
        pending_reviews: items.len(),
        items,
    })
}
