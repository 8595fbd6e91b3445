//! `POST /resolve-intent` — the engine's single public entry point: parse a
//! typed request body, call into the domain crate, translate the result
//! into its wire shape, store the handoff needed for a later `/feedback`
//! call.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use intent_types::{ContextSnapshot, ResolutionFactor, VerifiedIntent};

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub command_text: String,
    #[serde(default)]
    pub context: Option<ContextSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct AuditTrail {
    pub input_text: String,
    pub active_factors: Vec<ResolutionFactor>,
    pub all_scores: BTreeMap<String, f32>,
    pub resolution_timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub resolved_intent: String,
    pub confidence_score: f32,
    pub contributing_factors: Vec<ResolutionFactor>,
    pub alternative_intents: BTreeMap<String, f32>,
    pub audit_trail: AuditTrail,
    pub request_id: uuid::Uuid,
    pub processing_time_ms: u64,
}

impl ResolveResponse {
    fn from_verified(verified: VerifiedIntent, input_text: String, now: chrono::DateTime<chrono::Utc>, processing_time_ms: u64) -> Self {
        let all_scores = verified
            .factor_deltas
            .iter()
            .map(|(name, score)| (name.as_str().to_string(), *score))
            .collect();

        Self {
            resolved_intent: verified.intent_id,
            confidence_score: verified.confidence,
            contributing_factors: verified.active_factors.clone(),
            alternative_intents: verified.alternatives,
            audit_trail: AuditTrail {
                input_text,
                active_factors: verified.active_factors,
                all_scores,
                resolution_timestamp: now,
            },
            request_id: verified.request_id,
            processing_time_ms,
        }
    }
}

pub async fn resolve_intent(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ResolveRequest>,
) -> ServerResult<impl IntoResponse> {
    if !state.is_ready() {
        return Err(ServerError::NotReady("startup not complete".to_string()));
    }

    let len = request.command_text.chars().count();
    if !(1..=2000).contains(&len) {
        return Err(ServerError::BadRequest(format!(
            "command_text must be 1..2000 characters, got {len}"
        )));
    }

    let context = request.context.unwrap_or_default();
    let start = Instant::now();

    let resolver = state.resolver();
    let outcome = resolver.resolve(&request.command_text, context)?;

    let processing_time_ms = start.elapsed().as_millis() as u64;
    let input_text = outcome.pending.normalized_input.clone();
    let resolved_at = outcome.pending.created_at;
    state.pending.insert(outcome.pending);

    let response = ResolveResponse::from_verified(outcome.verified, input_text, resolved_at, processing_time_ms);
    Ok(Json(response))
}
