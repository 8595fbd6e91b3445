//! Liveness and readiness probes: `health_check` and `readiness_check`.
//! No Prometheus `/metrics` endpoint or authenticated metadata route —
//! neither is part of this service's contract.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ServerError;
use crate::state::ServerState;

/// `GET /health` — always 200 once the process is serving HTTP at all.
pub async fn health_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "intentd",
        "timestamp": intent_memory::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
    }))
}

/// `GET /ready` — 200 once corpus load and Fast Memory replay have
/// completed; 503 before that. `ServerState::new` performs both
/// synchronously before the state exists, so readiness is
/// really "has this process finished constructing its state and not been
/// told to drain" — surfaced via `ServerState::is_ready`.
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> Result<impl IntoResponse, ServerError> {
    if !state.is_ready() {
        return Err(ServerError::NotReady("startup not complete".to_string()));
    }

    Ok(Json(json!({
        "status": "ready",
        "service": "intentd",
        "timestamp": intent_memory::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
        "components": {
            "corpus": "loaded",
            "memory": "replayed",
        }
    })))
}
