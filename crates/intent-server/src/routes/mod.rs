//! HTTP endpoint implementations, one module per concern — mirroring the
//! teacher's `routes::{health, process, index, matching}` split.
//!
//! - `health`: liveness/readiness probes
//! - `resolve`: `POST /resolve-intent`
//! - `feedback`: `POST /feedback`, `GET /feedback/stats`, `GET /feedback/review-queue`

pub mod feedback;
pub mod health;
pub mod resolve;

use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ServerError;

/// API info (`GET /`). Public, no readiness requirement.
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "intentd",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/resolve-intent",
            "/feedback",
            "/feedback/stats",
            "/feedback/review-queue",
            "/health",
            "/ready",
        ]
    }))
}

pub async fn not_found() -> ServerError {
    ServerError::NotFound("no such route".to_string())
}
