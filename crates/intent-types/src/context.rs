//! The per-request `ContextSnapshot` and its validation error.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a `ContextSnapshot` field is present but outside its
/// declared range. Surfaced to callers as-is (see `intent-resolver`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidContext {
    #[error("semantic_capacity must be in [0,1], got {0}")]
    SemanticCapacityOutOfRange(f32),
    #[error("social_propriety must be in [-1,1], got {0}")]
    SocialProprietyOutOfRange(f32),
    #[error("input_fidelity must be in [0,1], got {0}")]
    InputFidelityOutOfRange(f32),
    #[error("malformed temporal_context timestamp")]
    MalformedTimestamp,
}

/// Immutable per-request context. Every field is optional; absence means
/// "not signalling" rather than a default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    #[serde(default)]
    pub association_history: Vec<String>,
    #[serde(default)]
    pub conflict_markers: BTreeSet<String>,
    #[serde(default)]
    pub goal_alignment: Option<String>,
    #[serde(default)]
    pub situation_context: Option<String>,
    #[serde(default)]
    pub linguistic_indicators: Option<String>,
    #[serde(default)]
    pub semantic_capacity: Option<f32>,
    #[serde(default)]
    pub social_propriety: Option<f32>,
    #[serde(default)]
    pub location_context: Option<String>,
    #[serde(default)]
    pub temporal_context: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_profile: Option<String>,
    #[serde(default)]
    pub prosodic_features: Option<String>,
    /// Overrides the Normaliser-computed fidelity when supplied by the caller.
    #[serde(default)]
    pub input_fidelity: Option<f32>,
}

impl ContextSnapshot {
    /// Checks every numeric field against its declared range. Absent fields
    /// never fail validation.
    pub fn validate(&self) -> Result<(), InvalidContext> {
        if let Some(v) = self.semantic_capacity {
            if !(0.0..=1.0).contains(&v) {
                return Err(InvalidContext::SemanticCapacityOutOfRange(v));
            }
        }
        if let Some(v) = self.social_propriety {
            if !(-1.0..=1.0).contains(&v) {
                return Err(InvalidContext::SocialProprietyOutOfRange(v));
            }
        }
        if let Some(v) = self.input_fidelity {
            if !(0.0..=1.0).contains(&v) {
                return Err(InvalidContext::InputFidelityOutOfRange(v));
            }
        }
        Ok(())
    }

    /// Canonical serialisation of the location/purpose/user subset, used as
    /// `GoldenRecord::context_fingerprint`. Deterministic: fields are listed
    /// in a fixed order regardless of how the snapshot was constructed.
    pub fn fingerprint(&self) -> String {
        format!(
            "loc={}|purpose={}|user={}",
            self.location_context.as_deref().unwrap_or("_"),
            self.goal_alignment.as_deref().unwrap_or("_"),
            self.user_profile.as_deref().unwrap_or("_"),
        )
    }
}
