//! The final resolver output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidate::SemanticCandidate;
use crate::factor::{FactorName, ResolutionFactor};

/// Reserved pseudo-intent id returned when no candidate clears the
/// confidence floor. Callers pattern-match on `fallback_used`, not on this
/// string, but it is stable across versions.
pub const FALLBACK_INTENT_ID: &str = "__fallback_uncertain__";

/// The resolver's answer for a single `resolve()` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedIntent {
    pub intent_id: String,
    pub confidence: f32,
    pub stage1_candidates: Vec<SemanticCandidate>,
    pub stage2_passed: bool,
    /// Ordered by `|delta|` descending; ties broken by canonical factor order.
    pub active_factors: Vec<ResolutionFactor>,
    pub factor_deltas: BTreeMap<FactorName, f32>,
    /// Stage-2 survivors other than the winner, keyed by intent id.
    pub alternatives: BTreeMap<String, f32>,
    pub fallback_used: bool,
    pub request_id: Uuid,
}

impl VerifiedIntent {
    pub fn is_fallback(&self) -> bool {
        self.fallback_used
    }
}
