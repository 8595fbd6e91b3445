//! Transient Stage-1 output.

use serde::{Deserialize, Serialize};

/// Where a Stage-1 candidate's base score originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Corpus,
    Memory,
}

/// A single intent proposed by Stage 1, before Stage-2 (CRM) validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticCandidate {
    pub intent_id: String,
    /// In [0, 1]. The maximum cosine similarity over the intent's corpus
    /// examples, optionally boosted by a Fast Memory hit (see
    /// `intent-resolver`).
    pub base_score: f32,
    pub source: CandidateSource,
}
