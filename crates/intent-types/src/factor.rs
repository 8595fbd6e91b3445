//! The 12-factor Context Resolution Matrix vocabulary.
//!
//! Factors are a closed enumeration (Design Note "Polymorphism over
//! factors") rather than an open trait hierarchy: a discriminated union
//! keeps `factor_deltas` maps and ordering comparisons exhaustive-checkable
//! at compile time.

use serde::{Deserialize, Serialize};

/// One of the 12 CRM factors, in their fixed evaluation order, plus the
/// synthetic `Fallback` entry used to record why a resolution fell back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorName {
    AssociationHistory,
    ConflictMarkers,
    GoalAlignment,
    SituationContext,
    LinguisticIndicators,
    SemanticCapacity,
    SocialPropriety,
    LocationContext,
    TemporalContext,
    UserProfile,
    ProsodicFeatures,
    InputFidelity,
    /// Not a CRM factor: a synthetic entry recording the fallback reason.
    Fallback,
}

impl FactorName {
    /// The fixed Context Resolution Matrix evaluation order, used to break
    /// ties when two factors have equal `|delta|`.
    pub const ORDER: [FactorName; 12] = [
        FactorName::AssociationHistory,
        FactorName::ConflictMarkers,
        FactorName::GoalAlignment,
        FactorName::SituationContext,
        FactorName::LinguisticIndicators,
        FactorName::SemanticCapacity,
        FactorName::SocialPropriety,
        FactorName::LocationContext,
        FactorName::TemporalContext,
        FactorName::UserProfile,
        FactorName::ProsodicFeatures,
        FactorName::InputFidelity,
    ];

    pub fn canonical_rank(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(usize::MAX)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FactorName::AssociationHistory => "association_history",
            FactorName::ConflictMarkers => "conflict_markers",
            FactorName::GoalAlignment => "goal_alignment",
            FactorName::SituationContext => "situation_context",
            FactorName::LinguisticIndicators => "linguistic_indicators",
            FactorName::SemanticCapacity => "semantic_capacity",
            FactorName::SocialPropriety => "social_propriety",
            FactorName::LocationContext => "location_context",
            FactorName::TemporalContext => "temporal_context",
            FactorName::UserProfile => "user_profile",
            FactorName::ProsodicFeatures => "prosodic_features",
            FactorName::InputFidelity => "input_fidelity",
            FactorName::Fallback => "fallback",
        }
    }
}

/// Whether a factor's effect was a boost, a penalty, or an outright
/// elimination of the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Influence {
    Boost,
    Penalty,
    HardStop,
}

/// One factor's contribution to a candidate's score, as recorded in a
/// `VerifiedIntent`'s audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionFactor {
    pub factor_name: FactorName,
    /// In [-1, 1]. For multiplicative penalties this is the net change in
    /// score the multiplication produced, not the multiplier itself.
    pub delta: f32,
    pub influence: Influence,
}

impl ResolutionFactor {
    pub fn new(factor_name: FactorName, delta: f32, influence: Influence) -> Self {
        Self {
            factor_name,
            delta,
            influence,
        }
    }
}
