//! The Context Resolution Matrix (C5): a pure function of
//! `(candidate, intent, context)` that applies the 12 weighted factors in
//! their fixed order, short-circuiting on the first hard-stop.
//!
//! Factors are a closed enumeration — each is a match arm over
//! `FactorName::ORDER`, not a trait object, so adding or reordering a
//! factor is a compile-time-checked change rather than a runtime
//! registration.

mod weights;

pub use weights::CrmWeights;

use chrono::Timelike;
use intent_types::{ContextSnapshot, FactorName, Influence, Intent, ResolutionFactor, SemanticCandidate};

/// CRM configuration. Currently just the weight table, but kept as its own
/// type so a deployment can swap weights without touching call sites.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrmConfig {
    pub weights: CrmWeights,
}

/// The result of scoring one candidate against one intent and context.
#[derive(Debug, Clone, PartialEq)]
pub struct CrmOutcome {
    pub adjusted_score: f32,
    pub factors: Vec<ResolutionFactor>,
    pub hard_stop: bool,
}

/// Reserved for future CRM failure modes. CRM is a pure function of
/// already-validated inputs and never fails, so this type is uninhabited;
/// kept only for the same per-crate-typed-error shape every other stage
/// has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CrmError {}

/// Evaluate the 12-factor matrix for a single candidate.
pub fn score(candidate: &SemanticCandidate, intent: &Intent, context: &ContextSnapshot, config: &CrmConfig) -> CrmOutcome {
    let w = &config.weights;
    let mut running = candidate.base_score;
    let mut factors = Vec::with_capacity(4);

    // 1. association_history (boost)
    {
        let intent_in_history = context.association_history.iter().any(|id| id == &intent.id);
        let associated_in_history = intent
            .associated_intents
            .iter()
            .any(|assoc| context.association_history.contains(assoc));
        if intent_in_history || associated_in_history {
            running += w.association_history_boost;
            factors.push(ResolutionFactor::new(
                FactorName::AssociationHistory,
                w.association_history_boost,
                Influence::Boost,
            ));
        }
    }

    // 2. conflict_markers (hard-stop)
    {
        let conflict = context
            .conflict_markers
            .intersection(&intent.forbidden_when_conflicts)
            .next()
            .is_some();
        if conflict {
            factors.push(ResolutionFactor::new(FactorName::ConflictMarkers, -1.0, Influence::HardStop));
            return finalize(0.0, factors, true);
        }
    }

    // 3. goal_alignment (boost)
    {
        if matches(&intent.required_purpose, &context.goal_alignment) {
            running += w.goal_alignment_boost;
            factors.push(ResolutionFactor::new(
                FactorName::GoalAlignment,
                w.goal_alignment_boost,
                Influence::Boost,
            ));
        }
    }

    // 4. situation_context (boost)
    {
        if matches(&intent.required_situation, &context.situation_context) {
            running += w.situation_context_boost;
            factors.push(ResolutionFactor::new(
                FactorName::SituationContext,
                w.situation_context_boost,
                Influence::Boost,
            ));
        }
    }

    // 5. linguistic_indicators (boost)
    {
        if matches(&intent.preferred_linguistic_indicator, &context.linguistic_indicators) {
            running += w.linguistic_indicators_boost;
            factors.push(ResolutionFactor::new(
                FactorName::LinguisticIndicators,
                w.linguistic_indicators_boost,
                Influence::Boost,
            ));
        }
    }

    // 6. semantic_capacity (boost)
    {
        if let Some(capacity) = context.semantic_capacity {
            let delta = w.semantic_capacity_boost * capacity;
            if delta != 0.0 {
                running += delta;
                factors.push(ResolutionFactor::new(FactorName::SemanticCapacity, delta, Influence::Boost));
            }
        }
    }

    // 7. social_propriety (penalty)
    {
        if let Some(propriety) = context.social_propriety {
            if propriety < 0.0 {
                let multiplier = (1.0 + propriety).max(w.social_propriety_floor);
                let before = running;
                running *= multiplier;
                let delta = (running - before).clamp(-1.0, 1.0);
                factors.push(ResolutionFactor::new(FactorName::SocialPropriety, delta, Influence::Penalty));
            }
        }
    }

    // 8. location_context (hard-stop + boost)
    {
        if let Some(required) = &intent.required_location {
            if context.location_context.as_deref() != Some(required.as_str()) {
                factors.push(ResolutionFactor::new(FactorName::LocationContext, -1.0, Influence::HardStop));
                return finalize(0.0, factors, true);
            }
        } else if matches(&intent.helpful_location, &context.location_context) {
            running += w.location_context_boost;
            factors.push(ResolutionFactor::new(
                FactorName::LocationContext,
                w.location_context_boost,
                Influence::Boost,
            ));
        }
    }

    // 9. temporal_context (boost)
    {
        if let (Some(window), Some(ts)) = (&intent.valid_time_window, context.temporal_context) {
            if window.contains_hour(ts.hour() as u8) {
                running += w.temporal_context_boost;
                factors.push(ResolutionFactor::new(
                    FactorName::TemporalContext,
                    w.temporal_context_boost,
                    Influence::Boost,
                ));
            }
        }
    }

    // 10. user_profile (hard-stop + boost)
    {
        if let Some(required) = &intent.required_user_profile {
            if context.user_profile.as_deref() != Some(required.as_str()) {
                factors.push(ResolutionFactor::new(FactorName::UserProfile, -1.0, Influence::HardStop));
                return finalize(0.0, factors, true);
            }
        } else if let Some(profile) = &context.user_profile {
            if intent.preferred_user_profiles.contains(profile) {
                running += w.user_profile_boost;
                factors.push(ResolutionFactor::new(FactorName::UserProfile, w.user_profile_boost, Influence::Boost));
            }
        }
    }

    // 11. prosodic_features (boost)
    {
        if matches(&intent.preferred_prosodic_feature, &context.prosodic_features) {
            running += w.prosodic_features_boost;
            factors.push(ResolutionFactor::new(
                FactorName::ProsodicFeatures,
                w.prosodic_features_boost,
                Influence::Boost,
            ));
        }
    }

    // 12. input_fidelity (penalty)
    {
        if let Some(fidelity) = context.input_fidelity {
            if fidelity < 1.0 {
                let before = running;
                running *= 0.5 + 0.5 * fidelity;
                let delta = (running - before).clamp(-1.0, 1.0);
                factors.push(ResolutionFactor::new(FactorName::InputFidelity, delta, Influence::Penalty));
            }
        }
    }

    finalize(running.clamp(0.0, 1.0), factors, false)
}

fn matches(intent_field: &Option<String>, context_field: &Option<String>) -> bool {
    match (intent_field, context_field) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn finalize(adjusted_score: f32, mut factors: Vec<ResolutionFactor>, hard_stop: bool) -> CrmOutcome {
    factors.sort_by(|a, b| {
        let hard_stop_rank = |f: &ResolutionFactor| matches!(f.influence, Influence::HardStop);
        hard_stop_rank(b)
            .cmp(&hard_stop_rank(a))
            .then_with(|| b.delta.abs().partial_cmp(&a.delta.abs()).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| a.factor_name.canonical_rank().cmp(&b.factor_name.canonical_rank()))
    });
    CrmOutcome {
        adjusted_score,
        factors,
        hard_stop,
    }
}
