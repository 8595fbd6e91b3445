//! Shared data model for the intent resolution engine.
//!
//! This crate holds only types and their structural validation — no
//! business logic. `Intent` and `ContextSnapshot` are consumed by every
//! downstream crate; the transient (`SemanticCandidate`, `ResolutionFactor`,
//! `VerifiedIntent`) and persistent (`GoldenRecord`, `ReviewItem`,
//! `LearningStats`) records round out the data that flows between pipeline
//! stages (see the root `SPEC_FULL.md` §3).

mod candidate;
mod context;
mod factor;
mod intent;
mod memory_record;
mod pending;
mod review;
mod stats;
mod verified;

pub use candidate::{CandidateSource, SemanticCandidate};
pub use context::{ContextSnapshot, InvalidContext};
pub use factor::{FactorName, Influence, ResolutionFactor};
pub use intent::{Intent, TimeWindow};
pub use memory_record::GoldenRecord;
pub use pending::PendingResolution;
pub use review::{ReviewItem, ReviewStatus};
pub use stats::LearningStats;
pub use verified::{VerifiedIntent, FALLBACK_INTENT_ID};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_validate_rejects_out_of_range_semantic_capacity() {
        let ctx = ContextSnapshot {
            semantic_capacity: Some(1.5),
            ..Default::default()
        };
        assert_eq!(
            ctx.validate(),
            Err(InvalidContext::SemanticCapacityOutOfRange(1.5))
        );
    }

    #[test]
    fn context_validate_accepts_absent_fields() {
        let ctx = ContextSnapshot::default();
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn learning_stats_stays_consistent() {
        let mut stats = LearningStats::default();
        let now = chrono::Utc::now();
        stats.record_correct(now);
        stats.record_incorrect(now);
        assert!(stats.is_consistent());
        assert_eq!(stats.total_feedbacks, 2);
    }

    #[test]
    fn time_window_wraps_midnight() {
        let w = TimeWindow::new(22, 6);
        assert!(w.contains_hour(23));
        assert!(w.contains_hour(2));
        assert!(!w.contains_hour(12));
    }

    #[test]
    fn intent_requires_at_least_one_example() {
        let intent = Intent {
            id: "x".into(),
            pure_text: "x".into(),
            examples: vec![],
            required_location: None,
            helpful_location: None,
            required_purpose: None,
            required_situation: None,
            associated_intents: Default::default(),
            forbidden_when_conflicts: Default::default(),
            preferred_linguistic_indicator: None,
            valid_time_window: None,
            required_user_profile: None,
            preferred_user_profiles: Default::default(),
            preferred_prosodic_feature: None,
        };
        assert!(intent.validate_shape().is_err());
    }
}
