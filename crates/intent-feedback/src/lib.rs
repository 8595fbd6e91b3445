//! The Feedback Manager (C7): validates a feedback message, routes it to
//! Fast Memory or the Review Queue, and keeps live accuracy counters.
//!
//! `submit()`'s branching composes small, independently-lockable pieces of
//! shared state (`pending`/`memory`/`queue`/`stats`) via one orchestrating
//! call rather than a single monolithic mutex.

mod error;
mod pending;
mod queue;
mod stats;

pub use error::FeedbackError;
pub use pending::{PendingCache, PendingCacheConfig};
pub use queue::{JsonLinesQueueBackend, NullQueueBackend, QueueBackend, ReviewQueue};
pub use stats::SharedLearningStats;

use intent_corpus::Corpus;
use intent_memory::FastMemory;
use intent_types::{GoldenRecord, LearningStats, ReviewItem, ReviewStatus};
use uuid::Uuid;

/// What `submit()` actually did with the feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    /// Reinforced: a `GoldenRecord` was written to Fast Memory.
    LoggedForLearning,
    /// Queued: a `ReviewItem` was appended for human adjudication.
    QueuedForReview,
    /// Positive feedback, but the `request_id` was unknown or
    /// `user_correction` did not match a known intent: stats updated, no
    /// memory write.
    LoggedWithoutMemory,
}

impl FeedbackAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackAction::LoggedForLearning => "logged_for_learning",
            FeedbackAction::QueuedForReview => "queued_for_review",
            FeedbackAction::LoggedWithoutMemory => "logged_without_memory",
        }
    }
}

/// `submit()`'s return value: what happened, plus the stats snapshot taken
/// atomically with that same update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackReceipt {
    pub action: FeedbackAction,
    pub stats_snapshot: LearningStats,
}

/// Optional richer feedback fields a legacy endpoint shape accepted.
/// Preserved into `ReviewItem.notes` when present; never change routing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackExtras {
    pub correct_intent: Option<String>,
    pub notes: Option<String>,
}

pub struct FeedbackManager<'a> {
    pub corpus: &'a Corpus,
    pub memory: &'a FastMemory,
    pub pending: &'a PendingCache,
    pub review_queue: &'a ReviewQueue,
    pub stats: &'a SharedLearningStats,
}

impl<'a> FeedbackManager<'a> {
    /// Validate and route one feedback message.
    pub fn submit(
        &self,
        request_id: Uuid,
        user_correction: &str,
        was_successful: bool,
        extras: FeedbackExtras,
    ) -> Result<FeedbackReceipt, FeedbackError> {
        Self::validate_correction(user_correction)?;

        let action = if was_successful {
            self.reinforce(request_id, user_correction)
        } else {
            self.review(request_id, user_correction, extras);
            FeedbackAction::QueuedForReview
        };

        let stats_snapshot = if was_successful {
            self.stats.record_correct()
        } else {
            self.stats.record_incorrect()
        };

        Ok(FeedbackReceipt { action, stats_snapshot })
    }

    fn validate_correction(user_correction: &str) -> Result<(), FeedbackError> {
        let len = user_correction.chars().count();
        if !(1..=100).contains(&len) {
            return Err(FeedbackError::InvalidFeedback(format!(
                "user_correction must be 1..100 characters, got {len}"
            )));
        }
        Ok(())
    }

    fn reinforce(&self, request_id: Uuid, user_correction: &str) -> FeedbackAction {
        let Some(pending) = self.pending.take(request_id) else {
            tracing::debug!(%request_id, "reinforce: unknown request_id");
            return FeedbackAction::LoggedWithoutMemory;
        };
        if !self.corpus.contains(user_correction) {
            tracing::debug!(%request_id, user_correction, "reinforce: unknown intent");
            return FeedbackAction::LoggedWithoutMemory;
        }

        let record = GoldenRecord {
            record_id: Uuid::new_v4(),
            original_input: pending.normalized_input,
            embedding: pending.embedding,
            resolved_intent_id: user_correction.to_string(),
            confidence_at_time: pending.confidence,
            context_fingerprint: pending.context_fingerprint,
            created_at: pending.created_at,
        };
        if let Err(err) = self.memory.insert(record) {
            tracing::warn!(%request_id, error = %err, "reinforce: failed to persist golden record");
            return FeedbackAction::LoggedWithoutMemory;
        }
        FeedbackAction::LoggedForLearning
    }

    fn review(&self, request_id: Uuid, user_correction: &str, extras: FeedbackExtras) {
        let (original_input, resolved_intent_id) = match self.pending.take(request_id) {
            Some(p) => (p.normalized_input, p.resolved_intent_id),
            None => (String::new(), String::new()),
        };

        let item = ReviewItem {
            item_id: Uuid::new_v4(),
            request_id,
            original_input,
            resolved_intent_id,
            user_correction: user_correction.to_string(),
            confidence_at_time: 0.0,
            created_at: intent_memory::now(),
            status: ReviewStatus::Pending,
            notes: extras.notes.or(extras.correct_intent),
        };
        if let Err(err) = self.review_queue.append(item) {
            tracing::warn!(%request_id, error = %err, "review: failed to persist review item");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intent_embed::{Embedder, EmbedderConfig};
    use intent_memory::EvictionPolicy;
    use intent_types::{Intent, PendingResolution};
    use std::collections::BTreeSet;

    fn corpus() -> Corpus {
        let embedder = Embedder::new(EmbedderConfig::default());
        let intent = Intent {
            id: "transfer_to_account".into(),
            pure_text: "transfer".into(),
            examples: vec!["transfer money".into()],
            required_location: None,
            helpful_location: None,
            required_purpose: None,
            required_situation: None,
            associated_intents: BTreeSet::new(),
            forbidden_when_conflicts: BTreeSet::new(),
            preferred_linguistic_indicator: None,
            valid_time_window: None,
            required_user_profile: None,
            preferred_user_profiles: BTreeSet::new(),
            preferred_prosodic_feature: None,
        };
        Corpus::from_intents(vec![intent], &embedder).unwrap()
    }

    fn pending(request_id: Uuid) -> PendingResolution {
        PendingResolution {
            request_id,
            normalized_input: "transfer 500 to john".into(),
            embedding: vec![0.1, 0.2, 0.3],
            confidence: 0.92,
            context_fingerprint: "loc=_|purpose=_|user=_".into(),
            resolved_intent_id: "transfer_to_account".into(),
            created_at: intent_memory::now(),
        }
    }

    #[test]
    fn successful_feedback_with_known_request_and_intent_reinforces_memory() {
        let corpus = corpus();
        let memory = FastMemory::new(Box::new(intent_memory::NullBackend), EvictionPolicy::Unbounded).unwrap();
        let cache = PendingCache::new(PendingCacheConfig::default());
        let queue = ReviewQueue::in_memory();
        let stats = SharedLearningStats::new();
        let request_id = Uuid::from_u128(1);
        cache.insert(pending(request_id));

        let manager = FeedbackManager {
            corpus: &corpus,
            memory: &memory,
            pending: &cache,
            review_queue: &queue,
            stats: &stats,
        };

        let receipt = manager
            .submit(request_id, "transfer_to_account", true, FeedbackExtras::default())
            .unwrap();

        assert_eq!(receipt.action, FeedbackAction::LoggedForLearning);
        assert_eq!(receipt.stats_snapshot.correct_feedbacks, 1);
        assert_eq!(memory.count(), 1);
    }

    #[test]
    fn unknown_request_id_is_logged_without_memory() {
        let corpus = corpus();
        let memory = FastMemory::in_memory();
        let cache = PendingCache::new(PendingCacheConfig::default());
        let queue = ReviewQueue::in_memory();
        let stats = SharedLearningStats::new();

        let manager = FeedbackManager {
            corpus: &corpus,
            memory: &memory,
            pending: &cache,
            review_queue: &queue,
            stats: &stats,
        };

        let receipt = manager
            .submit(Uuid::from_u128(404), "transfer_to_account", true, FeedbackExtras::default())
            .unwrap();
        assert_eq!(receipt.action, FeedbackAction::LoggedWithoutMemory);
        assert_eq!(memory.count(), 0);
        assert_eq!(receipt.stats_snapshot.total_feedbacks, 1);
    }

    #[test]
    fn unknown_intent_correction_is_logged_without_memory() {
        let corpus = corpus();
        let memory = FastMemory::in_memory();
        let cache = PendingCache::new(PendingCacheConfig::default());
        let queue = ReviewQueue::in_memory();
        let stats = SharedLearningStats::new();
        let request_id = Uuid::from_u128(1);
        cache.insert(pending(request_id));

        let manager = FeedbackManager {
            corpus: &corpus,
            memory: &memory,
            pending: &cache,
            review_queue: &queue,
            stats: &stats,
        };

        let receipt = manager
            .submit(request_id, "not_a_real_intent", true, FeedbackExtras::default())
            .unwrap();
        assert_eq!(receipt.action, FeedbackAction::LoggedWithoutMemory);
        assert_eq!(memory.count(), 0);
    }

    #[test]
    fn negative_feedback_queues_for_review_and_leaves_memory_untouched() {
        let corpus = corpus();
        let memory = FastMemory::in_memory();
        let cache = PendingCache::new(PendingCacheConfig::default());
        let queue = ReviewQueue::in_memory();
        let stats = SharedLearningStats::new();
        let request_id = Uuid::from_u128(1);
        cache.insert(pending(request_id));

        let manager = FeedbackManager {
            corpus: &corpus,
            memory: &memory,
            pending: &cache,
            review_queue: &queue,
            stats: &stats,
        };

        let receipt = manager
            .submit(request_id, "borrow_money", false, FeedbackExtras::default())
            .unwrap();

        assert_eq!(receipt.action, FeedbackAction::QueuedForReview);
        assert_eq!(receipt.stats_snapshot.incorrect_feedbacks, 1);
        assert_eq!(memory.count(), 0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn legacy_extras_are_preserved_in_review_notes_without_altering_routing() {
        let corpus = corpus();
        let memory = FastMemory::in_memory();
        let cache = PendingCache::new(PendingCacheConfig::default());
        let queue = ReviewQueue::in_memory();
        let stats = SharedLearningStats::new();
        let request_id = Uuid::from_u128(1);
        cache.insert(pending(request_id));

        let manager = FeedbackManager {
            corpus: &corpus,
            memory: &memory,
            pending: &cache,
            review_queue: &queue,
            stats: &stats,
        };

        let extras = FeedbackExtras {
            correct_intent: Some("transfer_to_account".into()),
            notes: Some("customer says this was wrong".into()),
        };
        let receipt = manager
            .submit(request_id, "borrow_money", false, extras)
            .unwrap();
        assert_eq!(receipt.action, FeedbackAction::QueuedForReview);
        let pending_items = queue.list_pending();
        assert_eq!(pending_items[0].notes.as_deref(), Some("customer says this was wrong"));
    }

    #[test]
    fn correction_outside_length_bounds_is_rejected() {
        let corpus = corpus();
        let memory = FastMemory::in_memory();
        let cache = PendingCache::new(PendingCacheConfig::default());
        let queue = ReviewQueue::in_memory();
        let stats = SharedLearningStats::new();

        let manager = FeedbackManager {
            corpus: &corpus,
            memory: &memory,
            pending: &cache,
            review_queue: &queue,
            stats: &stats,
        };

        let err = manager
            .submit(Uuid::from_u128(1), "", true, FeedbackExtras::default())
            .unwrap_err();
        assert!(matches!(err, FeedbackError::InvalidFeedback(_)));
    }
}
