//! The persistent singleton `LearningStats` counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Live accuracy counters. `correct + incorrect == total` is an invariant
/// maintained by every mutator; `record_correct`/`record_incorrect` are the
/// only ways to advance the counters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LearningStats {
    pub total_feedbacks: u64,
    pub correct_feedbacks: u64,
    pub incorrect_feedbacks: u64,
    pub last_update: Option<DateTime<Utc>>,
}

impl LearningStats {
    pub fn record_correct(&mut self, now: DateTime<Utc>) {
        self.total_feedbacks += 1;
        self.correct_feedbacks += 1;
        self.last_update = Some(now);
    }

    pub fn record_incorrect(&mut self, now: DateTime<Utc>) {
        self.total_feedbacks += 1;
        self.incorrect_feedbacks += 1;
        self.last_update = Some(now);
    }

    /// `correct + incorrect == total`. Checked in tests and debug assertions
    /// rather than on every read, since the invariant is maintained solely
    /// by this type's two mutators.
    pub fn is_consistent(&self) -> bool {
        self.correct_feedbacks + self.incorrect_feedbacks == self.total_feedbacks
    }
}
