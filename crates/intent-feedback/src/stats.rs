//! Thread-safe wrapper over `LearningStats`, updated atomically. A single
//! lock guards the whole counter set so a reader never observes a torn
//! `correct + incorrect != total` state.

use std::sync::RwLock;

use chrono::Utc;
use intent_types::LearningStats;

#[derive(Default)]
pub struct SharedLearningStats {
    inner: RwLock<LearningStats>,
}

impl SharedLearningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_correct(&self) -> LearningStats {
        let mut guard = self.inner.write().expect("learning stats lock poisoned");
        guard.record_correct(Utc::now());
        *guard
    }

    pub fn record_incorrect(&self) -> LearningStats {
        let mut guard = self.inner.write().expect("learning stats lock poisoned");
        guard.record_incorrect(Utc::now());
        *guard
    }

    pub fn snapshot(&self) -> LearningStats {
        *self.inner.read().expect("learning stats lock poisoned")
    }
}
