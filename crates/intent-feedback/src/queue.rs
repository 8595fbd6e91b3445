//! The Review Queue (C8): an append-only, durable-before-return sequence of
//! `ReviewItem`s plus in-memory lookup for `mark_reviewed`.
//!
//! Persistence shape mirrors `intent_memory::JsonLinesBackend`: one JSON
//! object per line, `fsync`'d before `append` returns, replayed in full at
//! startup.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use intent_types::{ReviewItem, ReviewStatus};
use uuid::Uuid;

use crate::error::FeedbackError;

/// Durable backing store for the Review Queue. Kept as a trait (same shape
/// as `intent_memory::MemoryBackend`) so tests can use a null backend
/// without touching disk.
pub trait QueueBackend: Send + Sync {
    fn append(&self, item: &ReviewItem) -> Result<(), FeedbackError>;
    fn load_all(&self) -> Result<Vec<ReviewItem>, FeedbackError>;
}

#[derive(Debug, Default)]
pub struct NullQueueBackend;

impl QueueBackend for NullQueueBackend {
    fn append(&self, _item: &ReviewItem) -> Result<(), FeedbackError> {
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<ReviewItem>, FeedbackError> {
        Ok(Vec::new())
    }
}

pub struct JsonLinesQueueBackend {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesQueueBackend {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QueueBackend for JsonLinesQueueBackend {
    fn append(&self, item: &ReviewItem) -> Result<(), FeedbackError> {
        let _guard = self.write_lock.lock().expect("write lock poisoned");
        let line = serde_json::to_string(item)
            .map_err(|e| FeedbackError::InvalidFeedback(format!("serialise review item: {e}")))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| FeedbackError::InvalidFeedback(format!("open review queue: {e}")))?;
        writeln!(file, "{line}")
            .map_err(|e| FeedbackError::InvalidFeedback(format!("write review queue: {e}")))?;
        file.sync_data()
            .map_err(|e| FeedbackError::InvalidFeedback(format!("sync review queue: {e}")))?;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<ReviewItem>, FeedbackError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = std::fs::File::open(&self.path)
            .map_err(|e| FeedbackError::InvalidFeedback(format!("open review queue: {e}")))?;
        let reader = BufReader::new(file);
        let mut items = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| FeedbackError::InvalidFeedback(format!("read review queue: {e}")))?;
            if line.trim().is_empty() {
                continue;
            }
            let item: ReviewItem = serde_json::from_str(&line)
                .map_err(|e| FeedbackError::InvalidFeedback(format!("parse review item: {e}")))?;
            items.push(item);
        }
        Ok(items)
    }
}

/// The in-memory view over the durable review stream. Ordering preserved:
/// `list_pending` returns items in append order.
pub struct ReviewQueue {
    items: RwLock<Vec<ReviewItem>>,
    backend: Box<dyn QueueBackend>,
}

impl ReviewQueue {
    pub fn new(backend: Box<dyn QueueBackend>) -> Result<Self, FeedbackError> {
        let existing = backend.load_all()?;
        Ok(Self {
            items: RwLock::new(existing),
            backend,
        })
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(NullQueueBackend)).expect("NullQueueBackend::load_all is infallible")
    }

    pub fn append(&self, item: ReviewItem) -> Result<(), FeedbackError> {
        self.backend.append(&item)?;
        self.items.write().expect("review queue lock poisoned").push(item);
        Ok(())
    }

    pub fn list_pending(&self) -> Vec<ReviewItem> {
        self.items
            .read()
            .expect("review queue lock poisoned")
            .iter()
            .filter(|item| item.status == ReviewStatus::Pending)
            .cloned()
            .collect()
    }

    pub fn mark_reviewed(&self, item_id: Uuid) -> bool {
        let mut guard = self.items.write().expect("review queue lock poisoned");
        match guard.iter_mut().find(|item| item.item_id == item_id) {
            Some(item) => {
                item.status = ReviewStatus::Reviewed;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().expect("review queue lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(item_id: Uuid) -> ReviewItem {
        ReviewItem {
            item_id,
            request_id: Uuid::from_u128(1),
            original_input: "borrow money from jane".into(),
            resolved_intent_id: "transfer_to_account".into(),
            user_correction: "borrow_money".into(),
            confidence_at_time: 0.4,
            created_at: Utc::now(),
            status: ReviewStatus::Pending,
            notes: None,
        }
    }

    #[test]
    fn append_then_list_pending_preserves_order() {
        let queue = ReviewQueue::in_memory();
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        queue.append(item(a)).unwrap();
        queue.append(item(b)).unwrap();
        let pending = queue.list_pending();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].item_id, a);
        assert_eq!(pending[1].item_id, b);
    }

    #[test]
    fn mark_reviewed_removes_item_from_pending_list() {
        let queue = ReviewQueue::in_memory();
        let id = Uuid::from_u128(1);
        queue.append(item(id)).unwrap();
        assert!(queue.mark_reviewed(id));
        assert!(queue.list_pending().is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn mark_reviewed_on_unknown_id_returns_false() {
        let queue = ReviewQueue::in_memory();
        assert!(!queue.mark_reviewed(Uuid::from_u128(404)));
    }

    #[test]
    fn persists_and_replays_via_json_lines_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.jsonl");
        let id = Uuid::from_u128(1);

        {
            let queue = ReviewQueue::new(Box::new(JsonLinesQueueBackend::new(&path))).unwrap();
            queue.append(item(id)).unwrap();
        }

        let replayed = ReviewQueue::new(Box::new(JsonLinesQueueBackend::new(&path))).unwrap();
        assert_eq!(replayed.len(), 1);
        assert_eq!(replayed.list_pending()[0].item_id, id);
    }
}
