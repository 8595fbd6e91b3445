//! Static intent catalogue (C1).
//!
//! Loaded once from a JSON document, then held immutable for the service's
//! lifetime. Concurrent readers need no synchronisation: a `Corpus` never
//! changes after `Corpus::load` returns, so callers share it behind a plain
//! `Arc` (see `intent-resolver`), the same way a parsed canonical config is
//! shared read-only once loaded.

mod error;

pub use error::CorpusError;

use std::collections::HashMap;

use intent_embed::{Embedder, Embedding};
use intent_types::Intent;

/// The loaded, validated corpus plus each intent's pre-computed example
/// embeddings (one embedding per example phrase, in declaration order).
///
/// Embedding once at load time — rather than on every Stage-1 query — keeps
/// `resolve()` on the hot path doing only a similarity scan, mirroring the
/// teacher's pattern of quantizing/embedding at insert and searching many
/// times against the materialised result.
pub struct Corpus {
    intents: Vec<Intent>,
    index_by_id: HashMap<String, usize>,
    example_embeddings: Vec<Vec<Embedding>>,
}

impl Corpus {
    /// Parse, validate, and pre-embed a corpus JSON document.
    pub fn load(json: &str, embedder: &Embedder) -> Result<Self, CorpusError> {
        let intents: Vec<Intent> =
            serde_json::from_str(json).map_err(|e| CorpusError::MalformedJson(e.to_string()))?;
        Self::from_intents(intents, embedder)
    }

    /// Build a corpus from already-parsed intents (used directly by tests
    /// and by callers that source intents from somewhere other than a JSON
    /// file on disk).
    pub fn from_intents(intents: Vec<Intent>, embedder: &Embedder) -> Result<Self, CorpusError> {
        let mut index_by_id = HashMap::with_capacity(intents.len());
        for (idx, intent) in intents.iter().enumerate() {
            intent
                .validate_shape()
                .map_err(|_| CorpusError::EmptyExamples(intent.id.clone()))?;
            if index_by_id.insert(intent.id.clone(), idx).is_some() {
                return Err(CorpusError::DuplicateIntentId(intent.id.clone()));
            }
        }

        for intent in &intents {
            for referenced in &intent.associated_intents {
                if !index_by_id.contains_key(referenced) {
                    return Err(CorpusError::UnknownAssociatedIntent {
                        intent: intent.id.clone(),
                        referenced: referenced.clone(),
                    });
                }
            }
        }

        let example_embeddings = intents
            .iter()
            .map(|intent| intent.examples.iter().map(|ex| embedder.embed(ex)).collect())
            .collect();

        Ok(Self {
            intents,
            index_by_id,
            example_embeddings,
        })
    }

    pub fn all(&self) -> &[Intent] {
        &self.intents
    }

    pub fn by_id(&self, id: &str) -> Result<&Intent, CorpusError> {
        self.index_by_id
            .get(id)
            .map(|&idx| &self.intents[idx])
            .ok_or_else(|| CorpusError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    /// The pre-computed example embeddings for `id`, in declaration order.
    pub fn example_embeddings(&self, id: &str) -> Option<&[Embedding]> {
        self.index_by_id
            .get(id)
            .map(|&idx| self.example_embeddings[idx].as_slice())
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
