//! The Hybrid Resolver (C6): Stage-1 semantic retrieval over the corpus and
//! Fast Memory, Stage-2 Context Resolution Matrix validation, selection,
//! and fallback.
//!
//! Orchestration shape: validate inputs, run sub-pipeline stages in
//! sequence while timing the call, merge/rank candidate hits, return a
//! single typed result.

mod config;
mod error;
mod request_id;

pub use config::ResolverConfig;
pub use error::ResolverError;
pub use request_id::{RandomRequestIds, RequestIdSource, SeededRequestIds};

use std::collections::HashMap;
use std::time::{Duration, Instant};

use intent_corpus::Corpus;
use intent_crm::{self as crm, CrmConfig};
use intent_embed::{cosine_similarity, Embedder};
use intent_memory::FastMemory;
use intent_normalize::{normalise, SlangMap};
use intent_types::{
    CandidateSource, ContextSnapshot, FactorName, Influence, PendingResolution, ResolutionFactor,
    SemanticCandidate, VerifiedIntent, FALLBACK_INTENT_ID,
};

/// Everything a single `resolve()` call needs, borrowed for the duration of
/// the call. None of these are mutated: the resolver reads a consistent
/// Stage-1 snapshot of Fast Memory and never writes to it — writes only
/// happen via the feedback path.
pub struct Resolver<'a> {
    pub corpus: &'a Corpus,
    pub memory: &'a FastMemory,
    pub embedder: &'a Embedder,
    pub slang: &'a SlangMap,
    pub crm_config: CrmConfig,
    pub resolver_config: ResolverConfig,
    pub request_ids: &'a dyn RequestIdSource,
}

/// `resolve()`'s full result: the caller-facing `VerifiedIntent` plus the
/// bookkeeping a later `submit()` feedback call would need.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOutcome {
    pub verified: VerifiedIntent,
    pub pending: PendingResolution,
}

impl<'a> Resolver<'a> {
    /// Resolve `raw_input` against `context`, with no deadline.
    pub fn resolve(&self, raw_input: &str, context: ContextSnapshot) -> Result<ResolveOutcome, ResolverError> {
        context.validate()?;

        let (normalized, computed_fidelity) = normalise(raw_input, self.slang);
        let mut effective_context = context;
        if effective_context.input_fidelity.is_none() {
            effective_context.input_fidelity = Some(computed_fidelity);
        }

        let embedding = self.embedder.embed(&normalized);

        let candidates = self.stage1(&embedding);
        let (survivors, all_scores) = self.stage2(&candidates, &effective_context);

        let now = intent_memory::now();
        let request_id = self.request_ids.next_id();

        let verified = match self.select(survivors) {
            Some((intent_id, adjusted_score, active_factors, alternatives)) => VerifiedIntent {
                intent_id,
                confidence: adjusted_score,
                stage1_candidates: candidates,
                stage2_passed: true,
                active_factors,
                factor_deltas: all_scores,
                alternatives,
                fallback_used: false,
                request_id,
            },
            None => self.fallback(candidates, all_scores, request_id, "no_candidates_survived"),
        };

        let pending = PendingResolution {
            request_id,
            normalized_input: normalized,
            embedding,
            confidence: verified.confidence,
            context_fingerprint: effective_context.fingerprint(),
            resolved_intent_id: verified.intent_id.clone(),
            created_at: now,
        };

        Ok(ResolveOutcome { verified, pending })
    }

    /// As `resolve`, but bounded by `deadline` measured from `start`. The
    /// resolver performs no I/O, so on expiry there is nothing to roll
    /// back — `DeadlineExceeded` is returned with no state touched.
    pub fn resolve_with_deadline(
        &self,
        raw_input: &str,
        context: ContextSnapshot,
        start: Instant,
        deadline: Duration,
    ) -> Result<ResolveOutcome, ResolverError> {
        let outcome = self.resolve(raw_input, context)?;
        if start.elapsed() > deadline {
            return Err(ResolverError::DeadlineExceeded);
        }
        Ok(outcome)
    }

    /// Stage 1: per-intent max cosine similarity over corpus examples,
    /// boosted by Fast Memory hits, top-`k_stage1` retained.
    fn stage1(&self, embedding: &[f32]) -> Vec<SemanticCandidate> {
        let mut base_scores: HashMap<String, f32> = HashMap::new();

        for intent in self.corpus.all() {
            let examples = self.corpus.example_embeddings(&intent.id).unwrap_or_default();
            let best = examples
                .iter()
                .map(|ex| cosine_similarity(ex, embedding))
                .fold(0.0f32, f32::max);
            base_scores.insert(intent.id.clone(), best);
        }

        let memory_hits = self.memory.query(embedding, self.resolver_config.k_mem);
        for (record, similarity) in memory_hits {
            if !self.corpus.contains(&record.resolved_intent_id) {
                continue; // unknown intent referenced by a memory hit: skip it.
            }
            let boost = self.resolver_config.alpha * similarity;
            base_scores
                .entry(record.resolved_intent_id)
                .and_modify(|s| *s += boost)
                .or_insert(boost);
        }

        let mut ranked: Vec<(String, f32)> = base_scores.into_iter().collect();
        ranked.sort_by(|(id_a, score_a), (id_b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| id_a.cmp(id_b))
        });
        ranked.truncate(self.resolver_config.k_stage1);

        ranked
            .into_iter()
            .map(|(intent_id, base_score)| SemanticCandidate {
                intent_id,
                base_score,
                source: CandidateSource::Corpus,
            })
            .collect()
    }

    /// Stage 2: CRM validation of every Stage-1 candidate. Returns the
    /// surviving `(intent_id, adjusted_score, factors)` triples plus a map
    /// of every candidate's adjusted score (survivors and hard-stopped
    /// alike), used for the audit trail's `all_scores`.
    #[allow(clippy::type_complexity)]
    fn stage2(
        &self,
        candidates: &[SemanticCandidate],
        context: &ContextSnapshot,
    ) -> (Vec<(String, f32, Vec<ResolutionFactor>)>, std::collections::BTreeMap<FactorName, f32>) {
        let mut survivors = Vec::new();
        let mut all_scores = std::collections::BTreeMap::new();

        for candidate in candidates {
            let Ok(intent) = self.corpus.by_id(&candidate.intent_id) else {
                continue; // corpus changed shape between stage1 lookup and here: skip defensively.
            };
            let outcome = crm::score(candidate, intent, context, &self.crm_config);
            for factor in &outcome.factors {
                all_scores
                    .entry(factor.factor_name)
                    .and_modify(|d: &mut f32| *d += factor.delta)
                    .or_insert(factor.delta);
            }
            if outcome.hard_stop {
                continue;
            }
            survivors.push((candidate.intent_id.clone(), outcome.adjusted_score, outcome.factors));
        }

        (survivors, all_scores)
    }

    /// Selection: max `adjusted_score`; ties broken by (a) more active
    /// factors, then (b) intent_id lexicographic order. Falls back when no
    /// survivor clears `theta`.
    #[allow(clippy::type_complexity)]
    fn select(
        &self,
        mut survivors: Vec<(String, f32, Vec<ResolutionFactor>)>,
    ) -> Option<(String, f32, Vec<ResolutionFactor>, std::collections::BTreeMap<String, f32>)> {
        if survivors.is_empty() {
            return None;
        }
        survivors.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.2.len().cmp(&a.2.len()))
                .then_with(|| a.0.cmp(&b.0))
        });
        let mut remaining = survivors.into_iter();
        let (intent_id, adjusted_score, factors) = remaining.next()?;
        if adjusted_score < self.resolver_config.theta {
            return None;
        }
        let alternatives = remaining.map(|(id, score, _)| (id, score)).collect();
        Some((intent_id, adjusted_score, factors, alternatives))
    }

    fn fallback(
        &self,
        stage1_candidates: Vec<SemanticCandidate>,
        all_scores: std::collections::BTreeMap<FactorName, f32>,
        request_id: uuid::Uuid,
        reason: &'static str,
    ) -> VerifiedIntent {
        tracing::debug!(reason, "resolution fell back to the uncertain intent");
        VerifiedIntent {
            intent_id: FALLBACK_INTENT_ID.to_string(),
            confidence: 0.0,
            stage1_candidates,
            stage2_passed: false,
            active_factors: vec![ResolutionFactor::new(FactorName::Fallback, 0.0, Influence::Penalty)],
            factor_deltas: all_scores,
            alternatives: std::collections::BTreeMap::new(),
            fallback_used: true,
            request_id,
        }
    }
}
