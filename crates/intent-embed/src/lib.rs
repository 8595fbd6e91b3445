//! Deterministic fixed-dimension embedder (C3).
//!
//! The physical choice of embedding model is explicitly out of scope for
//! this engine: what matters is the *contract* — same input, same output,
//! L2-normalised so cosine similarity reduces to a dot product. Production
//! deployments swap [`Embedder`] for a real model-backed implementation;
//! the deterministic hash-projection here is what every other component
//! (and every test in this workspace) is written against.

use fxhash::hash64;

/// A fixed-length, L2-normalised embedding vector.
pub type Embedding = Vec<f32>;

/// Embedder identity and output dimension. Changing either invalidates any
/// persisted `GoldenRecord` embeddings (see `MemoryModelMismatch`).
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedderConfig {
    pub model_id: String,
    pub dim: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_id: "intentd-hash-stub-v1".to_string(),
            dim: 384,
        }
    }
}

/// Deterministic, stateless embedder. Safe to share across threads; holds
/// no mutable state after construction.
#[derive(Debug, Clone)]
pub struct Embedder {
    config: EmbedderConfig,
}

impl Embedder {
    pub fn new(config: EmbedderConfig) -> Self {
        Self { config }
    }

    pub fn model_id(&self) -> &str {
        &self.config.model_id
    }

    pub fn dim(&self) -> usize {
        self.config.dim
    }

    /// Produce a deterministic, L2-normalised embedding for `text`.
    ///
    /// Each dimension is a sinusoid seeded by a 64-bit hash of the input,
    /// rotated per dimension index so the output isn't a constant vector.
    /// This guarantees reproducibility without pulling in a real model —
    /// identical text always yields a bit-identical vector.
    pub fn embed(&self, text: &str) -> Embedding {
        let h = hash64(&text.as_bytes());
        let mut v = vec![0f32; self.config.dim];
        for (idx, value) in v.iter_mut().enumerate() {
            let rotated = h.rotate_left((idx % 64) as u32);
            *value = ((rotated as f64) * 0.000_000_000_01).sin() as f32;
        }
        l2_normalize_in_place(&mut v);
        v
    }
}

/// Normalise `v` to unit L2 norm in place. A zero vector is left unchanged
/// (there is no meaningful direction to normalise to).
pub fn l2_normalize_in_place(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Cosine similarity between two vectors of equal length. For L2-normalised
/// inputs (as every `Embedder::embed` output is) this is exactly their dot
/// product; the general form is kept so callers with externally-sourced
/// vectors (e.g. a real model integration) don't silently get wrong scores.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "cosine_similarity requires equal-length vectors");
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
