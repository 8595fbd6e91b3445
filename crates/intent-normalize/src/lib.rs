//! Input normalisation (C2): lowercasing, punctuation stripping, whitespace
//! collapsing, slang expansion, and input-fidelity scoring.
//!
//! `normalise` is a pure function: identical input always yields an
//! identical `(text, fidelity)` pair, for a fixed [`SlangMap`].

mod slang;

pub use slang::SlangMap;

/// Reserved for future normalisation failure modes. `normalise` is a pure,
/// infallible function, so this type is currently uninhabited — kept only
/// so this crate has the same per-crate-typed-error shape as every other
/// stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {}

/// Lowercase, collapse whitespace, strip punctuation except apostrophes,
/// then apply token-level slang substitution. Returns the normalised text
/// and an input-fidelity score in `[0, 1]`.
///
/// `fidelity = clamp(1 - (substitutions / tokens) * 0.5, 0, 1)`. An empty
/// token stream (e.g. punctuation-only input) has nothing to substitute, so
/// fidelity is `1.0`.
pub fn normalise(raw: &str, slang: &SlangMap) -> (String, f32) {
    let lowered = raw.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation() || *c == '\'')
        .collect();

    let tokens: Vec<&str> = stripped.split_whitespace().collect();
    let mut substitutions = 0usize;
    let mut out_tokens: Vec<String> = Vec::with_capacity(tokens.len());
    for tok in &tokens {
        match slang.canonical_for(tok) {
            Some(canonical) => {
                substitutions += 1;
                out_tokens.push(canonical.to_string());
            }
            None => out_tokens.push(tok.to_string()),
        }
    }

    let text = out_tokens.join(" ");
    let fidelity = if tokens.is_empty() {
        1.0
    } else {
        (1.0 - (substitutions as f32 / tokens.len() as f32) * 0.5).clamp(0.0, 1.0)
    };

    (text, fidelity)
}
