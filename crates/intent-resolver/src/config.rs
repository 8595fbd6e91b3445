//! Stage-1/Stage-2 tuning constants. Defaults match the contract values the
//! concrete scenario tests are written against.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Top-K memory hits consulted during Stage-1 candidate generation.
    pub k_mem: usize,
    /// Candidates retained after Stage-1 merge, before Stage-2 validation.
    pub k_stage1: usize,
    /// Memory-boost weight: `base_score += alpha * similarity`.
    pub alpha: f32,
    /// Confidence floor; below this (or with no survivors) the resolver
    /// falls back.
    pub theta: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            k_mem: 5,
            k_stage1: 5,
            alpha: 0.2,
            theta: 0.6,
        }
    }
}
