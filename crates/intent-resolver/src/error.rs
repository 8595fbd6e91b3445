use intent_types::InvalidContext;
use thiserror::Error;

/// The only two error kinds the resolver surfaces to callers. Everything
/// else — a missing corpus entry referenced by a memory hit, for instance —
/// is handled internally by skipping the offending candidate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolverError {
    #[error("invalid context: {0}")]
    InvalidContext(#[from] InvalidContext),
    #[error("resolution exceeded its deadline")]
    DeadlineExceeded,
}
