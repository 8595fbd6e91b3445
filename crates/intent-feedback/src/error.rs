use thiserror::Error;

/// The two error kinds `submit()` surfaces to callers. Everything else —
/// an unrecognised `user_correction` on a successful lookup, a pending-cache
/// miss — is routed internally and reflected only in the receipt's `action`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedbackError {
    #[error("invalid feedback: {0}")]
    InvalidFeedback(String),
    #[error("feedback submission exceeded its deadline")]
    DeadlineExceeded,
}
