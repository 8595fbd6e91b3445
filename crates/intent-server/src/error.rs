use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Wraps every sub-crate error into one response surface, mirroring the
/// teacher's `server::error::ServerError` — one `#[from]` arm per pipeline
/// stage, one status/code mapping in `status_code`/`error_code`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid context: {0}")]
    Context(#[from] intent_types::InvalidContext),

    #[error("resolver error: {0}")]
    Resolver(#[from] intent_resolver::ResolverError),

    #[error("feedback error: {0}")]
    Feedback(#[from] intent_feedback::FeedbackError),

    #[error("corpus error: {0}")]
    Corpus(#[from] intent_corpus::CorpusError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("not ready: {0}")]
    NotReady(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Context(_) => StatusCode::BAD_REQUEST,
            ServerError::Resolver(intent_resolver::ResolverError::InvalidContext(_)) => StatusCode::BAD_REQUEST,
            ServerError::Resolver(intent_resolver::ResolverError::DeadlineExceeded) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::Feedback(intent_feedback::FeedbackError::InvalidFeedback(_)) => StatusCode::BAD_REQUEST,
            ServerError::Feedback(intent_feedback::FeedbackError::DeadlineExceeded) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::Corpus(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Config(_) | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ServerError::Context(_) => "INVALID_CONTEXT",
            ServerError::Resolver(_) => "RESOLVER_ERROR",
            ServerError::Feedback(_) => "FEEDBACK_ERROR",
            ServerError::Corpus(_) => "CORPUS_ERROR",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::NotFound(_) => "NOT_FOUND",
            ServerError::NotReady(_) => "NOT_READY",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));
        (status, body).into_response()
    }
}
