use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("failed to persist golden record: {0}")]
    PersistenceWrite(String),
    #[error("failed to replay persisted golden records: {0}")]
    PersistenceRead(String),
    /// The embedder model identity recorded alongside a persisted golden-record
    /// stream does not match the embedder the service is starting with (spec
    /// §4.7 "Invalidation"). Raised only under `ModelMismatchPolicy::FailFast`;
    /// under `Clear` the mismatch is logged and the stream is discarded instead.
    #[error("persisted memory was embedded with model '{persisted}', service is running '{current}'")]
    ModelMismatch { persisted: String, current: String },
}
