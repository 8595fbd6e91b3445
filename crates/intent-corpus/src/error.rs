use thiserror::Error;

/// Failures raised while loading or querying the intent corpus.
///
/// `Malformed*` variants are fatal at startup: a malformed corpus means the
/// service never begins serving traffic. `NotFound` is a normal, recoverable
/// outcome of `Corpus::by_id`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorpusError {
    #[error("corpus file is not valid JSON: {0}")]
    MalformedJson(String),
    #[error("duplicate intent id '{0}' in corpus")]
    DuplicateIntentId(String),
    #[error("intent '{0}' declares no example phrases")]
    EmptyExamples(String),
    #[error("intent '{intent}' references unknown associated intent '{referenced}'")]
    UnknownAssociatedIntent { intent: String, referenced: String },
    #[error("no intent with id '{0}'")]
    NotFound(String),
}
