use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Upstream source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Upstream source timed out: {0}")]
    SourceTimeout(String),

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("Upstream returned HTTP {status}: {source_name}")]
    UpstreamStatus { source_name: String, status: u16 },

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Task failed: {0}")]
    TaskFailed(String),
}
