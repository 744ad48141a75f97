// Central Error Type for reporting

use thiserror::Error;

/// Failure of a single report attempt.
///
/// Never raised for skipped reports (opt-out, below threshold, sink
/// unavailable); those complete with `Ok(())`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Sink error: {0}")]
    Sink(#[from] crate::port::SinkError),

    #[error("Report task failed: {0}")]
    Task(String),
}

/// Result type alias using ReportError
pub type Result<T> = std::result::Result<T, ReportError>;

impl From<tokio::task::JoinError> for ReportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ReportError::Task(err.to_string())
    }
}
