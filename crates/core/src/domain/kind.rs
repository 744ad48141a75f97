// Error Kind - construction presets of the taxonomy

use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_ROUTE_STATUS, SERVER_ERROR_STATUS};
use super::level::Level;

/// Tag naming which preset built a [`ReportableError`](super::ReportableError).
///
/// Every preset is "base shape + forced level + extra data fields"; the tag
/// only records which of those rules applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Plain error, no forced level
    Base,
    /// Always reported at `warn`
    Warning,
    /// Always reported at `critical`
    Critical,
    /// Worker/task failure carrying `data.queue` and `data.job`
    Worker,
    /// Worker failure that is unrecoverable for its job
    WorkerStop,
    /// Worker failure reported at `warn`
    WorkerWarning,
    /// Worker stop caused by a malformed job
    InvalidJob,
    /// HTTP route failure; level derived from the status code
    Route,
}

impl ErrorKind {
    /// Level this kind imposes at construction, overriding caller hints
    pub fn forced_level(self, status_code: Option<u16>) -> Option<Level> {
        match self {
            ErrorKind::Warning | ErrorKind::WorkerWarning => Some(Level::Warn),
            ErrorKind::Critical => Some(Level::Critical),
            ErrorKind::Route => {
                let status = status_code.unwrap_or(DEFAULT_ROUTE_STATUS);
                if status >= SERVER_ERROR_STATUS {
                    Some(Level::Error)
                } else {
                    Some(Level::Warn)
                }
            }
            ErrorKind::Base
            | ErrorKind::Worker
            | ErrorKind::WorkerStop
            | ErrorKind::InvalidJob => None,
        }
    }

    /// Whether errors of this kind carry queue/job context
    pub fn is_worker(self) -> bool {
        matches!(
            self,
            ErrorKind::Worker | ErrorKind::WorkerStop | ErrorKind::WorkerWarning | ErrorKind::InvalidJob
        )
    }

    /// Whether the job that raised this error should not be retried
    pub fn is_unrecoverable(self) -> bool {
        matches!(self, ErrorKind::WorkerStop | ErrorKind::InvalidJob)
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Base => "BaseError",
            ErrorKind::Warning => "Warning",
            ErrorKind::Critical => "CriticalError",
            ErrorKind::Worker => "WorkerError",
            ErrorKind::WorkerStop => "WorkerStopError",
            ErrorKind::WorkerWarning => "WorkerWarning",
            ErrorKind::InvalidJob => "InvalidJobError",
            ErrorKind::Route => "RouteError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
