// Report Sink Port
// Abstraction over the external monitoring service that stores error reports

use crate::application::payload::ReportPayload;
use crate::domain::ReportableError;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Sink errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Sink unavailable: {0}")]
    Unavailable(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Sink rejected report ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Report Sink trait
///
/// Implementations:
/// - RollbarSink: posts items to the Rollbar API (infra-rollbar crate)
/// - DisabledSink: never available, every report is skipped
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether the sink can accept reports at all (credentials present,
    /// not running in a non-reporting mode). Checked before every dispatch.
    fn is_available(&self) -> bool;

    /// Deliver one report
    ///
    /// # Arguments
    /// * `error` - The error being reported
    /// * `payload` - Normalized level/fingerprint/custom data
    /// * `request` - Request context taken from `data.req`, passed through untouched
    ///
    /// # Errors
    /// Any failure to talk to the service; never retried by the caller
    async fn send(
        &self,
        error: &ReportableError,
        payload: &ReportPayload,
        request: Option<&Value>,
    ) -> Result<(), SinkError>;
}

/// Sink used when nothing is configured: reports are always skipped
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSink;

#[async_trait]
impl ReportSink for DisabledSink {
    fn name(&self) -> &str {
        "disabled"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn send(
        &self,
        _error: &ReportableError,
        _payload: &ReportPayload,
        _request: Option<&Value>,
    ) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("no sink configured".to_string()))
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock sink behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Accept every report
        Success,
        /// Fail every send with the given error
        Fail(SinkError),
        /// Report as unavailable (send is never reached)
        Unavailable,
    }

    /// A report captured by [`RecordingSink`]
    #[derive(Debug, Clone)]
    pub struct RecordedReport {
        pub message: String,
        pub payload: ReportPayload,
        pub request: Option<Value>,
    }

    /// Mock sink that records every report it is handed
    #[derive(Clone)]
    pub struct RecordingSink {
        behavior: Arc<Mutex<MockBehavior>>,
        reports: Arc<Mutex<Vec<RecordedReport>>>,
    }

    impl RecordingSink {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                reports: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }

        pub fn new_fail(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail(SinkError::Transport(message.into())))
        }

        pub fn new_unavailable() -> Self {
            Self::new(MockBehavior::Unavailable)
        }

        pub fn set_behavior(&self, behavior: MockBehavior) {
            *self.behavior.lock().unwrap() = behavior;
        }

        pub fn call_count(&self) -> usize {
            self.reports.lock().unwrap().len()
        }

        pub fn reports(&self) -> Vec<RecordedReport> {
            self.reports.lock().unwrap().clone()
        }

        pub fn last(&self) -> Option<RecordedReport> {
            self.reports.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl ReportSink for RecordingSink {
        fn name(&self) -> &str {
            "recording"
        }

        fn is_available(&self) -> bool {
            !matches!(*self.behavior.lock().unwrap(), MockBehavior::Unavailable)
        }

        async fn send(
            &self,
            error: &ReportableError,
            payload: &ReportPayload,
            request: Option<&Value>,
        ) -> Result<(), SinkError> {
            self.reports.lock().unwrap().push(RecordedReport {
                message: error.message().to_string(),
                payload: payload.clone(),
                request: request.cloned(),
            });

            let behavior = self.behavior.lock().unwrap().clone();
            match behavior {
                MockBehavior::Success => Ok(()),
                MockBehavior::Fail(err) => Err(err),
                MockBehavior::Unavailable => {
                    Err(SinkError::Unavailable("mock sink unavailable".to_string()))
                }
            }
        }
    }
}
