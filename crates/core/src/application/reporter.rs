// Reporter - gate-keeps and dispatches errors to a sink

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::payload::{stringify_fingerprint, ReportPayload};
use crate::config::{FingerprintPolicy, ReporterConfig};
use crate::domain::{Level, ReportableError};
use crate::error::Result;
use crate::port::ReportSink;

/// Reporter interface used by the [`ErrorCat`](super::ErrorCat) facade.
///
/// Only `report` has no default: a reporter that cannot dispatch does not
/// compile. The provided methods implement the level policy shared by all
/// reporters.
#[async_trait]
pub trait Reporter: Send + Sync {
    /// Current minimum level
    fn minimum_level(&self) -> Level;

    /// Set the minimum level; unknown tokens fall back to `error`
    fn set_reporting_level(&self, level: &str);

    /// Whether `error` clears the opt-out flag and the minimum level
    fn should_report(&self, error: Option<&ReportableError>) -> bool {
        passes_threshold(error, self.minimum_level())
    }

    /// Level the error is reported at: its hint when that names a known
    /// level, otherwise the minimum level
    fn level_for(&self, error: &ReportableError) -> Level {
        error
            .reporting()
            .resolved_level()
            .unwrap_or_else(|| self.minimum_level())
    }

    fn fingerprint_for<'a>(&self, error: &'a ReportableError) -> Option<&'a Value> {
        error.reporting().fingerprint.as_ref()
    }

    /// Report `error`. `None` and filtered errors complete with `Ok(())`
    /// without touching the sink; sink failures come back as `Err`.
    async fn report(&self, error: Option<&ReportableError>) -> Result<()>;
}

/// Threshold check shared by reporters
///
/// Returns false for a missing error or one opted out of reporting.
/// Otherwise the error's effective level must weigh at least `minimum`.
pub fn passes_threshold(error: Option<&ReportableError>, minimum: Level) -> bool {
    let Some(error) = error else {
        return false;
    };
    if !error.is_report_enabled() {
        return false;
    }
    error
        .reporting()
        .resolved_level()
        .unwrap_or(minimum)
        .meets(minimum)
}

/// Reporter that forwards to a [`ReportSink`]
pub struct SinkReporter {
    sink: Arc<dyn ReportSink>,
    minimum_level: AtomicU8,
    fingerprint_policy: FingerprintPolicy,
}

impl SinkReporter {
    /// Create a new reporter
    ///
    /// # Arguments
    /// * `sink` - Destination of reports
    /// * `config` - Minimum level and fingerprint policy
    pub fn new(sink: Arc<dyn ReportSink>, config: ReporterConfig) -> Self {
        Self {
            sink,
            minimum_level: AtomicU8::new(config.minimum_level as u8),
            fingerprint_policy: config.fingerprint_policy,
        }
    }

    pub fn sink(&self) -> &Arc<dyn ReportSink> {
        &self.sink
    }

    /// Build the payload the sink receives for `error`
    pub fn build_payload(&self, error: &ReportableError) -> ReportPayload {
        let fingerprint = self.fingerprint_for(error).and_then(stringify_fingerprint);
        ReportPayload::new(self.level_for(error), fingerprint, error.data().clone())
            .with_policy(self.fingerprint_policy)
    }

    fn skip_reason(&self, error: Option<&ReportableError>) -> Option<&'static str> {
        if !self.sink.is_available() {
            return Some("sink unavailable");
        }
        match error {
            None => Some("no error"),
            Some(err) if !err.is_report_enabled() => Some("opted out"),
            Some(_) if !passes_threshold(error, self.minimum_level()) => {
                Some("below minimum level")
            }
            Some(_) => None,
        }
    }
}

#[async_trait]
impl Reporter for SinkReporter {
    fn minimum_level(&self) -> Level {
        Level::from_repr(self.minimum_level.load(Ordering::Acquire))
    }

    fn set_reporting_level(&self, level: &str) {
        let level = Level::normalize(level);
        self.minimum_level.store(level as u8, Ordering::Release);
        debug!(sink = %self.sink.name(), minimum_level = %level, "Reporting level set");
    }

    fn should_report(&self, error: Option<&ReportableError>) -> bool {
        self.skip_reason(error).is_none()
    }

    async fn report(&self, error: Option<&ReportableError>) -> Result<()> {
        if let Some(reason) = self.skip_reason(error) {
            debug!(
                sink = %self.sink.name(),
                reason,
                error_message = error.map(ReportableError::message).unwrap_or_default(),
                "Report skipped"
            );
            return Ok(());
        }
        let Some(error) = error else {
            return Ok(());
        };

        let payload = self.build_payload(error);

        info!(
            sink = %self.sink.name(),
            kind = %error.kind(),
            level = %payload.level,
            fingerprint = payload.fingerprint.as_deref().unwrap_or_default(),
            "Reporting error"
        );

        self.sink
            .send(error, &payload, error.request())
            .await
            .map_err(|e| {
                warn!(sink = %self.sink.name(), error = %e, "Failed to deliver report");
                e.into()
            })
    }
}
