// ErrorCat facade - process entry point wrapping one reporter

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use super::reporter::{Reporter, SinkReporter};
use crate::config::ReporterConfig;
use crate::domain::ReportableError;
use crate::error::{ReportError, Result};
use crate::port::{DisabledSink, ReportSink};

/// Entry point applications hold (and pass around) to report errors.
///
/// # Example
/// ```text
/// let cat = ErrorCat::from_sink(Arc::new(rollbar_sink));
///
/// // await the outcome
/// cat.report(Some(&err)).await?;
///
/// // report in the background and keep propagating
/// let value = do_work().or_else(|e| cat.catch(e))?;
/// ```
#[derive(Clone)]
pub struct ErrorCat {
    reporter: Arc<dyn Reporter>,
}

impl ErrorCat {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter }
    }

    /// Facade over `sink` with a minimum level of `error`
    pub fn from_sink(sink: Arc<dyn ReportSink>) -> Self {
        Self::with_config(sink, ReporterConfig::default())
    }

    pub fn with_config(sink: Arc<dyn ReportSink>, config: ReporterConfig) -> Self {
        Self::new(Arc::new(SinkReporter::new(sink, config)))
    }

    pub fn reporter(&self) -> &Arc<dyn Reporter> {
        &self.reporter
    }

    /// Swap the reporting delegate
    pub fn set_reporter(&mut self, reporter: Arc<dyn Reporter>) {
        self.reporter = reporter;
    }

    /// Report an error and wait for the sink's answer
    pub async fn report(&self, error: Option<&ReportableError>) -> Result<()> {
        self.reporter.report(error).await
    }

    /// Callback adapter over [`report`](Self::report).
    ///
    /// The report runs as a task on the current tokio runtime and `callback`
    /// receives its outcome. Without a runtime the callback is invoked
    /// immediately with [`ReportError::Task`] and `None` is returned.
    pub fn report_with_callback<F>(
        &self,
        error: Option<ReportableError>,
        callback: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        let Ok(handle) = Handle::try_current() else {
            warn!("No tokio runtime available, report dropped");
            callback(Err(ReportError::Task("no tokio runtime available".to_string())));
            return None;
        };

        let reporter = Arc::clone(&self.reporter);
        Some(handle.spawn(async move {
            let outcome = reporter.report(error.as_ref()).await;
            callback(outcome);
        }))
    }

    /// Fire-and-forget report, then hand the same error back as `Err` so the
    /// caller keeps propagating it.
    ///
    /// ```text
    /// let job = parse_job(raw).or_else(|e| cat.catch(e))?;
    /// ```
    pub fn catch<T>(&self, error: ReportableError) -> std::result::Result<T, ReportableError> {
        self.report_with_callback(Some(error.clone()), |outcome| {
            if let Err(e) = outcome {
                warn!(error = %e, "Background report failed");
            }
        });
        Err(error)
    }

    /// Report `error`, then continue the pipeline with `next`.
    ///
    /// `next` receives the original error when reporting succeeded (or was
    /// skipped), or a critical "Unable to report" error referencing the sink
    /// failure when it did not. `context` is handed to `next` untouched.
    pub async fn report_and_continue<C, F, R>(
        &self,
        error: ReportableError,
        context: C,
        next: F,
    ) -> R
    where
        F: FnOnce(ReportableError, C) -> R,
    {
        match self.report(Some(&error)).await {
            Ok(()) => next(error, context),
            Err(report_err) => {
                error!(
                    error = %report_err,
                    original = %error,
                    "Unable to report error, continuing with reporting failure"
                );
                next(ReportableError::reporting_failed(&report_err), context)
            }
        }
    }
}

impl Default for ErrorCat {
    /// Facade with no sink configured: every report is skipped
    fn default() -> Self {
        Self::from_sink(Arc::new(DisabledSink))
    }
}
