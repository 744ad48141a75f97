// Reportable Error - the one concrete error shape of the taxonomy

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::constants::{
    DEFAULT_ROUTE_STATUS, JOB_DATA_KEY, ORIGINAL_ERROR_DATA_KEY, QUEUE_DATA_KEY,
    REPORTING_FAILED_MESSAGE, REQUEST_DATA_KEY,
};
use super::hint::ReportingHint;
use super::kind::ErrorKind;

/// Error carrying structured data and reporting hints.
///
/// Specializations are presets over this shape (see [`ErrorKind`]); they
/// differ only in the level they force and the data fields they set.
///
/// # Example
/// ```text
/// let err = ReportableError::worker("index failed", "code_intel", json!({"id": 7}))
///     .with_data(json!({"path": "src/main.rs"}))
///     .with_hint(ReportingHint::new().with_fingerprint("index-failures"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{message}")]
pub struct ReportableError {
    kind: ErrorKind,
    message: String,
    data: Map<String, Value>,
    reporting: ReportingHint,
    report: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
}

impl ReportableError {
    fn of_kind(kind: ErrorKind, message: impl Into<String>, status_code: Option<u16>) -> Self {
        let mut err = Self {
            kind,
            message: message.into(),
            data: Map::new(),
            reporting: ReportingHint::default(),
            report: true,
            status_code,
        };
        err.apply_forced_level();
        err
    }

    /// Plain error with no forced level
    pub fn new(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::Base, message, None)
    }

    /// Always reported at `warn`
    pub fn warning(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::Warning, message, None)
    }

    /// Always reported at `critical`
    pub fn critical(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::Critical, message, None)
    }

    pub fn worker(message: impl Into<String>, queue: impl Into<String>, job: Value) -> Self {
        Self::worker_of_kind(ErrorKind::Worker, message, queue, job)
    }

    /// Worker error the job cannot recover from
    pub fn worker_stop(message: impl Into<String>, queue: impl Into<String>, job: Value) -> Self {
        Self::worker_of_kind(ErrorKind::WorkerStop, message, queue, job)
    }

    pub fn worker_warning(
        message: impl Into<String>,
        queue: impl Into<String>,
        job: Value,
    ) -> Self {
        Self::worker_of_kind(ErrorKind::WorkerWarning, message, queue, job)
    }

    /// Worker stop raised for a malformed job
    pub fn invalid_job(message: impl Into<String>, queue: impl Into<String>, job: Value) -> Self {
        Self::worker_of_kind(ErrorKind::InvalidJob, message, queue, job)
    }

    fn worker_of_kind(
        kind: ErrorKind,
        message: impl Into<String>,
        queue: impl Into<String>,
        job: Value,
    ) -> Self {
        let mut err = Self::of_kind(kind, message, None);
        err.set_queue(queue);
        err.set_job(job);
        err
    }

    /// Route error; `error` level for 5xx, `warn` otherwise. A missing status
    /// is treated as 500.
    pub fn route(message: impl Into<String>, status_code: impl Into<Option<u16>>) -> Self {
        let status = status_code.into().unwrap_or(DEFAULT_ROUTE_STATUS);
        Self::of_kind(ErrorKind::Route, message, Some(status))
    }

    /// Critical error signalling that reporting `original` to the sink failed
    pub fn reporting_failed(original: &dyn std::error::Error) -> Self {
        let mut data = Map::new();
        data.insert(
            ORIGINAL_ERROR_DATA_KEY.to_string(),
            Value::String(original.to_string()),
        );
        let mut err = Self::critical(REPORTING_FAILED_MESSAGE);
        err.data = data;
        err
    }

    /// Merge the entries of `data` into the error's data.
    ///
    /// Non-object values are ignored so `data` stays a mapping. On worker
    /// kinds the queue and job set by the preset take precedence.
    pub fn with_data(mut self, data: Value) -> Self {
        let Value::Object(entries) = data else {
            return self;
        };

        let pinned: Vec<(String, Value)> = if self.kind.is_worker() {
            [QUEUE_DATA_KEY, JOB_DATA_KEY]
                .into_iter()
                .filter_map(|key| self.data.get(key).map(|v| (key.to_string(), v.clone())))
                .collect()
        } else {
            Vec::new()
        };

        self.data.extend(entries);
        self.data.extend(pinned);
        self
    }

    /// Attach reporting hints; a level forced by the kind still wins
    pub fn with_hint(mut self, hint: ReportingHint) -> Self {
        self.reporting = hint;
        self.apply_forced_level();
        self
    }

    /// Attach hints from an arbitrary options object (only `level` and
    /// `fingerprint` are read); a level forced by the kind still wins
    pub fn with_hint_value(self, options: &Value) -> Self {
        self.with_hint(ReportingHint::from_value(options))
    }

    fn apply_forced_level(&mut self) {
        if let Some(level) = self.kind.forced_level(self.status_code) {
            self.reporting.level = Some(level.as_str().to_string());
        }
    }

    // Accessors

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }

    pub fn reporting(&self) -> &ReportingHint {
        &self.reporting
    }

    /// `false` once the error has been explicitly opted out of reporting
    pub fn is_report_enabled(&self) -> bool {
        self.report
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn queue(&self) -> Option<&str> {
        self.data.get(QUEUE_DATA_KEY).and_then(Value::as_str)
    }

    pub fn job(&self) -> Option<&Value> {
        self.data.get(JOB_DATA_KEY)
    }

    /// Request context attached by the caller under `data.req`
    pub fn request(&self) -> Option<&Value> {
        self.data.get(REQUEST_DATA_KEY)
    }

    // Setters (no validation; levels are resolved at report time)

    pub fn set_level(&mut self, level: impl Into<String>) {
        self.reporting.level = Some(level.into());
    }

    pub fn set_fingerprint(&mut self, fingerprint: impl Into<Value>) {
        self.reporting.fingerprint = Some(fingerprint.into());
    }

    /// Replace the reporting hints wholesale
    pub fn set_reporting_options(&mut self, hint: ReportingHint) {
        self.reporting = hint;
    }

    pub fn set_queue(&mut self, queue: impl Into<String>) {
        self.data
            .insert(QUEUE_DATA_KEY.to_string(), Value::String(queue.into()));
    }

    pub fn set_job(&mut self, job: Value) {
        self.data.insert(JOB_DATA_KEY.to_string(), job);
    }

    pub fn set_report(&mut self, report: bool) {
        self.report = report;
    }

    /// Opt this error out of reporting
    pub fn suppress(mut self) -> Self {
        self.report = false;
        self
    }
}
