//! Reporting decision properties, exercised through the public API
//!
//! Covers the severity ordering, threshold gating, forced levels and the
//! payload contract handed to sinks.

use std::sync::Arc;

use async_trait::async_trait;
use errorcat_core::port::sink::mocks::RecordingSink;
use errorcat_core::{
    ErrorCat, Level, ReportableError, Reporter, ReporterConfig, ReportingHint, SinkReporter,
};
use serde_json::json;

fn reporter(sink: &RecordingSink, minimum: &str) -> SinkReporter {
    SinkReporter::new(
        Arc::new(sink.clone()),
        ReporterConfig::with_minimum_level(minimum),
    )
}

#[test]
fn test_level_weights_are_ordered() {
    let weights: Vec<u8> = Level::ALL.iter().map(|l| l.weight()).collect();
    assert!(weights.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(Level::Fatal.weight(), Level::Critical.weight());
}

#[test]
fn test_unknown_tokens_normalize_to_error() {
    for token in ["", "WARN", "notice", "severe", "critical!"] {
        assert_eq!(Level::normalize(token), Level::Error);
    }
}

#[test]
fn test_threshold_gating_at_warn() {
    let sink = RecordingSink::new_success();
    let reporter = reporter(&sink, "warn");

    let info = ReportableError::new("i").with_hint_value(&json!({"level": "info"}));
    let error = ReportableError::new("e").with_hint_value(&json!({"level": "error"}));

    assert!(!reporter.should_report(None));
    assert!(!reporter.should_report(Some(&ReportableError::new("x").suppress())));
    assert!(!reporter.should_report(Some(&info)));
    assert!(reporter.should_report(Some(&error)));
}

#[test]
fn test_forced_levels_win() {
    let sink = RecordingSink::new_success();
    let reporter = reporter(&sink, "trace");

    let warning = ReportableError::warning("w").with_hint_value(&json!({"level": "critical"}));
    assert_eq!(reporter.level_for(&warning), Level::Warn);

    assert_eq!(reporter.level_for(&ReportableError::route("r", 404)), Level::Warn);
    assert_eq!(reporter.level_for(&ReportableError::route("r", 500)), Level::Error);
}

#[tokio::test]
async fn test_payload_without_fingerprint_omits_key() {
    let sink = RecordingSink::new_success();
    let cat = ErrorCat::from_sink(Arc::new(sink.clone()));

    cat.report(Some(&ReportableError::new("boom"))).await.unwrap();

    let payload = sink.last().unwrap().payload.to_value();
    assert_eq!(payload, json!({"level": "error", "custom": {}}));
}

#[tokio::test]
async fn test_structured_fingerprint_is_stringified() {
    let sink = RecordingSink::new_success();
    let cat = ErrorCat::from_sink(Arc::new(sink.clone()));

    let err = ReportableError::new("boom")
        .with_hint(ReportingHint::new().with_fingerprint(json!({"foo": "bar"})));
    cat.report(Some(&err)).await.unwrap();

    let payload = sink.last().unwrap().payload.to_value();
    assert_eq!(payload["fingerprint"], json!(r#"{"foo":"bar"}"#));
}

#[tokio::test]
async fn test_reconfigured_level_applies_to_later_reports() {
    let sink = RecordingSink::new_success();
    let cat = ErrorCat::from_sink(Arc::new(sink.clone()));
    let info = ReportableError::new("i").with_hint_value(&json!({"level": "info"}));

    cat.report(Some(&info)).await.unwrap();
    assert_eq!(sink.call_count(), 0);

    cat.reporter().set_reporting_level("info");
    cat.report(Some(&info)).await.unwrap();
    assert_eq!(sink.call_count(), 1);
}

/// Reporter that only counts; shows a custom delegate plugged into the facade
struct CountingReporter {
    count: std::sync::atomic::AtomicUsize,
}

#[async_trait]
impl Reporter for CountingReporter {
    fn minimum_level(&self) -> Level {
        Level::Trace
    }

    fn set_reporting_level(&self, _level: &str) {}

    async fn report(&self, error: Option<&ReportableError>) -> errorcat_core::Result<()> {
        if self.should_report(error) {
            self.count
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_custom_reporter_uses_shared_policy() {
    let counting = Arc::new(CountingReporter {
        count: Default::default(),
    });
    let cat = ErrorCat::new(counting.clone());

    cat.report(None).await.unwrap();
    cat.report(Some(&ReportableError::new("x").suppress()))
        .await
        .unwrap();
    cat.report(Some(&ReportableError::new("x").with_hint_value(&json!({"level": "trace"}))))
        .await
        .unwrap();

    assert_eq!(counting.count.load(std::sync::atomic::Ordering::SeqCst), 1);
}
