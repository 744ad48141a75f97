// ErrorCat Rollbar adapter
// Implements ReportSink from errorcat-core (Hexagonal Architecture)

pub mod config;
mod item;
pub mod sink;

pub use config::RollbarConfig;
pub use sink::RollbarSink;

use errorcat_core::port::SinkError;
use errorcat_core::{ErrorCat, ReporterConfig};
use std::sync::Arc;

/// Build a facade wired to Rollbar
///
/// # Example
/// ```text
/// let cat = errorcat_infra_rollbar::error_cat(
///     RollbarConfig::new("token").environment("production"),
///     ReporterConfig::default(),
/// )?;
/// ```
pub fn error_cat(config: RollbarConfig, reporter: ReporterConfig) -> Result<ErrorCat, SinkError> {
    let sink = RollbarSink::new(config)?;
    Ok(ErrorCat::with_config(Arc::new(sink), reporter))
}
