// ErrorCat Core - Severity model, error taxonomy & reporting decisions
// NO vendor SDK or HTTP dependencies (Hexagonal Architecture)

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{ErrorCat, ReportPayload, Reporter, SinkReporter};
pub use config::{FingerprintPolicy, ReporterConfig};
pub use domain::{ErrorKind, Level, ReportableError, ReportingHint};
pub use error::{ReportError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
