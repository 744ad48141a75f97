// Application Layer - Reporting decisions and the facade

pub mod facade;
pub mod payload;
pub mod reporter;

// Re-exports
pub use facade::ErrorCat;
pub use payload::ReportPayload;
pub use reporter::{passes_threshold, Reporter, SinkReporter};
