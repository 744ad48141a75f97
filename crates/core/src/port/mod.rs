// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod sink;
pub mod time_provider;

// Re-exports
pub use id_provider::IdProvider;
pub use sink::{DisabledSink, ReportSink, SinkError};
pub use time_provider::TimeProvider;
