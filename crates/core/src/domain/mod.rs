// Domain Layer - Severity model and error taxonomy

pub mod constants;
pub mod error;
pub mod hint;
pub mod kind;
pub mod level;
pub mod reportable;

// Re-exports
pub use error::DomainError;
pub use hint::ReportingHint;
pub use kind::ErrorKind;
pub use level::Level;
pub use reportable::ReportableError;
