// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown severity level: {0:?}")]
    UnknownLevel(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
