//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid sanitizer rule: {0}")]
    InvalidSanitizer(String),
}
