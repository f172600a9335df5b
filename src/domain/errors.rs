// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("uniqueness violation: {field} = {value:?} already exists")]
    UniquenessViolation { field: String, value: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn uniqueness(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UniquenessViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}
