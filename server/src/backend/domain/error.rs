use thiserror::Error;

/// Failures raised by the domain services.
///
/// Services return `anyhow::Result`; these variants travel inside the
/// `anyhow::Error` so the REST layer can downcast and pick a status code.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> anyhow::Error {
        DomainError::NotFound(what.into()).into()
    }

    pub fn validation(message: impl Into<String>) -> anyhow::Error {
        DomainError::Validation(message.into()).into()
    }

    pub fn conflict(message: impl Into<String>) -> anyhow::Error {
        DomainError::Conflict(message.into()).into()
    }
}
