//! Domain errors
//!
//! Pure domain errors with no infrastructure dependencies

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A digest was requested for an absent value
    #[error("cannot digest an absent value")]
    EmptyInput,

    #[error("serialization error: {0}")]
    Serialization(String),

    /// A structural or business rule was violated; carries the rule description
    #[error("validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
