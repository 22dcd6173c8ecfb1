// src/infrastructure/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store error: {0}")]
    Store(String),
}

// Implement conversion from infrastructure errors to domain errors
impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::FileSystem(msg) => DomainError::StoreError(msg),
            InfrastructureError::Serialization(msg) => DomainError::SerializationError(msg),
            InfrastructureError::Store(msg) => DomainError::StoreError(msg),
        }
    }
}

impl From<std::io::Error> for InfrastructureError {
    fn from(error: std::io::Error) -> Self {
        InfrastructureError::FileSystem(error.to_string())
    }
}
