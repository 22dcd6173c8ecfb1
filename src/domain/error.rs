// src/domain/error.rs
use crate::domain::bookmark::FlatBookmarkBuilderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Bookmark operation failed: {0}")]
    BookmarkOperationFailed(String),

    #[error("Cannot fetch bookmark tree: {0}")]
    CannotFetchTree(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Failed to serialize bookmark tree: {0}")]
    SerializationError(String),

    #[error("Failed to deserialize bookmark tree: {0}")]
    DeserializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    /// Prefix the error message with `context`, keeping the variant where it carries a message
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        let context = context.into();
        match self {
            DomainError::BookmarkOperationFailed(msg) => {
                DomainError::BookmarkOperationFailed(format!("{}: {}", context, msg))
            }
            DomainError::CannotFetchTree(msg) => {
                DomainError::CannotFetchTree(format!("{}: {}", context, msg))
            }
            DomainError::StoreError(msg) => DomainError::StoreError(format!("{}: {}", context, msg)),
            DomainError::SerializationError(msg) => {
                DomainError::SerializationError(format!("{}: {}", context, msg))
            }
            DomainError::DeserializationError(msg) => {
                DomainError::DeserializationError(format!("{}: {}", context, msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context, msg)),
            err => DomainError::Other(format!("{}: {}", context, err)),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<FlatBookmarkBuilderError> for DomainError {
    fn from(e: FlatBookmarkBuilderError) -> Self {
        DomainError::BookmarkOperationFailed(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::DeserializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn given_store_error_when_add_context_then_keeps_variant_and_prefixes_message() {
        let err = DomainError::StoreError("disk full".to_string()).context("saving snapshot");

        assert!(matches!(err, DomainError::StoreError(_)));
        assert_eq!(err.to_string(), "Store error: saving snapshot: disk full");
    }

    #[test]
    fn given_io_error_when_add_context_then_wraps_into_other() {
        let err = DomainError::Io(io::Error::new(io::ErrorKind::NotFound, "no such file"))
            .context("reading snapshot");

        assert!(err.to_string().contains("reading snapshot"));
        assert!(err.to_string().contains("no such file"));
    }
}
