// src/application/error.rs
use crate::domain::error::DomainError;
use std::fmt;
use thiserror::Error;

/// Form field a validation message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Url,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Title => write!(f, "title"),
            FormField::Url => write!(f, "url"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn new<S: Into<String>>(field: FormField, message: S) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Failed to load bookmarks: {0}")]
    FetchFailed(String),

    #[error("Failed to modify bookmark: {0}")]
    MutationFailed(String),

    #[error("Bookmark not found with ID {0}")]
    BookmarkNotFound(String),

    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            ApplicationError::FetchFailed(msg) => {
                ApplicationError::FetchFailed(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::MutationFailed(msg) => {
                ApplicationError::MutationFailed(format!("{}: {}", context.into(), msg))
            }
            err => err,
        }
    }

    /// Field errors if this is a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ApplicationError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        ApplicationError::Domain(DomainError::Io(err))
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_validation_error_when_display_then_lists_all_fields() {
        let err = ApplicationError::Validation(vec![
            FieldError::new(FormField::Title, "Title is required"),
            FieldError::new(FormField::Url, "URL is required"),
        ]);

        assert_eq!(
            err.to_string(),
            "Validation failed: title: Title is required; url: URL is required"
        );
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn given_mutation_error_when_add_context_then_prefixes_message() {
        let err = ApplicationError::MutationFailed("store offline".to_string())
            .context("deleting bookmark 7");

        assert_eq!(
            err.to_string(),
            "Failed to modify bookmark: deleting bookmark 7: store offline"
        );
    }

    #[test]
    fn given_validation_error_when_add_context_then_unchanged() {
        let err = ApplicationError::Validation(vec![FieldError::new(FormField::Url, "bad")])
            .context("ignored");

        assert_eq!(err.field_errors()[0].message, "bad");
    }
}
