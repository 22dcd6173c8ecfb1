// src/util/validation.rs
use crate::application::error::{ApplicationError, ApplicationResult, FieldError, FormField};
use url::Url;

/// Maximum title length accepted when editing
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 200;

/// Validation of user-entered bookmark data before it is sent to the store
pub struct ValidationHelper;

impl ValidationHelper {
    /// True if `url` parses as an absolute URL
    pub fn is_valid_url(url: &str) -> bool {
        Url::parse(url).is_ok()
    }

    /// Validates a new bookmark, reporting every offending field at once
    ///
    /// # Returns
    /// * `Ok((title, url))` - trimmed values
    /// * `Err(ApplicationError::Validation)` - one entry per failing field
    pub fn validate_new_bookmark(title: &str, url: &str) -> ApplicationResult<(String, String)> {
        let title = title.trim();
        let url = url.trim();
        let mut errors = Vec::new();

        if title.is_empty() {
            errors.push(FieldError::new(FormField::Title, "Title is required"));
        }

        if url.is_empty() {
            errors.push(FieldError::new(FormField::Url, "URL is required"));
        } else if !Self::is_valid_url(url) {
            errors.push(FieldError::new(FormField::Url, "Please enter a valid URL"));
        }

        if !errors.is_empty() {
            return Err(ApplicationError::Validation(errors));
        }
        Ok((title.to_string(), url.to_string()))
    }

    /// Validates an edited title
    ///
    /// # Returns
    /// * `Ok(title)` - trimmed title
    /// * `Err(ApplicationError::Validation)` - if empty or longer than `max_length` characters
    pub fn validate_title(title: &str, max_length: usize) -> ApplicationResult<String> {
        let title = title.trim();

        if title.is_empty() {
            return Err(ApplicationError::Validation(vec![FieldError::new(
                FormField::Title,
                "Title is required",
            )]));
        }

        if title.chars().count() > max_length {
            return Err(ApplicationError::Validation(vec![FieldError::new(
                FormField::Title,
                format!("Title must be less than {} characters", max_length),
            )]));
        }

        Ok(title.to_string())
    }
}

/// Title derived from the URL's host, for when the user leaves the title empty
pub fn suggest_title(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    let mut chars = host.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
