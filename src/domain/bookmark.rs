// src/domain/bookmark.rs
use crate::domain::tree::BookmarkLeaf;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Title used when the store hands over an empty one
pub const UNTITLED: &str = "Untitled";

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

const FAVICON_PLACEHOLDER: &str = concat!(
    "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\" ",
    "fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\">",
    "<path d=\"M10 13a5 5 0 0 0 7.54.54l3-3a5 5 0 0 0-7.07-7.07l-1.72 1.71\"></path>",
    "<path d=\"M14 11a5 5 0 0 0-7.54-.54l-3 3a5 5 0 0 0 7.07 7.07l1.71-1.71\"></path></svg>"
);

/// A bookmark leaf annotated with its resolved folder position
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct FlatBookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Epoch milliseconds
    #[builder(default)]
    pub date_added: i64,
    /// Ancestor folder titles joined by the path separator, empty directly under a root folder
    #[builder(default)]
    pub folder_path: String,
    /// Depth of the containing folder
    #[builder(default)]
    pub level: usize,
    #[builder(default = "self.url.as_deref().map(domain_of).unwrap_or_default()")]
    pub domain: String,
}

impl FlatBookmark {
    /// Annotate a leaf with its folder position
    pub fn from_leaf(leaf: &BookmarkLeaf, folder_path: &str, level: usize) -> Self {
        let title = if leaf.title.is_empty() {
            UNTITLED.to_string()
        } else {
            leaf.title.clone()
        };

        Self {
            id: leaf.id.clone(),
            title,
            url: leaf.url.clone(),
            date_added: leaf.date_added,
            folder_path: folder_path.to_string(),
            level,
            domain: domain_of(&leaf.url),
        }
    }

    /// Favicon location for the bookmark's host, or an inline placeholder if the URL does not parse
    pub fn favicon_url(&self) -> String {
        match Url::parse(&self.url) {
            Ok(url) => format!(
                "{}?domain={}&sz=32",
                FAVICON_SERVICE,
                url.host_str().unwrap_or_default()
            ),
            Err(_) => FAVICON_PLACEHOLDER.to_string(),
        }
    }
}

impl fmt::Display for FlatBookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} <{}>", self.id, self.title, self.url)?;
        if !self.folder_path.is_empty() {
            write!(f, " [{}]", self.folder_path)?;
        }
        Ok(())
    }
}

/// Host part of `url`; the raw string when it does not parse as a URL
pub fn domain_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or_default().to_string(),
        Err(_) => url.to_string(),
    }
}

/// A bookmark as created by the external store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub url: String,
    pub date_added: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(title: &str, url: &str) -> BookmarkLeaf {
        BookmarkLeaf {
            id: "42".to_string(),
            title: title.to_string(),
            url: url.to_string(),
            date_added: 1_000,
        }
    }

    #[test]
    fn given_malformed_url_when_derive_domain_then_returns_raw_string() {
        assert_eq!(domain_of("not a url"), "not a url");
        assert_eq!(domain_of(""), "");
    }

    #[test]
    fn given_http_url_when_derive_domain_then_returns_host() {
        assert_eq!(domain_of("https://docs.rs/tokio/latest"), "docs.rs");
        assert_eq!(domain_of("http://www.example.com:8080/x?y=1"), "www.example.com");
    }

    #[test]
    fn given_url_without_host_when_derive_domain_then_returns_empty() {
        assert_eq!(domain_of("javascript:void(0)"), "");
    }

    #[test]
    fn given_empty_title_when_from_leaf_then_uses_untitled() {
        let bookmark = FlatBookmark::from_leaf(&leaf("", "https://a.com"), "Work", 1);

        assert_eq!(bookmark.title, UNTITLED);
        assert_eq!(bookmark.folder_path, "Work");
        assert_eq!(bookmark.level, 1);
        assert_eq!(bookmark.domain, "a.com");
    }

    #[test]
    fn given_builder_without_domain_when_build_then_derives_domain_from_url() {
        let bookmark = FlatBookmarkBuilder::default()
            .id("1")
            .title("Rust")
            .url("https://www.rust-lang.org/learn")
            .build()
            .unwrap();

        assert_eq!(bookmark.domain, "www.rust-lang.org");
        assert_eq!(bookmark.folder_path, "");
        assert_eq!(bookmark.level, 0);
    }

    #[test]
    fn given_valid_url_when_favicon_url_then_points_to_favicon_service() {
        let bookmark = FlatBookmark::from_leaf(&leaf("A", "https://a.com/page"), "", 0);
        assert_eq!(
            bookmark.favicon_url(),
            "https://www.google.com/s2/favicons?domain=a.com&sz=32"
        );
    }

    #[test]
    fn given_malformed_url_when_favicon_url_then_returns_placeholder() {
        let bookmark = FlatBookmark::from_leaf(&leaf("A", "not a url"), "", 0);
        assert!(bookmark.favicon_url().starts_with("data:image/svg+xml"));
    }
}
