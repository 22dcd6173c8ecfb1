// src/domain/view_state.rs
use crate::domain::clock::MILLIS_PER_DAY;
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Ordering of the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum SortKey {
    DateAsc,
    #[default]
    DateDesc,
    TitleAsc,
    TitleDesc,
    UrlAsc,
    UrlDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::DateAsc,
        SortKey::DateDesc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::UrlAsc,
        SortKey::UrlDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateAsc => "dateAsc",
            SortKey::DateDesc => "dateDesc",
            SortKey::TitleAsc => "titleAsc",
            SortKey::TitleDesc => "titleDesc",
            SortKey::UrlAsc => "urlAsc",
            SortKey::UrlDesc => "urlDesc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::Other(format!("Unknown sort key: {}", s)))
    }
}

/// Lenient conversion: anything unrecognised falls back to the default order
impl From<String> for SortKey {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_else(|_| {
            trace!("Unknown sort key '{}', using default", s);
            SortKey::default()
        })
    }
}

/// Window on `date_added`, counted back from now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum DateFilter {
    #[default]
    None,
    Today,
    Week,
    Month,
    Year,
}

impl DateFilter {
    pub const ALL: [DateFilter; 5] = [
        DateFilter::None,
        DateFilter::Today,
        DateFilter::Week,
        DateFilter::Month,
        DateFilter::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateFilter::None => "none",
            DateFilter::Today => "today",
            DateFilter::Week => "week",
            DateFilter::Month => "month",
            DateFilter::Year => "year",
        }
    }

    /// Length of the window in milliseconds; `None` for no filter
    pub fn window_millis(&self) -> Option<i64> {
        let days = match self {
            DateFilter::None => return None,
            DateFilter::Today => 1,
            DateFilter::Week => 7,
            DateFilter::Month => 30,
            DateFilter::Year => 365,
        };
        Some(days * MILLIS_PER_DAY)
    }

    /// Oldest `date_added` still inside the window
    pub fn cutoff(&self, now_millis: i64) -> Option<i64> {
        self.window_millis().map(|window| now_millis - window)
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(DateFilter::None);
        }
        DateFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::Other(format!("Unknown date filter: {}", s)))
    }
}

impl From<String> for DateFilter {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_else(|_| {
            trace!("Unknown date filter '{}', disabling date filter", s);
            DateFilter::None
        })
    }
}

/// The user's current search, filter and sort selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub search_term: String,
    pub sort_key: SortKey,
    /// Folder path to restrict to, empty for all folders
    pub folder_filter: String,
    pub date_filter: DateFilter,
}

impl ViewState {
    /// Merge a patch; every field present in the patch replaces the current one
    pub fn apply(&mut self, patch: ViewStatePatch) {
        if let Some(search_term) = patch.search_term {
            self.search_term = search_term;
        }
        if let Some(sort_key) = patch.sort_key {
            self.sort_key = sort_key;
        }
        if let Some(folder_filter) = patch.folder_filter {
            self.folder_filter = folder_filter;
        }
        if let Some(date_filter) = patch.date_filter {
            self.date_filter = date_filter;
        }
    }

    /// True if any filter (not the sort order) narrows the list
    pub fn is_filtered(&self) -> bool {
        !self.search_term.is_empty()
            || !self.folder_filter.is_empty()
            || self.date_filter != DateFilter::None
    }
}

/// Partial update of [`ViewState`]; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewStatePatch {
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub sort_key: Option<SortKey>,
    #[serde(default)]
    pub folder_filter: Option<String>,
    #[serde(default)]
    pub date_filter: Option<DateFilter>,
}

impl ViewStatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search<S: Into<String>>(mut self, term: S) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub fn folder<S: Into<String>>(mut self, path: S) -> Self {
        self.folder_filter = Some(path.into());
        self
    }

    pub fn date(mut self, filter: DateFilter) -> Self {
        self.date_filter = Some(filter);
        self
    }
}
