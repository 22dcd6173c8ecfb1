// src/domain/repositories/query.rs
use crate::domain::bookmark::FlatBookmark;
use crate::domain::view_state::{DateFilter, SortKey, ViewState};
use std::cmp::Ordering;
use std::marker::PhantomData;

/*
   Filters are specifications: single-purpose predicates over a FlatBookmark that are
   composed with AND. Each one only exists in a query if its dimension is active, so an
   empty search term or folder filter never reaches the predicate chain.
*/

/// The Specification trait defines a predicate that determines if an entity matches criteria
pub trait Specification<T> {
    /// Check if an entity satisfies this specification
    fn is_satisfied_by(&self, entity: &T) -> bool;
}

impl<T> Specification<T> for Box<dyn Specification<T>> {
    fn is_satisfied_by(&self, entity: &T) -> bool {
        (**self).is_satisfied_by(entity)
    }
}

/// Combines specifications with logical AND
pub struct AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    spec_a: A,
    spec_b: B,
    _marker: PhantomData<T>,
}

impl<T, A, B> AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    pub fn new(spec_a: A, spec_b: B) -> Self {
        Self {
            spec_a,
            spec_b,
            _marker: PhantomData,
        }
    }
}

impl<T, A, B> Specification<T> for AndSpecification<T, A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        self.spec_a.is_satisfied_by(entity) && self.spec_b.is_satisfied_by(entity)
    }
}

/// Case-insensitive substring match on title, url, domain and folder path
pub struct TextSearchSpecification {
    query: String,
}

impl TextSearchSpecification {
    pub fn new<S: AsRef<str>>(query: S) -> Self {
        Self {
            query: query.as_ref().to_lowercase(),
        }
    }
}

impl Specification<FlatBookmark> for TextSearchSpecification {
    fn is_satisfied_by(&self, bookmark: &FlatBookmark) -> bool {
        if self.query.is_empty() {
            return true;
        }

        [
            &bookmark.title,
            &bookmark.url,
            &bookmark.domain,
            &bookmark.folder_path,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.query))
    }
}

/// Exact folder path match
pub struct FolderSpecification {
    path: String,
}

impl FolderSpecification {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self { path: path.into() }
    }
}

impl Specification<FlatBookmark> for FolderSpecification {
    fn is_satisfied_by(&self, bookmark: &FlatBookmark) -> bool {
        bookmark.folder_path == self.path
    }
}

/// Bookmarks added at or after a cutoff timestamp
pub struct AddedSinceSpecification {
    cutoff: i64,
}

impl AddedSinceSpecification {
    pub fn new(cutoff: i64) -> Self {
        Self { cutoff }
    }

    /// `None` when the filter is disabled
    pub fn from_filter(filter: DateFilter, now_millis: i64) -> Option<Self> {
        filter.cutoff(now_millis).map(Self::new)
    }
}

impl Specification<FlatBookmark> for AddedSinceSpecification {
    fn is_satisfied_by(&self, bookmark: &FlatBookmark) -> bool {
        bookmark.date_added >= self.cutoff
    }
}

/// Extension trait to make combining specifications more readable
pub trait SpecificationExt<T>: Specification<T> {
    /// Combine with another specification using AND
    fn and<S: Specification<T>>(self, other: S) -> AndSpecification<T, Self, S>
    where
        Self: Sized,
    {
        AndSpecification::new(self, other)
    }
}

impl<T, S> SpecificationExt<T> for S where S: Specification<T> {}

/// Locale-style string order: case-folded first, raw text as tie breaker
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl SortKey {
    /// Comparator for this key; equal elements compare `Equal` so a stable sort keeps their order
    pub fn compare(&self, a: &FlatBookmark, b: &FlatBookmark) -> Ordering {
        match self {
            SortKey::DateAsc => a.date_added.cmp(&b.date_added),
            SortKey::DateDesc => b.date_added.cmp(&a.date_added),
            SortKey::TitleAsc => locale_cmp(&a.title, &b.title),
            SortKey::TitleDesc => locale_cmp(&b.title, &a.title),
            SortKey::UrlAsc => locale_cmp(&a.url, &b.url),
            SortKey::UrlDesc => locale_cmp(&b.url, &a.url),
        }
    }
}

/// A query object that encapsulates the active filters and the sort order
pub struct BookmarkQuery {
    pub specification: Option<Box<dyn Specification<FlatBookmark>>>,
    pub sort_key: SortKey,
}

impl BookmarkQuery {
    pub fn new() -> Self {
        Self {
            specification: None,
            sort_key: SortKey::default(),
        }
    }

    /// Build the query for a view state, evaluating the date window against `now_millis`
    pub fn from_view_state(state: &ViewState, now_millis: i64) -> Self {
        let mut query = Self::new().with_sort_key(state.sort_key);

        if !state.search_term.is_empty() {
            query = query.and_specification(TextSearchSpecification::new(&state.search_term));
        }
        if !state.folder_filter.is_empty() {
            query = query.and_specification(FolderSpecification::new(state.folder_filter.clone()));
        }
        if let Some(spec) = AddedSinceSpecification::from_filter(state.date_filter, now_millis) {
            query = query.and_specification(spec);
        }

        query
    }

    /// AND `spec` onto whatever is already there
    pub fn and_specification<S>(mut self, spec: S) -> Self
    where
        S: Specification<FlatBookmark> + 'static,
    {
        let combined: Box<dyn Specification<FlatBookmark>> = match self.specification.take() {
            Some(existing) => Box::new(existing.and(spec)),
            None => Box::new(spec),
        };
        self.specification = Some(combined);
        self
    }

    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn matches(&self, bookmark: &FlatBookmark) -> bool {
        match &self.specification {
            Some(spec) => spec.is_satisfied_by(bookmark),
            None => true,
        }
    }

    /// Filter then stable-sort; the input order breaks ties
    pub fn execute(&self, bookmarks: &[FlatBookmark]) -> Vec<FlatBookmark> {
        let mut result: Vec<FlatBookmark> = bookmarks
            .iter()
            .filter(|bookmark| self.matches(bookmark))
            .cloned()
            .collect();
        result.sort_by(|a, b| self.sort_key.compare(a, b));
        result
    }
}

impl Default for BookmarkQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookmark::FlatBookmarkBuilder;
    use crate::domain::clock::MILLIS_PER_DAY;

    fn bookmark(id: &str, title: &str, url: &str, date_added: i64, folder: &str) -> FlatBookmark {
        FlatBookmarkBuilder::default()
            .id(id)
            .title(title)
            .url(url)
            .date_added(date_added)
            .folder_path(folder)
            .build()
            .unwrap()
    }

    #[test]
    fn given_mixed_case_query_when_text_search_then_matches_case_insensitively() {
        let spec = TextSearchSpecification::new("RuSt");

        assert!(spec.is_satisfied_by(&bookmark("1", "The Rust Book", "https://x.org", 0, "")));
        assert!(spec.is_satisfied_by(&bookmark("2", "x", "https://www.rust-lang.org", 0, "")));
        assert!(spec.is_satisfied_by(&bookmark("3", "x", "https://y.org", 0, "Dev > Rust")));
        assert!(!spec.is_satisfied_by(&bookmark("4", "Go", "https://go.dev", 0, "Dev")));
    }

    #[test]
    fn given_domain_only_match_when_text_search_then_matches() {
        let mut b = bookmark("1", "x", "https://y.org", 0, "");
        b.domain = "special.example".to_string();

        assert!(TextSearchSpecification::new("special").is_satisfied_by(&b));
    }

    #[test]
    fn given_folder_filter_when_match_then_requires_exact_path() {
        let spec = FolderSpecification::new("Work");

        assert!(spec.is_satisfied_by(&bookmark("1", "a", "https://a.com", 0, "Work")));
        assert!(!spec.is_satisfied_by(&bookmark("2", "a", "https://a.com", 0, "Work > Rust")));
        assert!(!spec.is_satisfied_by(&bookmark("3", "a", "https://a.com", 0, "")));
    }

    #[test]
    fn given_date_window_when_match_then_cutoff_is_inclusive() {
        let now = 100 * MILLIS_PER_DAY;
        let spec = AddedSinceSpecification::from_filter(DateFilter::Week, now).unwrap();

        assert!(spec.is_satisfied_by(&bookmark("1", "a", "u", now - 7 * MILLIS_PER_DAY, "")));
        assert!(!spec.is_satisfied_by(&bookmark("2", "a", "u", now - 7 * MILLIS_PER_DAY - 1, "")));
        assert!(AddedSinceSpecification::from_filter(DateFilter::None, now).is_none());
    }

    #[test]
    fn given_two_specifications_when_and_then_both_must_hold() {
        let spec = TextSearchSpecification::new("rust").and(FolderSpecification::new("Dev"));

        assert!(spec.is_satisfied_by(&bookmark("1", "Rust", "u", 0, "Dev")));
        assert!(!spec.is_satisfied_by(&bookmark("2", "Rust", "u", 0, "Home")));
        assert!(!spec.is_satisfied_by(&bookmark("3", "Go", "u", 0, "Dev")));
    }

    #[test]
    fn given_equal_dates_when_sort_date_desc_then_keeps_input_order() {
        let items = vec![
            bookmark("1", "first", "u1", 10, ""),
            bookmark("2", "second", "u2", 20, ""),
            bookmark("3", "third", "u3", 10, ""),
        ];

        let ids: Vec<_> = BookmarkQuery::new()
            .execute(&items)
            .into_iter()
            .map(|b| b.id)
            .collect();

        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn given_titles_when_sort_title_asc_then_ignores_case() {
        let items = vec![
            bookmark("1", "banana", "u", 0, ""),
            bookmark("2", "Apple", "u", 0, ""),
            bookmark("3", "cherry", "u", 0, ""),
        ];

        let titles: Vec<_> = BookmarkQuery::new()
            .with_sort_key(SortKey::TitleAsc)
            .execute(&items)
            .into_iter()
            .map(|b| b.title)
            .collect();

        assert_eq!(titles, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn given_urls_when_sort_url_desc_then_reverses_order() {
        let items = vec![
            bookmark("1", "t", "https://a.com", 0, ""),
            bookmark("2", "t", "https://c.com", 0, ""),
            bookmark("3", "t", "https://b.com", 0, ""),
        ];

        let urls: Vec<_> = BookmarkQuery::new()
            .with_sort_key(SortKey::UrlDesc)
            .execute(&items)
            .into_iter()
            .map(|b| b.url)
            .collect();

        assert_eq!(urls, vec!["https://c.com", "https://b.com", "https://a.com"]);
    }

    #[test]
    fn given_view_state_without_filters_when_build_query_then_matches_everything() {
        let query = BookmarkQuery::from_view_state(&ViewState::default(), 0);

        assert!(query.specification.is_none());
        assert!(query.matches(&bookmark("1", "a", "u", -5, "Anything")));
    }

    #[test]
    fn given_locale_cmp_when_only_case_differs_then_orders_deterministically() {
        assert_eq!(locale_cmp("abc", "ABD"), Ordering::Less);
        assert_ne!(locale_cmp("abc", "ABC"), Ordering::Equal);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }
}
