//! Query construction for book listing and search.
//!
//! Turns request parameters (a `page` number, a free-text search term) into a
//! filter predicate plus a pagination window, and renders both as
//! parameterised SQL for the repository.

use sqlx::{Postgres, QueryBuilder};

use crate::{
    config::{OffsetPolicy, PageCountPolicy},
    error::{AppError, AppResult},
};

/// Records per page
pub const PAGE_SIZE: i64 = 5;

const SELECT_BOOKS: &str = "SELECT id, title, author, genre, year, created_at, updated_at FROM books";

/// Window of an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Requested page, always `>= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
}

impl Pagination {
    /// Parse the raw `page` parameter. Absent, non-numeric and non-positive
    /// values all fall back to page 1.
    pub fn from_param(param: Option<&str>) -> Self {
        let page = param
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        Self { page }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn window(&self, policy: OffsetPolicy) -> PageWindow {
        let pages_skipped = match policy {
            OffsetPolicy::PageTimesSize => self.page,
            OffsetPolicy::PreviousPageTimesSize => self.page - 1,
        };
        PageWindow {
            offset: pages_skipped.saturating_mul(PAGE_SIZE),
            limit: PAGE_SIZE,
        }
    }
}

/// Page numbers to link from the listing, `1..=count`
pub fn page_links(total: i64, policy: PageCountPolicy) -> Vec<i64> {
    let total = total.max(0);
    let count = match policy {
        PageCountPolicy::Floor => total / PAGE_SIZE,
        PageCountPolicy::Round => ((total as f64) / (PAGE_SIZE as f64)).round() as i64,
    };
    (1..=count).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCase {
    Sensitive,
    Insensitive,
}

impl MatchCase {
    fn operator(self) -> &'static str {
        match self {
            MatchCase::Sensitive => "LIKE",
            MatchCase::Insensitive => "ILIKE",
        }
    }
}

/// Columns a search term is matched against. `year` is compared through its
/// decimal text.
const SEARCH_COLUMNS: [&str; 4] = ["title", "author", "genre", "CAST(year AS TEXT)"];

/// Free-text filter: a book matches when the term is a substring of its
/// title, author, genre or year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    term: String,
    match_case: MatchCase,
}

impl SearchFilter {
    pub fn new(term: impl Into<String>, match_case: MatchCase) -> Self {
        Self {
            term: term.into(),
            match_case,
        }
    }

    /// Build a filter from the submitted `searchInput` field
    pub fn from_input(input: Option<&str>, match_case: MatchCase) -> AppResult<Self> {
        input
            .map(|term| Self::new(term, match_case))
            .ok_or_else(|| AppError::BadRequest("Missing search input".to_string()))
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn match_case(&self) -> MatchCase {
        self.match_case
    }

    /// `LIKE` pattern with wildcards in the term escaped
    pub fn pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.term.len() + 2);
        pattern.push('%');
        for c in self.term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Append the `( ... OR ... )` predicate to a query
    pub fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        let operator = self.match_case.operator();
        let pattern = self.pattern();

        builder.push("(");
        for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder
                .push(column)
                .push(" ")
                .push(operator)
                .push(" ")
                .push_bind(pattern.clone());
        }
        builder.push(")");
    }
}

fn push_window(builder: &mut QueryBuilder<'_, Postgres>, window: PageWindow) {
    builder
        .push(" LIMIT ")
        .push_bind(window.limit)
        .push(" OFFSET ")
        .push_bind(window.offset);
}

/// `SELECT` for one page of the catalog, in id order
pub fn page_query(window: PageWindow) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_BOOKS);
    builder.push(" ORDER BY id");
    push_window(&mut builder, window);
    builder
}

/// `SELECT` for every book matching `filter`, in id order, optionally windowed
pub fn search_query(filter: &SearchFilter, window: Option<PageWindow>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_BOOKS);
    builder.push(" WHERE ");
    filter.push_predicate(&mut builder);
    builder.push(" ORDER BY id");
    if let Some(window) = window {
        push_window(&mut builder, window);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_to_one() {
        assert_eq!(Pagination::from_param(None).page(), 1);
        assert_eq!(Pagination::from_param(Some("abc")).page(), 1);
        assert_eq!(Pagination::from_param(Some("")).page(), 1);
        assert_eq!(Pagination::from_param(Some("0")).page(), 1);
        assert_eq!(Pagination::from_param(Some("-3")).page(), 1);
        assert_eq!(Pagination::from_param(Some("3")).page(), 3);
    }

    #[test]
    fn test_page_times_size_skips_first_page() {
        let window = Pagination::from_param(Some("1")).window(OffsetPolicy::PageTimesSize);
        assert_eq!(window, PageWindow { offset: 5, limit: 5 });

        let window = Pagination::from_param(Some("2")).window(OffsetPolicy::PageTimesSize);
        assert_eq!(window, PageWindow { offset: 10, limit: 5 });
    }

    #[test]
    fn test_previous_page_times_size_starts_at_zero() {
        let window = Pagination::from_param(None).window(OffsetPolicy::PreviousPageTimesSize);
        assert_eq!(window, PageWindow { offset: 0, limit: 5 });

        let window = Pagination::from_param(Some("3")).window(OffsetPolicy::PreviousPageTimesSize);
        assert_eq!(window, PageWindow { offset: 10, limit: 5 });
    }

    #[test]
    fn test_huge_page_saturates() {
        let max = i64::MAX.to_string();
        let window = Pagination::from_param(Some(max.as_str())).window(OffsetPolicy::PageTimesSize);
        assert_eq!(window.offset, i64::MAX);
    }

    #[test]
    fn test_page_links_floor() {
        assert_eq!(page_links(0, PageCountPolicy::Floor), Vec::<i64>::new());
        assert_eq!(page_links(4, PageCountPolicy::Floor), Vec::<i64>::new());
        assert_eq!(page_links(12, PageCountPolicy::Floor), vec![1, 2]);
        assert_eq!(page_links(13, PageCountPolicy::Floor), vec![1, 2]);
        assert_eq!(page_links(15, PageCountPolicy::Floor), vec![1, 2, 3]);
    }

    #[test]
    fn test_page_links_round_diverges_past_half_page() {
        assert_eq!(page_links(12, PageCountPolicy::Round), vec![1, 2]);
        assert_eq!(page_links(13, PageCountPolicy::Round), vec![1, 2, 3]);
        assert_eq!(page_links(3, PageCountPolicy::Round), vec![1]);
    }

    #[test]
    fn test_missing_search_input_is_bad_request() {
        let result = SearchFilter::from_input(None, MatchCase::Insensitive);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_pattern_escapes_wildcards() {
        assert_eq!(SearchFilter::new("Dune", MatchCase::Sensitive).pattern(), "%Dune%");
        assert_eq!(SearchFilter::new("100%", MatchCase::Sensitive).pattern(), "%100\\%%");
        assert_eq!(SearchFilter::new("a_b\\c", MatchCase::Sensitive).pattern(), "%a\\_b\\\\c%");
        assert_eq!(SearchFilter::new("", MatchCase::Sensitive).pattern(), "%%");
    }

    #[test]
    fn test_search_query_sql() {
        let filter = SearchFilter::new("e", MatchCase::Insensitive);
        let builder = search_query(&filter, None);
        assert_eq!(
            builder.sql(),
            "SELECT id, title, author, genre, year, created_at, updated_at FROM books \
             WHERE (title ILIKE $1 OR author ILIKE $2 OR genre ILIKE $3 OR CAST(year AS TEXT) ILIKE $4) \
             ORDER BY id"
        );
    }

    #[test]
    fn test_search_query_composes_with_window() {
        let filter = SearchFilter::new("e", MatchCase::Sensitive);
        let builder = search_query(&filter, Some(PageWindow { offset: 5, limit: 5 }));
        assert!(builder.sql().contains("title LIKE $1"));
        assert!(builder.sql().ends_with("ORDER BY id LIMIT $5 OFFSET $6"));
    }

    #[test]
    fn test_page_query_sql() {
        let builder = page_query(PageWindow { offset: 5, limit: 5 });
        assert_eq!(
            builder.sql(),
            "SELECT id, title, author, genre, year, created_at, updated_at FROM books \
             ORDER BY id LIMIT $1 OFFSET $2"
        );
    }
}
