//! Catalog management service

use std::sync::Arc;

use crate::{
    config::CatalogConfig,
    error::AppResult,
    models::{Book, BookFields, BookForm},
    query::{self, MatchCase, Pagination, SearchFilter},
    repository::BookStore,
};

/// One page of the catalog listing
#[derive(Debug, Clone)]
pub struct BookListing {
    pub books: Vec<Book>,
    /// Page numbers to link
    pub pages: Vec<i64>,
    /// Page actually served
    pub page: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    books: Arc<dyn BookStore>,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(books: Arc<dyn BookStore>, config: CatalogConfig) -> Self {
        Self { books, config }
    }

    fn match_case(&self) -> MatchCase {
        if self.config.case_insensitive_search {
            MatchCase::Insensitive
        } else {
            MatchCase::Sensitive
        }
    }

    /// List one page of books along with the page links
    pub async fn list_books(&self, page: Option<&str>) -> AppResult<BookListing> {
        let pagination = Pagination::from_param(page);
        let window = pagination.window(self.config.offset_policy);
        tracing::debug!(
            "Listing page {} (offset {}, limit {})",
            pagination.page(),
            window.offset,
            window.limit
        );

        let books = self.books.get_page(window).await?;
        let total = self.books.count().await?;

        Ok(BookListing {
            books,
            pages: query::page_links(total, self.config.page_count_policy),
            page: pagination.page(),
        })
    }

    /// Search title, author, genre and year. Results are unpaginated unless a
    /// `page` is also given.
    pub async fn search(&self, input: Option<&str>, page: Option<&str>) -> AppResult<Vec<Book>> {
        let filter = SearchFilter::from_input(input, self.match_case())?;
        let window = page.map(|p| Pagination::from_param(Some(p)).window(self.config.offset_policy));
        tracing::debug!("Searching books for {:?} (window {:?})", filter.term(), window);

        self.books.search(&filter, window).await
    }

    pub async fn create(&self, form: BookForm) -> AppResult<Book> {
        let fields = BookFields::try_from(form)?;
        let book = self.books.create(&fields).await?;
        tracing::info!("Created book id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.books.get_by_id(id).await
    }

    /// Replace every field of an existing book. A missing id is reported
    /// before the form is validated.
    pub async fn update(&self, id: i32, form: BookForm) -> AppResult<Book> {
        self.books.get_by_id(id).await?;
        let fields = BookFields::try_from(form)?;
        let book = self.books.update(id, &fields).await?;
        tracing::info!("Updated book id={}", book.id);
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.books.delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    pub async fn all_books(&self) -> AppResult<Vec<Book>> {
        self.books.get_all().await
    }
}
