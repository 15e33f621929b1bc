//! Repository layer for database operations

pub mod books;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookFields},
    query::{PageWindow, SearchFilter},
};

/// Persistence of book records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, fields: &BookFields) -> AppResult<Book>;

    /// `AppError::NotFound` when no row has this id
    async fn get_by_id(&self, id: i32) -> AppResult<Book>;

    async fn get_all(&self) -> AppResult<Vec<Book>>;

    /// Ordered slice of the catalog; empty past the end of the table
    async fn get_page(&self, window: PageWindow) -> AppResult<Vec<Book>>;

    async fn count(&self) -> AppResult<i64>;

    async fn search(&self, filter: &SearchFilter, window: Option<PageWindow>) -> AppResult<Vec<Book>>;

    /// Replace all fields of an existing book
    async fn update(&self, id: i32, fields: &BookFields) -> AppResult<Book>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            pool,
        }
    }

    /// Close every pooled connection. Called once on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
