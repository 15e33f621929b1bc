//! HTTP handlers and router

pub mod books;

use std::time::Duration;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let static_files = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/", get(|| async { Redirect::to("/books") }))
        .route("/books", get(books::list_books).post(books::search_books))
        .route("/books/new", get(books::new_book_form).post(books::create_book))
        .route("/books/:id", get(books::get_book).post(books::update_book))
        .route("/books/:id/delete", post(books::delete_book))
        .nest_service("/static", static_files)
        .fallback(not_found)
        .with_state(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

async fn not_found() -> AppError {
    AppError::NotFound("The page you are looking for does not exist.".to_string())
}
