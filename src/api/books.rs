//! Book catalog pages

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::BookForm,
    views::{self, BookFormView, IndexView},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(rename = "searchInput")]
    pub search_input: Option<String>,
    /// Restrict results to one page
    pub page: Option<String>,
}

/// Ids that do not parse cannot match any book
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::NotFound(format!("Book {} not found", raw)))
}

/// Paginated list of books
pub async fn list_books(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListParams>, AppError>,
) -> AppResult<Html<String>> {
    let listing = state.services.catalog.list_books(params.page.as_deref()).await?;

    Ok(views::index_page(&IndexView {
        books: listing.books.into_iter().map(Into::into).collect(),
        pages: Some(listing.pages),
        current_page: Some(listing.page),
        search: None,
    }))
}

/// Search by title, author, genre or year
pub async fn search_books(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<SearchForm>, AppError>,
) -> AppResult<Html<String>> {
    let books = state
        .services
        .catalog
        .search(form.search_input.as_deref(), form.page.as_deref())
        .await?;

    Ok(views::index_page(&IndexView {
        books: books.into_iter().map(Into::into).collect(),
        pages: None,
        current_page: None,
        search: form.search_input,
    }))
}

pub async fn new_book_form() -> Html<String> {
    views::book_form_page(&BookFormView::new_book())
}

/// Create a book, re-rendering the form with the outcome
pub async fn create_book(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<BookForm>, AppError>,
) -> AppResult<Html<String>> {
    let view = match state.services.catalog.create(form.clone()).await {
        Ok(_) => BookFormView::new_book().with_success("Successfully added book!"),
        Err(AppError::Validation(errors)) => BookFormView {
            book: form.into(),
            ..BookFormView::new_book()
        }
        .with_errors(errors),
        Err(e) => return Err(e),
    };
    Ok(views::book_form_page(&view))
}

/// Book detail / edit form
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id)?;
    let book = state.services.catalog.get_book(id).await?;
    Ok(views::book_form_page(&BookFormView::edit(id, book)))
}

/// Replace every field of a book
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Form(form), _): WithRejection<Form<BookForm>, AppError>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id)?;
    let view = match state.services.catalog.update(id, form.clone()).await {
        Ok(book) => BookFormView::edit(id, book).with_success("Successfully updated book!"),
        Err(AppError::Validation(errors)) => BookFormView::edit(id, form).with_errors(errors),
        Err(e) => return Err(e),
    };
    Ok(views::book_form_page(&view))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let id = parse_id(&id)?;
    state.services.catalog.delete(id).await?;
    Ok(Redirect::to("/books"))
}
