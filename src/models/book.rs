//! Book model

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Book record as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// May be empty
    pub genre: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw create/update form body. Every field is optional text until validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
}

/// Validated field set accepted by the repository
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct BookFields {
    #[validate(custom(function = "not_blank", message = "Please provide a Title"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Please provide an Author"))]
    pub author: String,
    pub genre: String,
    pub year: i32,
}

/// Rejects empty and whitespace-only text
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

const FIELD_ORDER: [&str; 4] = ["title", "author", "genre", "year"];

impl TryFrom<BookForm> for BookFields {
    type Error = AppError;

    /// Produce the strongly-typed field set, or one message per invalid field.
    fn try_from(form: BookForm) -> Result<Self, Self::Error> {
        // (position in FIELD_ORDER, message)
        let mut invalid: Vec<(usize, String)> = Vec::new();

        if form.genre.is_none() {
            invalid.push((2, "Please provide a Genre".to_string()));
        }

        let year = form
            .year
            .as_deref()
            .map(str::trim)
            .and_then(|year| year.parse::<i32>().ok());
        if year.is_none() {
            invalid.push((3, "Please provide a valid Year".to_string()));
        }

        let fields = BookFields {
            title: form.title.unwrap_or_default(),
            author: form.author.unwrap_or_default(),
            genre: form.genre.unwrap_or_default(),
            year: year.unwrap_or_default(),
        };

        if let Err(errors) = fields.validate() {
            for (field, field_errors) in errors.field_errors() {
                let name: &str = field.as_ref();
                let position = FIELD_ORDER
                    .iter()
                    .position(|f| *f == name)
                    .unwrap_or(FIELD_ORDER.len());
                for error in field_errors.iter() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", name));
                    invalid.push((position, message));
                }
            }
        }

        if invalid.is_empty() {
            return Ok(fields);
        }

        invalid.sort_by_key(|(position, _)| *position);
        Err(AppError::Validation(
            invalid.into_iter().map(|(_, message)| message).collect(),
        ))
    }
}

/// Plain data handed to the page renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookViewModel {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i32,
}

impl From<Book> for BookViewModel {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            genre: book.genre,
            year: book.year,
        }
    }
}
