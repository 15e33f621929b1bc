use std::fmt::Write;

use axum::{http::StatusCode, response::Html};

use super::{escape, layout};
use crate::models::{Book, BookForm, BookViewModel};

/// Catalog listing, either one page of the catalog or a set of search hits
#[derive(Debug, Clone, Default)]
pub struct IndexView {
    pub books: Vec<BookViewModel>,
    /// Page links; `None` for search results
    pub pages: Option<Vec<i64>>,
    pub current_page: Option<i64>,
    /// Term the listing was filtered by
    pub search: Option<String>,
}

/// Field values shown in the create/update form. Kept as text so rejected
/// input can be shown back to the user unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFormValues {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
}

impl From<BookViewModel> for BookFormValues {
    fn from(book: BookViewModel) -> Self {
        Self {
            title: book.title,
            author: book.author,
            genre: book.genre,
            year: book.year.to_string(),
        }
    }
}

impl From<Book> for BookFormValues {
    fn from(book: Book) -> Self {
        BookViewModel::from(book).into()
    }
}

impl From<BookForm> for BookFormValues {
    fn from(form: BookForm) -> Self {
        Self {
            title: form.title.unwrap_or_default(),
            author: form.author.unwrap_or_default(),
            genre: form.genre.unwrap_or_default(),
            year: form.year.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    New,
    Edit { id: i32 },
}

#[derive(Debug, Clone)]
pub struct BookFormView {
    pub mode: FormMode,
    pub book: BookFormValues,
    pub success: Option<String>,
    pub errors: Vec<String>,
}

impl BookFormView {
    pub fn new_book() -> Self {
        Self {
            mode: FormMode::New,
            book: BookFormValues::default(),
            success: None,
            errors: Vec::new(),
        }
    }

    pub fn edit(id: i32, book: impl Into<BookFormValues>) -> Self {
        Self {
            mode: FormMode::Edit { id },
            book: book.into(),
            success: None,
            errors: Vec::new(),
        }
    }

    pub fn with_success(mut self, message: &str) -> Self {
        self.success = Some(message.to_string());
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

pub fn index_page(view: &IndexView) -> Html<String> {
    let mut body = String::new();
    body.push_str("<h1>Books</h1>\n");
    body.push_str(r#"<p><a class="button" href="/books/new">Create New Book</a></p>"#);
    body.push('\n');

    let _ = write!(
        body,
        r#"<form class="search" action="/books" method="post">
<input type="search" name="searchInput" placeholder="Search by title, author, genre or year" value="{}">
<input type="submit" value="Search" class="button">
</form>
"#,
        escape(view.search.as_deref().unwrap_or_default())
    );

    if let Some(term) = &view.search {
        let _ = writeln!(
            body,
            r#"<p>{} result(s) for &quot;{}&quot;. <a href="/books">Show all books</a></p>"#,
            view.books.len(),
            escape(term)
        );
    }

    if view.books.is_empty() {
        body.push_str("<p>No books found.</p>\n");
    } else {
        body.push_str("<table>\n<thead>\n<tr><th>Title</th><th>Author</th><th>Genre</th><th>Year</th></tr>\n</thead>\n<tbody>\n");
        for book in &view.books {
            let _ = writeln!(
                body,
                r#"<tr><td><a href="/books/{}">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                book.id,
                escape(&book.title),
                escape(&book.author),
                escape(&book.genre),
                book.year
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    if let Some(pages) = view.pages.as_ref().filter(|pages| !pages.is_empty()) {
        body.push_str(r#"<ul class="pagination">"#);
        body.push('\n');
        for page in pages {
            let class = if view.current_page == Some(*page) { r#" class="active""# } else { "" };
            let _ = writeln!(body, r#"<li{}><a href="/books?page={}">{}</a></li>"#, class, page, page);
        }
        body.push_str("</ul>\n");
    }

    Html(layout("Books", &body))
}

pub fn book_form_page(view: &BookFormView) -> Html<String> {
    let (heading, action, submit) = match view.mode {
        FormMode::New => ("New Book", "/books/new".to_string(), "Create New Book"),
        FormMode::Edit { id } => ("Update Book", format!("/books/{}", id), "Update Book"),
    };

    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", heading);

    if let Some(success) = &view.success {
        let _ = writeln!(body, r#"<p class="success">{}</p>"#, escape(success));
    }

    if !view.errors.is_empty() {
        body.push_str("<div class=\"errors\">\n<h2>Oooops!</h2>\n<ul>\n");
        for error in &view.errors {
            let _ = writeln!(body, "<li>{}</li>", escape(error));
        }
        body.push_str("</ul>\n</div>\n");
    }

    let _ = writeln!(body, r#"<form action="{}" method="post">"#, action);
    for (name, label, value) in [
        ("title", "Title", &view.book.title),
        ("author", "Author", &view.book.author),
        ("genre", "Genre", &view.book.genre),
        ("year", "Year", &view.book.year),
    ] {
        let _ = writeln!(
            body,
            r#"<p><label for="{name}">{label}</label><input name="{name}" type="text" id="{name}" value="{value}"></p>"#,
            name = name,
            label = label,
            value = escape(value),
        );
    }
    let _ = writeln!(
        body,
        r#"<p><input type="submit" value="{}" class="button"> <a class="button" href="/books">Cancel</a></p>"#,
        submit
    );
    body.push_str("</form>\n");

    if let FormMode::Edit { id } = view.mode {
        let _ = writeln!(
            body,
            r#"<form action="/books/{}/delete" method="post"><p><input type="submit" value="Delete Book" class="button"></p></form>"#,
            id
        );
    }

    Html(layout(heading, &body))
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let heading = if status == StatusCode::NOT_FOUND {
        "Page Not Found"
    } else {
        status.canonical_reason().unwrap_or("Error")
    };

    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape(heading));
    let _ = writeln!(body, "<p>{}</p>", escape(message));
    let _ = writeln!(body, "<p>Status code {}</p>", status.as_u16());
    body.push_str(r#"<p><a href="/books">Back to the catalog</a></p>"#);
    body.push('\n');

    Html(layout(heading, &body))
}
