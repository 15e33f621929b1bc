//! Server-rendered HTML pages
//!
//! Every page is built from a plain view-model and wrapped in the shared
//! layout. All interpolated text goes through [`escape`].

mod pages;

pub use pages::{book_form_page, error_page, index_page, BookFormValues, BookFormView, FormMode, IndexView};

use std::fmt::Write;

/// Escape text for use in element content and quoted attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/stylesheets/style.css">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    );
    html
}
