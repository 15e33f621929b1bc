//! End-to-end tests against a running server

use reqwest::{redirect::Policy, Client, StatusCode};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

/// Create a book through the form and return its id by searching for the unique title
async fn create_book(client: &Client, title: &str) -> i64 {
    let response = client
        .post(format!("{}/books/new", BASE_URL))
        .form(&[("title", title), ("author", "Integration"), ("genre", "Test"), ("year", "1999")])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let html = response.text().await.expect("Failed to read response");
    assert!(html.contains("Successfully added book!"));

    let html = client
        .post(format!("{}/books", BASE_URL))
        .form(&[("searchInput", title)])
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read response");

    let marker = "href=\"/books/";
    let start = html.find(marker).expect("No book link in search results") + marker.len();
    let end = start + html[start..].find('"').expect("Unterminated link");
    html[start..end].parse().expect("Book id is not numeric")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_root_redirects() {
    let response = client()
        .get(format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/books");
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let response = client()
        .get(format!("{}/books?page=1", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let html = response.text().await.expect("Failed to read response");
    assert!(html.contains("<h1>Books</h1>"));
}

#[tokio::test]
#[ignore]
async fn test_create_update_delete_book() {
    let client = client();
    let id = create_book(&client, "Integration Round Trip").await;

    let response = client
        .post(format!("{}/books/{}", BASE_URL, id))
        .form(&[("title", "Integration Renamed"), ("author", "Integration"), ("genre", ""), ("year", "2001")])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let html = response.text().await.expect("Failed to read response");
    assert!(html.contains("Successfully updated book!"));
    assert!(html.contains("value=\"Integration Renamed\""));

    let response = client
        .post(format!("{}/books/{}/delete", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_create_with_empty_title_shows_error() {
    let response = client()
        .post(format!("{}/books/new", BASE_URL))
        .form(&[("title", ""), ("author", "Integration"), ("genre", "Test"), ("year", "1999")])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let html = response.text().await.expect("Failed to read response");
    assert!(html.contains("Please provide a Title"));
}

#[tokio::test]
#[ignore]
async fn test_search_without_input_is_bad_request() {
    let response = client()
        .post(format!("{}/books", BASE_URL))
        .form(&[("other", "x")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_unknown_route_is_not_found() {
    let response = client()
        .get(format!("{}/does/not/exist", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
