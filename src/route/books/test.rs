use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{
    book::Book, error::ErrorVerbosity, route, state::ApiState, store::MemoryBookStore,
};

const ISBN: &str = "123432122";

fn test_book() -> Book {
    Book {
        isbn: ISBN.to_string(),
        amazon_url: "https://amazon.com/taco".to_string(),
        author: "Elie".to_string(),
        language: "English".to_string(),
        pages: 100,
        publisher: "Nothing publishers".to_string(),
        title: "my first book".to_string(),
        year: 2008,
    }
}

fn new_book() -> Value {
    json!({
        "isbn": "2293819",
        "amazon_url": "http://test.com",
        "author": "Ethan Degenhardt",
        "language": "russian",
        "pages": 500,
        "publisher": "great",
        "title": "this book",
        "year": 2020
    })
}

fn book_update() -> Value {
    json!({
        "amazon_url": "http://test.com",
        "author": "Ethan Degenhardt",
        "language": "russian",
        "pages": 500,
        "publisher": "great",
        "title": "this book",
        "year": 2020
    })
}

fn app() -> Router {
    let store = MemoryBookStore::with_books(vec![test_book()]);
    let state = ApiState::new(ErrorVerbosity::Message, Box::new(store));

    route::app(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

fn violations(body: &Value) -> Vec<String> {
    serde_json::from_value(body["error"]["message"].clone()).expect("Message is a list")
}

#[tokio::test]
async fn list_books() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [test_book()] }));
}

#[tokio::test]
async fn list_books_of_empty_store() {
    let state = ApiState::new(ErrorVerbosity::Message, Box::new(MemoryBookStore::new()));
    let app = route::app(state);

    let (status, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [] }));
}

#[tokio::test]
async fn get_book() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books/123432122", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": test_book() }));
}

#[tokio::test]
async fn get_missing_book() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books/111", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "error": { "message": "There is no book with an isbn of '111'", "status": 404 } })
    );
}

#[tokio::test]
async fn create_book_then_get_it() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/books", Some(new_book())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "book": new_book() }));

    let (status, body) = send(&app, Method::GET, "/books/2293819", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": new_book() }));

    let (_, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(body["books"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn create_book_missing_title() {
    let app = app();
    let mut payload = new_book();
    payload.as_object_mut().unwrap().remove("title");

    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], 400);
    assert_eq!(violations(&body), vec!["instance requires property \"title\""]);

    let (status, _) = send(&app, Method::GET, "/books/2293819", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_book_reports_every_violation() {
    let app = app();
    let payload = json!({
        "isbn": 2293819,
        "amazon_url": "http://test.com",
        "language": "russian",
        "pages": "500",
        "publisher": "great",
        "title": "this book",
        "year": 2020
    });

    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        violations(&body),
        vec![
            "instance.isbn is not of a type(s) string",
            "instance requires property \"author\"",
            "instance.pages is not of a type(s) integer",
        ]
    );
}

#[tokio::test]
async fn create_book_with_empty_fields() {
    let app = app();
    let mut payload = new_book();
    payload["isbn"] = json!("");
    payload["pages"] = json!(0);

    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        violations(&body),
        vec![
            "instance.isbn must not be empty",
            "instance.pages must be greater than or equal to 1",
        ]
    );
}

#[tokio::test]
async fn create_book_with_malformed_json() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"isbn\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_duplicate_book() {
    let app = app();
    let payload = serde_json::to_value(test_book()).unwrap();

    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["status"], 409);
}

#[tokio::test]
async fn update_book() {
    let app = app();

    let (status, body) = send(&app, Method::PUT, "/books/123432122", Some(book_update())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["isbn"], ISBN);
    assert_eq!(body["book"]["title"], "this book");

    let (status, body) = send(&app, Method::GET, "/books/123432122", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["title"], "this book");
    assert_eq!(body["book"]["author"], "Ethan Degenhardt");
}

#[tokio::test]
async fn update_missing_book() {
    let app = app();

    let (status, body) = send(&app, Method::PUT, "/books/999999", Some(book_update())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["status"], 404);
}

#[tokio::test]
async fn update_missing_book_with_invalid_payload() {
    let app = app();

    let (status, body) = send(&app, Method::PUT, "/books/999999", Some(json!({ "title": 5 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], 400);
    assert_eq!(
        violations(&body),
        vec![
            "instance requires property \"amazon_url\"",
            "instance requires property \"author\"",
            "instance requires property \"language\"",
            "instance requires property \"pages\"",
            "instance requires property \"publisher\"",
            "instance.title is not of a type(s) string",
            "instance requires property \"year\"",
        ]
    );

    let (_, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(body, json!({ "books": [test_book()] }));
}

#[tokio::test]
async fn create_book_with_integral_float_pages() {
    let app = app();
    let mut payload = new_book();
    payload["pages"] = json!(500.0);

    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "book": new_book() }));
}

#[tokio::test]
async fn update_book_can_not_change_isbn() {
    let app = app();
    let mut payload = book_update();
    payload["isbn"] = json!("42");

    let (status, body) = send(&app, Method::PUT, "/books/123432122", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        violations(&body),
        vec!["instance is not allowed to have the additional property \"isbn\""]
    );

    let (_, body) = send(&app, Method::GET, "/books/123432122", None).await;

    assert_eq!(body, json!({ "book": test_book() }));
}

#[tokio::test]
async fn delete_book() {
    let app = app();

    let (status, body) = send(&app, Method::DELETE, "/books/123432122", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book deleted" }));

    let (status, _) = send(&app, Method::GET, "/books/123432122", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_book() {
    let app = app();

    let (status, _) = send(&app, Method::DELETE, "/books/123422", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/books", None).await;

    assert_eq!(body, json!({ "books": [test_book()] }));
}

#[tokio::test]
async fn unknown_route() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/authors", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": { "message": "Not Found", "status": 404 } }));
}

#[tokio::test]
async fn method_not_allowed() {
    let app = app();

    let (status, body) = send(&app, Method::PATCH, "/books/123432122", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"]["status"], 405);
}
