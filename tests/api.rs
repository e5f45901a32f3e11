mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use book_manager::http::{AppState, router};
use book_manager::services::{DefaultAuthorService, DefaultBookService};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

async fn app() -> (SqlitePool, Router) {
    let pool = common::init_db().await;
    let state = AppState::new(
        DefaultAuthorService::new(pool.clone()),
        DefaultBookService::new(pool.clone()),
    );
    (pool, router(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, body) = send_with_headers(app, method, uri, body).await;
    (status, body)
}

async fn send_with_headers(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, header::HeaderMap, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

async fn create_author(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/authors",
        Some(json!({ "name": name, "birthDate": "1980-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_book_publication_flow() {
    let (pool, app) = app().await;

    let (status, headers, author) = send_with_headers(
        &app,
        Method::POST,
        "/api/authors",
        Some(json!({ "name": "Jane Doe", "birthDate": "1980-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(author["name"], "Jane Doe");
    assert_eq!(author["birthDate"], "1980-01-01");
    assert_eq!(author["createdAt"], author["updatedAt"]);
    let author_id = author["id"].as_i64().unwrap();
    assert_eq!(
        headers[header::LOCATION],
        format!("/api/authors/{author_id}").as_str()
    );

    let (status, headers, book) = send_with_headers(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({
            "title": "Go",
            "price": 1000,
            "status": "UNPUBLISHED",
            "authorIds": [author_id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["status"], "UNPUBLISHED");
    assert_eq!(book["authorIds"], json!([author_id]));
    let book_uri = format!("/api/books/{}", book["id"].as_i64().unwrap());
    assert_eq!(headers[header::LOCATION], book_uri.as_str());

    let published = json!({
        "title": "Go",
        "price": 1000,
        "status": "PUBLISHED",
        "authorIds": [author_id],
    });
    let (status, book) = send(&app, Method::PUT, &book_uri, Some(published)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["status"], "PUBLISHED");

    let unpublished = json!({
        "title": "Go",
        "price": 1000,
        "status": "UNPUBLISHED",
        "authorIds": [author_id],
    });
    let (status, error) = send(&app, Method::PUT, &book_uri, Some(unpublished)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error["message"],
        "Cannot change status from PUBLISHED to UNPUBLISHED"
    );
    assert_eq!(error["details"], json!([]));

    let book_id = book["id"].as_i64().unwrap();
    assert_eq!(common::stored_status(&pool, book_id).await, "PUBLISHED");
}

#[tokio::test]
async fn test_create_book_with_unknown_author() {
    let (pool, app) = app().await;

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({
            "title": "Go",
            "price": 1000,
            "status": "UNPUBLISHED",
            "authorIds": [999_999],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "One or more authors not found");
    assert_eq!(common::count_rows(&pool, "book").await, 0);
}

#[tokio::test]
async fn test_list_books_of_author_without_books() {
    let (_pool, app) = app().await;
    let author_id = create_author(&app, "Jane Doe").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/authors/{author_id}/books"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_books_of_author_by_status() {
    let (_pool, app) = app().await;
    let author_id = create_author(&app, "Jane Doe").await;
    for (title, status) in [("Published", "PUBLISHED"), ("Draft", "UNPUBLISHED")] {
        let (code, _) = send(
            &app,
            Method::POST,
            "/api/books",
            Some(json!({
                "title": title,
                "price": 500,
                "status": status,
                "authorIds": [author_id],
            })),
        )
        .await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let uri = format!("/api/authors/{author_id}/books");
    let (status, all) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["title"], "Published");
    assert_eq!(all[1]["title"], "Draft");

    let (status, published) = send(&app, Method::GET, &format!("{uri}?status=PUBLISHED"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published.as_array().unwrap().len(), 1);
    assert_eq!(published[0]["status"], "PUBLISHED");
    assert_eq!(published[0]["authorIds"], json!([author_id]));

    let (status, error) = send(&app, Method::GET, &format!("{uri}?status=DRAFT"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Validation failed");
}

#[tokio::test]
async fn test_list_books_of_unknown_author() {
    let (_pool, app) = app().await;

    let (status, error) = send(&app, Method::GET, "/api/authors/77/books", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "Author not found: 77");
}

#[tokio::test]
async fn test_author_validation_errors() {
    let (pool, app) = app().await;

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/authors",
        Some(json!({ "name": "  ", "birthDate": "9999-12-31" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Validation failed");
    let details = error["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0], "name: must not be blank");
    assert!(details[1].as_str().unwrap().starts_with("birthDate: "));
    assert_eq!(common::count_rows(&pool, "author").await, 0);
}

#[tokio::test]
async fn test_book_validation_errors() {
    let (_pool, app) = app().await;

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({
            "title": "",
            "price": -1,
            "status": "UNPUBLISHED",
            "authorIds": [],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error["details"],
        json!([
            "title: must not be blank",
            "price: must be greater than or equal to 0, got -1",
            "authorIds: must not be empty",
        ])
    );
}

#[tokio::test]
async fn test_price_out_of_int_range_is_bad_request() {
    let (pool, app) = app().await;
    let author_id = create_author(&app, "Jane Doe").await;

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({
            "title": "Go",
            "price": 2_147_483_648_i64,
            "status": "UNPUBLISHED",
            "authorIds": [author_id],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].is_string());
    assert_eq!(common::count_rows(&pool, "book").await, 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (_pool, app) = app().await;

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/authors",
        Some(json!({ "name": "Jane Doe" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].is_string());
}

#[tokio::test]
async fn test_update_and_delete_author() {
    let (_pool, app) = app().await;
    let author_id = create_author(&app, "Jane Doe").await;
    let uri = format!("/api/authors/{author_id}");

    let (status, author) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Jane Smith", "birthDate": "1990-05-15" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(author["id"], author_id);
    assert_eq!(author["name"], "Jane Smith");
    assert_eq!(author["birthDate"], "1990-05-15");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, error) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], format!("Author not found: {author_id}"));

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Jane Smith", "birthDate": "1990-05-15" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete_missing_book() {
    let (_pool, app) = app().await;
    let author_id = create_author(&app, "Jane Doe").await;

    let (status, error) = send(
        &app,
        Method::PUT,
        "/api/books/12345",
        Some(json!({
            "title": "Go",
            "price": 1000,
            "status": "PUBLISHED",
            "authorIds": [author_id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "Book not found: 12345");

    let (status, _) = send(&app, Method::DELETE, "/api/books/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (_pool, app) = app().await;

    let (status, error) = send(&app, Method::DELETE, "/api/books/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].is_string());
}
