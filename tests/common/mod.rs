#![allow(dead_code)]

use book_manager::database::establish_pool;
use book_manager::models::{
    Author, AuthorIds, AuthorName, BirthDate, Book, BookStatus, BookTitle, CreateAuthorRequest,
    CreateBookRequest, Price,
};
use book_manager::services::{AuthorService, BookService, DefaultAuthorService, DefaultBookService};
use sqlx::SqlitePool;
use time::macros::datetime;
use time::{Date, OffsetDateTime};

pub async fn init_db() -> SqlitePool {
    establish_pool("sqlite::memory:", 1).await.unwrap()
}

pub async fn init_file_db(dir: &tempfile::TempDir, max_connections: u32) -> SqlitePool {
    let url = format!("sqlite://{}/books.db", dir.path().display());
    establish_pool(&url, max_connections).await.unwrap()
}

pub async fn services() -> (SqlitePool, DefaultAuthorService, DefaultBookService) {
    let pool = init_db().await;
    let authors = DefaultAuthorService::new(pool.clone());
    let books = DefaultBookService::new(pool.clone());
    (pool, authors, books)
}

pub async fn add_author(service: &DefaultAuthorService, name: &str, birth_date: Date) -> Author {
    let req = CreateAuthorRequest::new(
        AuthorName::new(name).unwrap(),
        BirthDate::new(birth_date).unwrap(),
    );
    service.create_author(&req).await.unwrap()
}

pub fn book_request(title: &str, price: i64, status: BookStatus, author_ids: &[i64]) -> CreateBookRequest {
    CreateBookRequest::new(
        BookTitle::new(title).unwrap(),
        Price::new(price).unwrap(),
        status,
        AuthorIds::new(author_ids.to_vec()).unwrap(),
    )
}

pub async fn add_book(
    service: &DefaultBookService,
    title: &str,
    status: BookStatus,
    author_ids: &[i64],
) -> Book {
    service
        .create_book(&book_request(title, 1000, status, author_ids))
        .await
        .unwrap()
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn stored_author_ids(pool: &SqlitePool, book_id: i64) -> Vec<i64> {
    sqlx::query_scalar("SELECT author_id FROM book_author WHERE book_id = ? ORDER BY author_id")
        .bind(book_id)
        .fetch_all(pool)
        .await
        .unwrap()
}

pub async fn stored_status(pool: &SqlitePool, book_id: i64) -> String {
    sqlx::query_scalar("SELECT status FROM book WHERE id = ?")
        .bind(book_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn backdate(pool: &SqlitePool, table: &str, id: i64) -> OffsetDateTime {
    let past = datetime!(2000-01-01 0:00 UTC);
    sqlx::query(&format!(
        "UPDATE {table} SET created_at = ?, updated_at = ? WHERE id = ?"
    ))
    .bind(past)
    .bind(past)
    .bind(id)
    .execute(pool)
    .await
    .unwrap();
    past
}
