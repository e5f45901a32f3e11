use crate::http::{ApiError, ApiSuccess, AppState, ValidationErrors};
use crate::models::{
    AuthorIds, Book, BookStatus, BookTitle, CreateBookRequest, DeleteBookRequest, Price,
    UpdateBookRequest,
};
use crate::services::{AuthorService, BookService};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHttpRequest {
    title: String,
    price: i32,
    status: String,
    author_ids: Vec<i64>,
}

struct ParsedBook {
    title: BookTitle,
    price: Price,
    status: BookStatus,
    author_ids: AuthorIds,
}

impl BookHttpRequest {
    fn parse(self) -> Result<ParsedBook, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let title = errors.check("title", BookTitle::new(&self.title));
        let price = errors.check("price", Price::new(i64::from(self.price)));
        let status = errors.check("status", self.status.parse::<BookStatus>());
        let author_ids = errors.check("authorIds", AuthorIds::new(self.author_ids));
        match (title, price, status, author_ids) {
            (Some(title), Some(price), Some(status), Some(author_ids)) => Ok(ParsedBook {
                title,
                price,
                status,
                author_ids,
            }),
            _ => Err(errors),
        }
    }
}

impl TryFrom<BookHttpRequest> for CreateBookRequest {
    type Error = ValidationErrors;

    fn try_from(value: BookHttpRequest) -> Result<Self, Self::Error> {
        let book = value.parse()?;
        Ok(Self::new(book.title, book.price, book.status, book.author_ids))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHttpResponse {
    id: i64,
    title: String,
    price: i64,
    status: &'static str,
    author_ids: Vec<i64>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<Book> for BookHttpResponse {
    fn from(value: Book) -> Self {
        Self {
            id: value.id(),
            title: value.title().to_string(),
            price: value.price().value(),
            status: value.status().as_str(),
            author_ids: value.author_ids().to_vec(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

pub async fn create_book<AS: AuthorService, BS: BookService>(
    State(state): State<AppState<AS, BS>>,
    body: Result<Json<BookHttpRequest>, JsonRejection>,
) -> Result<ApiSuccess<BookHttpResponse>, ApiError> {
    let Json(body) = body?;
    let req = CreateBookRequest::try_from(body)?;
    let book = state.book_service.create_book(&req).await?;

    let location = format!("/api/books/{}", book.id());
    Ok(ApiSuccess::created(location, book.into()))
}

pub async fn update_book<AS: AuthorService, BS: BookService>(
    State(state): State<AppState<AS, BS>>,
    book_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<BookHttpRequest>, JsonRejection>,
) -> Result<ApiSuccess<BookHttpResponse>, ApiError> {
    let Path(book_id) = book_id?;
    let Json(body) = body?;
    let book = body.parse()?;
    let req = UpdateBookRequest::new(
        book_id,
        book.title,
        book.price,
        book.status,
        book.author_ids,
    );
    let book = state.book_service.update_book(&req).await?;

    Ok(ApiSuccess::ok(book.into()))
}

pub async fn delete_book<AS: AuthorService, BS: BookService>(
    State(state): State<AppState<AS, BS>>,
    book_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(book_id) = book_id?;
    state
        .book_service
        .delete_book(&DeleteBookRequest::new(book_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
