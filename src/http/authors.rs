use crate::http::books::BookHttpResponse;
use crate::http::{ApiError, ApiSuccess, AppState, ValidationErrors};
use crate::models::{
    Author, AuthorName, BirthDate, BookStatus, CreateAuthorRequest, DeleteAuthorRequest,
    FindAuthorBooksRequest, UpdateAuthorRequest,
};
use crate::services::{AuthorService, BookService};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorHttpRequest {
    name: String,
    birth_date: Date,
}

impl AuthorHttpRequest {
    fn parse(self) -> Result<(AuthorName, BirthDate), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = errors.check("name", AuthorName::new(&self.name));
        let birth_date = errors.check("birthDate", BirthDate::new(self.birth_date));
        match (name, birth_date) {
            (Some(name), Some(birth_date)) => Ok((name, birth_date)),
            _ => Err(errors),
        }
    }
}

impl TryFrom<AuthorHttpRequest> for CreateAuthorRequest {
    type Error = ValidationErrors;

    fn try_from(value: AuthorHttpRequest) -> Result<Self, Self::Error> {
        let (name, birth_date) = value.parse()?;
        Ok(Self::new(name, birth_date))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorHttpResponse {
    id: i64,
    name: String,
    birth_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<Author> for AuthorHttpResponse {
    fn from(value: Author) -> Self {
        Self {
            id: value.id(),
            name: value.name().to_string(),
            birth_date: value.birth_date().date(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthorBooksQuery {
    status: Option<String>,
}

pub async fn create_author<AS: AuthorService, BS: BookService>(
    State(state): State<AppState<AS, BS>>,
    body: Result<Json<AuthorHttpRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthorHttpResponse>, ApiError> {
    let Json(body) = body?;
    let req = CreateAuthorRequest::try_from(body)?;
    let author = state.author_service.create_author(&req).await?;

    let location = format!("/api/authors/{}", author.id());
    Ok(ApiSuccess::created(location, author.into()))
}

pub async fn update_author<AS: AuthorService, BS: BookService>(
    State(state): State<AppState<AS, BS>>,
    author_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<AuthorHttpRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthorHttpResponse>, ApiError> {
    let Path(author_id) = author_id?;
    let Json(body) = body?;
    let (name, birth_date) = body.parse()?;
    let req = UpdateAuthorRequest::new(author_id, name, birth_date);
    let author = state.author_service.update_author(&req).await?;

    Ok(ApiSuccess::ok(author.into()))
}

pub async fn delete_author<AS: AuthorService, BS: BookService>(
    State(state): State<AppState<AS, BS>>,
    author_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(author_id) = author_id?;
    state
        .author_service
        .delete_author(&DeleteAuthorRequest::new(author_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn find_author_books<AS: AuthorService, BS: BookService>(
    State(state): State<AppState<AS, BS>>,
    author_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<AuthorBooksQuery>, QueryRejection>,
) -> Result<ApiSuccess<Vec<BookHttpResponse>>, ApiError> {
    let Path(author_id) = author_id?;
    let Query(query) = query?;

    let mut req = FindAuthorBooksRequest::new(author_id);
    if let Some(raw) = query.status {
        let mut errors = ValidationErrors::default();
        match errors.check("status", raw.parse::<BookStatus>()) {
            Some(status) => req.set_status(status),
            None => return Err(errors.into()),
        }
    }

    let books = state.author_service.find_author_books(&req).await?;
    Ok(ApiSuccess::ok(books.into_iter().map(Into::into).collect()))
}
