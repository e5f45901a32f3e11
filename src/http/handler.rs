use crate::models::{
    CreateAuthorError, CreateBookError, DeleteAuthorError, DeleteBookError, FindAuthorBooksError,
    UpdateAuthorError, UpdateBookError,
};
use axum::extract::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug)]
pub struct ApiSuccess<T: Serialize> {
    status: StatusCode,
    location: Option<String>,
    body: Json<T>,
}

impl<T: Serialize> ApiSuccess<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            location: None,
            body: Json(data),
        }
    }

    pub const fn created(location: String, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            location: Some(location),
            body: Json(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> axum::response::Response {
        match self.location {
            Some(location) => (self.status, [(LOCATION, location)], self.body).into_response(),
            None => (self.status, self.body).into_response(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
    details: Vec<String>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            message: message.into(),
            details,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    InternalServerError(String),
    NotFound(String),
    BadRequest(String),
    Validation(Vec<String>),
}

impl ApiError {
    fn internal(cause: &anyhow::Error) -> Self {
        tracing::error!(error = ?cause, "request failed");
        Self::InternalServerError("Internal server error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            Self::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(msg, Vec::new()),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg, Vec::new())),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg, Vec::new())),
            Self::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Validation failed", details),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Error, Debug, Default)]
#[error("Validation failed")]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn check<T, E: std::fmt::Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.0.push(format!("{field}: {err}"));
                None
            }
        }
    }

    pub fn details(&self) -> &[String] {
        &self.0
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(err.0)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<CreateAuthorError> for ApiError {
    fn from(err: CreateAuthorError) -> Self {
        Self::internal(&err.0)
    }
}

impl From<UpdateAuthorError> for ApiError {
    fn from(err: UpdateAuthorError) -> Self {
        match err {
            UpdateAuthorError::NotFound { .. } => Self::NotFound(err.to_string()),
            UpdateAuthorError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<DeleteAuthorError> for ApiError {
    fn from(err: DeleteAuthorError) -> Self {
        match err {
            DeleteAuthorError::NotFound { .. } => Self::NotFound(err.to_string()),
            DeleteAuthorError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<FindAuthorBooksError> for ApiError {
    fn from(err: FindAuthorBooksError) -> Self {
        match err {
            FindAuthorBooksError::AuthorNotFound { .. } => Self::NotFound(err.to_string()),
            FindAuthorBooksError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<CreateBookError> for ApiError {
    fn from(err: CreateBookError) -> Self {
        match err {
            CreateBookError::AuthorsNotFound => Self::NotFound(err.to_string()),
            CreateBookError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<UpdateBookError> for ApiError {
    fn from(err: UpdateBookError) -> Self {
        match err {
            UpdateBookError::NotFound { .. } | UpdateBookError::AuthorsNotFound => {
                Self::NotFound(err.to_string())
            }
            UpdateBookError::StatusTransition(rule) => Self::BadRequest(rule.to_string()),
            UpdateBookError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<DeleteBookError> for ApiError {
    fn from(err: DeleteBookError) -> Self {
        match err {
            DeleteBookError::NotFound { .. } => Self::NotFound(err.to_string()),
            DeleteBookError::Other(cause) => Self::internal(&cause),
        }
    }
}
