use thiserror::Error;
use time::{Date, OffsetDateTime};

use super::BookStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(raw: &str) -> Result<Self, AuthorNameEmptyError> {
        if raw.trim().is_empty() {
            Err(AuthorNameEmptyError)
        } else {
            Ok(Self(raw.into()))
        }
    }

    pub const fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuthorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
#[error("must not be blank")]
pub struct AuthorNameEmptyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate(Date);

impl BirthDate {
    pub fn new(date: Date) -> Result<Self, BirthDateInFutureError> {
        Self::new_as_of(date, OffsetDateTime::now_utc().date())
    }

    pub fn new_as_of(date: Date, today: Date) -> Result<Self, BirthDateInFutureError> {
        if date > today {
            Err(BirthDateInFutureError(date))
        } else {
            Ok(Self(date))
        }
    }

    pub const fn new_unchecked(date: Date) -> Self {
        Self(date)
    }

    pub const fn date(&self) -> Date {
        self.0
    }
}

#[derive(Error, Debug)]
#[error("must be a date in the past or in the present, got {0}")]
pub struct BirthDateInFutureError(Date);

#[derive(Debug, Clone)]
pub struct Author {
    id: i64,
    name: AuthorName,
    birth_date: BirthDate,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Author {
    pub const fn new(
        id: i64,
        name: AuthorName,
        birth_date: BirthDate,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name,
            birth_date,
            created_at,
            updated_at,
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub const fn name(&self) -> &AuthorName {
        &self.name
    }

    pub const fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }
}

#[derive(Debug)]
pub struct CreateAuthorRequest {
    name: AuthorName,
    birth_date: BirthDate,
}

impl CreateAuthorRequest {
    pub const fn new(name: AuthorName, birth_date: BirthDate) -> Self {
        Self { name, birth_date }
    }

    pub const fn name(&self) -> &AuthorName {
        &self.name
    }

    pub const fn birth_date(&self) -> BirthDate {
        self.birth_date
    }
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct CreateAuthorError(#[from] pub anyhow::Error);

#[derive(Debug)]
pub struct UpdateAuthorRequest {
    id: i64,
    name: AuthorName,
    birth_date: BirthDate,
}

impl UpdateAuthorRequest {
    pub const fn new(id: i64, name: AuthorName, birth_date: BirthDate) -> Self {
        Self {
            id,
            name,
            birth_date,
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub const fn name(&self) -> &AuthorName {
        &self.name
    }

    pub const fn birth_date(&self) -> BirthDate {
        self.birth_date
    }
}

#[derive(Error, Debug)]
pub enum UpdateAuthorError {
    #[error("Author not found: {id}")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct DeleteAuthorRequest {
    id: i64,
}

impl DeleteAuthorRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum DeleteAuthorError {
    #[error("Author not found: {id}")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct FindAuthorBooksRequest {
    author_id: i64,
    status: Option<BookStatus>,
}

impl FindAuthorBooksRequest {
    pub const fn new(author_id: i64) -> Self {
        Self {
            author_id,
            status: None,
        }
    }

    pub const fn author_id(&self) -> i64 {
        self.author_id
    }

    pub const fn status(&self) -> Option<BookStatus> {
        self.status
    }

    pub fn set_status(&mut self, status: BookStatus) {
        self.status = Some(status);
    }
}

#[derive(Error, Debug)]
pub enum FindAuthorBooksError {
    #[error("Author not found: {id}")]
    AuthorNotFound { id: i64 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
