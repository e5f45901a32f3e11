use std::str::FromStr;

use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(raw: &str) -> Result<Self, BookTitleEmptyError> {
        if raw.trim().is_empty() {
            Err(BookTitleEmptyError)
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

impl std::fmt::Display for BookTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
#[error("must not be blank")]
pub struct BookTitleEmptyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(i64);

impl Price {
    pub fn new(raw: i64) -> Result<Self, NegativePriceError> {
        if raw < 0 {
            Err(NegativePriceError(raw))
        } else {
            Ok(Self(raw))
        }
    }

    pub const fn new_unchecked(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

#[derive(Error, Debug)]
#[error("must be greater than or equal to 0, got {0}")]
pub struct NegativePriceError(i64);

// Once published, a book stays published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookStatus {
    Unpublished,
    Published,
}

impl BookStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unpublished => "UNPUBLISHED",
            Self::Published => "PUBLISHED",
        }
    }

    pub fn transition_to(self, next: Self) -> Result<Self, StatusTransitionError> {
        match (self, next) {
            (Self::Published, Self::Unpublished) => Err(StatusTransitionError {
                from: self,
                to: next,
            }),
            _ => Ok(next),
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = UnknownBookStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNPUBLISHED" => Ok(Self::Unpublished),
            "PUBLISHED" => Ok(Self::Published),
            other => Err(UnknownBookStatusError(other.into())),
        }
    }
}

#[derive(Error, Debug)]
#[error("must be one of UNPUBLISHED, PUBLISHED, got \"{0}\"")]
pub struct UnknownBookStatusError(String);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Cannot change status from {from} to {to}")]
pub struct StatusTransitionError {
    pub from: BookStatus,
    pub to: BookStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorIds(Vec<i64>);

impl AuthorIds {
    pub fn new(ids: Vec<i64>) -> Result<Self, AuthorIdsEmptyError> {
        if ids.is_empty() {
            Err(AuthorIdsEmptyError)
        } else {
            Ok(Self(ids))
        }
    }

    pub const fn new_unchecked(ids: Vec<i64>) -> Self {
        Self(ids)
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

#[derive(Error, Debug)]
#[error("must not be empty")]
pub struct AuthorIdsEmptyError;

#[derive(Debug, Clone)]
pub struct Book {
    id: i64,
    title: BookTitle,
    price: Price,
    status: BookStatus,
    author_ids: Vec<i64>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Book {
    pub const fn new(
        id: i64,
        title: BookTitle,
        price: Price,
        status: BookStatus,
        author_ids: Vec<i64>,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            title,
            price,
            status,
            author_ids,
            created_at,
            updated_at,
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub const fn title(&self) -> &BookTitle {
        &self.title
    }

    pub const fn price(&self) -> Price {
        self.price
    }

    pub const fn status(&self) -> BookStatus {
        self.status
    }

    pub fn author_ids(&self) -> &[i64] {
        &self.author_ids
    }

    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }
}

#[derive(Debug)]
pub struct CreateBookRequest {
    title: BookTitle,
    price: Price,
    status: BookStatus,
    author_ids: AuthorIds,
}

impl CreateBookRequest {
    pub const fn new(
        title: BookTitle,
        price: Price,
        status: BookStatus,
        author_ids: AuthorIds,
    ) -> Self {
        Self {
            title,
            price,
            status,
            author_ids,
        }
    }

    pub const fn title(&self) -> &BookTitle {
        &self.title
    }

    pub const fn price(&self) -> Price {
        self.price
    }

    pub const fn status(&self) -> BookStatus {
        self.status
    }

    pub const fn author_ids(&self) -> &AuthorIds {
        &self.author_ids
    }
}

#[derive(Error, Debug)]
pub enum CreateBookError {
    #[error("One or more authors not found")]
    AuthorsNotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct UpdateBookRequest {
    id: i64,
    title: BookTitle,
    price: Price,
    status: BookStatus,
    author_ids: AuthorIds,
}

impl UpdateBookRequest {
    pub const fn new(
        id: i64,
        title: BookTitle,
        price: Price,
        status: BookStatus,
        author_ids: AuthorIds,
    ) -> Self {
        Self {
            id,
            title,
            price,
            status,
            author_ids,
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub const fn title(&self) -> &BookTitle {
        &self.title
    }

    pub const fn price(&self) -> Price {
        self.price
    }

    pub const fn status(&self) -> BookStatus {
        self.status
    }

    pub const fn author_ids(&self) -> &AuthorIds {
        &self.author_ids
    }
}

#[derive(Error, Debug)]
pub enum UpdateBookError {
    #[error("Book not found: {id}")]
    NotFound { id: i64 },
    #[error("One or more authors not found")]
    AuthorsNotFound,
    #[error(transparent)]
    StatusTransition(#[from] StatusTransitionError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum DeleteBookError {
    #[error("Book not found: {id}")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
