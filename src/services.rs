mod author;
mod book;

pub use author::DefaultAuthorService;
pub use book::DefaultBookService;

use crate::models::{
    Author, Book, CreateAuthorError, CreateAuthorRequest, CreateBookError, CreateBookRequest,
    DeleteAuthorError, DeleteAuthorRequest, DeleteBookError, DeleteBookRequest,
    FindAuthorBooksError, FindAuthorBooksRequest, UpdateAuthorError, UpdateAuthorRequest,
    UpdateBookError, UpdateBookRequest,
};
use async_trait::async_trait;

#[async_trait]
pub trait AuthorService: Send + Sync + 'static {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError>;

    async fn update_author(&self, req: &UpdateAuthorRequest) -> Result<Author, UpdateAuthorError>;

    async fn delete_author(&self, req: &DeleteAuthorRequest) -> Result<(), DeleteAuthorError>;

    async fn find_author_books(
        &self,
        req: &FindAuthorBooksRequest,
    ) -> Result<Vec<Book>, FindAuthorBooksError>;
}

#[async_trait]
pub trait BookService: Send + Sync + 'static {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, CreateBookError>;

    async fn update_book(&self, req: &UpdateBookRequest) -> Result<Book, UpdateBookError>;

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<(), DeleteBookError>;
}
