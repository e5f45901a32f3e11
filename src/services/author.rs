use crate::database::{self, authors, books};
use crate::models::{
    Author, Book, CreateAuthorError, CreateAuthorRequest, DeleteAuthorError, DeleteAuthorRequest,
    FindAuthorBooksError, FindAuthorBooksRequest, UpdateAuthorError, UpdateAuthorRequest,
};
use crate::services::AuthorService;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::SqlitePool;
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct DefaultAuthorService {
    pool: SqlitePool,
}

impl DefaultAuthorService {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorService for DefaultAuthorService {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError> {
        let mut tx = database::begin_write(&self.pool).await.context("Failed to begin transaction")?;

        let author = authors::insert_author(
            &mut tx,
            req.name(),
            req.birth_date(),
            OffsetDateTime::now_utc(),
        )
        .await
        .with_context(|| format!(r#"Failed to create author with name "{}""#, req.name()))?
        .ok_or_else(|| anyhow!(r#"Insert of author "{}" returned no row"#, req.name()))?;

        tx.commit().await.context("Failed to commit author creation")?;
        tracing::info!(author_id = author.id(), "created author");

        Ok(author)
    }

    async fn update_author(&self, req: &UpdateAuthorRequest) -> Result<Author, UpdateAuthorError> {
        let mut tx = database::begin_write(&self.pool).await.context("Failed to begin transaction")?;

        let author = authors::update_author(
            &mut tx,
            req.id(),
            req.name(),
            req.birth_date(),
            OffsetDateTime::now_utc(),
        )
        .await
        .with_context(|| format!(r#"Failed to update author with id "{}""#, req.id()))?
        .ok_or(UpdateAuthorError::NotFound { id: req.id() })?;

        tx.commit().await.context("Failed to commit author update")?;
        tracing::info!(author_id = author.id(), "updated author");

        Ok(author)
    }

    async fn delete_author(&self, req: &DeleteAuthorRequest) -> Result<(), DeleteAuthorError> {
        let mut tx = database::begin_write(&self.pool).await.context("Failed to begin transaction")?;

        let deleted = authors::delete_author(&mut tx, req.id())
            .await
            .with_context(|| format!(r#"Failed to delete author with id "{}""#, req.id()))?;
        if deleted == 0 {
            return Err(DeleteAuthorError::NotFound { id: req.id() });
        }

        tx.commit().await.context("Failed to commit author deletion")?;
        tracing::info!(author_id = req.id(), "deleted author");

        Ok(())
    }

    async fn find_author_books(
        &self,
        req: &FindAuthorBooksRequest,
    ) -> Result<Vec<Book>, FindAuthorBooksError> {
        let author_id = req.author_id();
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        let exists = authors::author_exists(&mut tx, author_id)
            .await
            .with_context(|| format!(r#"Failed to look up author with id "{author_id}""#))?;
        if !exists {
            return Err(FindAuthorBooksError::AuthorNotFound { id: author_id });
        }

        let rows = books::find_books_by_author(&mut tx, author_id, req.status())
            .await
            .with_context(|| format!(r#"Failed to retrieve books of author "{author_id}""#))?;

        let mut found = Vec::with_capacity(rows.len());
        for row in rows {
            let author_ids = books::find_author_ids(&mut tx, row.id)
                .await
                .with_context(|| format!(r#"Failed to retrieve authors of book "{}""#, row.id))?;
            found.push(row.into_book(author_ids));
        }

        tx.commit().await.context("Failed to finish author books lookup")?;

        Ok(found)
    }
}
