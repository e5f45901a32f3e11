use crate::database::{self, authors, books};
use crate::models::{
    Book, CreateBookError, CreateBookRequest, DeleteBookError, DeleteBookRequest,
    UpdateBookError, UpdateBookRequest,
};
use crate::services::BookService;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::SqlitePool;
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct DefaultBookService {
    pool: SqlitePool,
}

impl DefaultBookService {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookService for DefaultBookService {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, CreateBookError> {
        let author_ids = req.author_ids().as_slice();
        let mut tx = database::begin_write(&self.pool).await.context("Failed to begin transaction")?;

        let all_exist = authors::authors_exist(&mut tx, author_ids)
            .await
            .context("Failed to check book authors")?;
        if !all_exist {
            tracing::debug!(?author_ids, "rejected book with unknown authors");
            return Err(CreateBookError::AuthorsNotFound);
        }

        let row = books::insert_book(
            &mut tx,
            req.title(),
            req.price(),
            req.status(),
            OffsetDateTime::now_utc(),
        )
        .await
        .with_context(|| format!(r#"Failed to create book with title "{}""#, req.title()))?
        .ok_or_else(|| anyhow!(r#"Insert of book "{}" returned no row"#, req.title()))?;

        books::insert_book_authors(&mut tx, row.id, author_ids)
            .await
            .with_context(|| format!(r#"Failed to link authors to book "{}""#, row.id))?;

        tx.commit().await.context("Failed to commit book creation")?;
        tracing::info!(book_id = row.id, "created book");

        Ok(row.into_book(author_ids.to_vec()))
    }

    async fn update_book(&self, req: &UpdateBookRequest) -> Result<Book, UpdateBookError> {
        let id = req.id();
        let author_ids = req.author_ids().as_slice();
        let mut tx = database::begin_write(&self.pool).await.context("Failed to begin transaction")?;

        let existing = books::find_book(&mut tx, id)
            .await
            .with_context(|| format!(r#"Failed to retrieve book with id "{id}""#))?
            .ok_or(UpdateBookError::NotFound { id })?;

        if let Err(err) = existing.status.transition_to(req.status()) {
            tracing::warn!(book_id = id, %err, "rejected status change");
            return Err(err.into());
        }

        let all_exist = authors::authors_exist(&mut tx, author_ids)
            .await
            .context("Failed to check book authors")?;
        if !all_exist {
            tracing::debug!(book_id = id, ?author_ids, "rejected book with unknown authors");
            return Err(UpdateBookError::AuthorsNotFound);
        }

        let row = books::update_book(
            &mut tx,
            id,
            req.title(),
            req.price(),
            req.status(),
            OffsetDateTime::now_utc(),
        )
        .await
        .with_context(|| format!(r#"Failed to update book with id "{id}""#))?
        .ok_or(UpdateBookError::NotFound { id })?;

        // Replace the whole author set rather than diffing it.
        books::delete_book_authors(&mut tx, id)
            .await
            .with_context(|| format!(r#"Failed to unlink authors from book "{id}""#))?;
        books::insert_book_authors(&mut tx, id, author_ids)
            .await
            .with_context(|| format!(r#"Failed to link authors to book "{id}""#))?;

        tx.commit().await.context("Failed to commit book update")?;
        tracing::info!(book_id = id, status = %row.status, "updated book");

        Ok(row.into_book(author_ids.to_vec()))
    }

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<(), DeleteBookError> {
        let mut tx = database::begin_write(&self.pool).await.context("Failed to begin transaction")?;

        let deleted = books::delete_book(&mut tx, req.id())
            .await
            .with_context(|| format!(r#"Failed to delete book with id "{}""#, req.id()))?;
        if deleted == 0 {
            return Err(DeleteBookError::NotFound { id: req.id() });
        }

        tx.commit().await.context("Failed to commit book deletion")?;
        tracing::info!(book_id = req.id(), "deleted book");

        Ok(())
    }
}
