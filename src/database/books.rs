use crate::models::{Book, BookStatus, BookTitle, Price};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqliteConnection};
use time::OffsetDateTime;

const BOOK_COLUMNS: &str = "id, title, price, status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct BookRow {
    pub id: i64,
    pub title: BookTitle,
    pub price: Price,
    pub status: BookStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl BookRow {
    pub fn into_book(self, author_ids: Vec<i64>) -> Book {
        Book::new(
            self.id,
            self.title,
            self.price,
            self.status,
            author_ids,
            self.created_at,
            self.updated_at,
        )
    }
}

impl<'r> FromRow<'r, SqliteRow> for BookRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let title = row.try_get("title")?;
        let price = row.try_get("price")?;
        let status: String = row.try_get("status")?;
        let created_at = row.try_get("created_at")?;
        let updated_at = row.try_get("updated_at")?;

        let status = status.parse().map_err(|err| sqlx::Error::ColumnDecode {
            index: "status".into(),
            source: Box::new(err),
        })?;
        Ok(Self {
            id,
            title: BookTitle::new_unchecked(title),
            price: Price::new_unchecked(price),
            status,
            created_at,
            updated_at,
        })
    }
}

pub async fn insert_book(
    conn: &mut SqliteConnection,
    title: &BookTitle,
    price: Price,
    status: BookStatus,
    now: OffsetDateTime,
) -> sqlx::Result<Option<BookRow>> {
    let sql = format!(
        "INSERT INTO book (title, price, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING {BOOK_COLUMNS}"
    );
    sqlx::query_as(&sql)
        .bind(title.as_str())
        .bind(price.value())
        .bind(status.as_str())
        .bind(now)
        .bind(now)
        .fetch_optional(conn)
        .await
}

pub async fn find_book(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<BookRow>> {
    let sql = format!("SELECT {BOOK_COLUMNS} FROM book WHERE id = ?");
    sqlx::query_as(&sql).bind(id).fetch_optional(conn).await
}

pub async fn update_book(
    conn: &mut SqliteConnection,
    id: i64,
    title: &BookTitle,
    price: Price,
    status: BookStatus,
    now: OffsetDateTime,
) -> sqlx::Result<Option<BookRow>> {
    let sql = format!(
        "UPDATE book SET title = ?, price = ?, status = ?, updated_at = ? WHERE id = ? \
         RETURNING {BOOK_COLUMNS}"
    );
    sqlx::query_as(&sql)
        .bind(title.as_str())
        .bind(price.value())
        .bind(status.as_str())
        .bind(now)
        .bind(id)
        .fetch_optional(conn)
        .await
}

// Association rows go with the book through ON DELETE CASCADE.
pub async fn delete_book(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM book WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn insert_book_authors(
    conn: &mut SqliteConnection,
    book_id: i64,
    author_ids: &[i64],
) -> sqlx::Result<()> {
    if author_ids.is_empty() {
        return Ok(());
    }

    let mut query = QueryBuilder::<Sqlite>::new("INSERT INTO book_author (book_id, author_id) ");
    query.push_values(author_ids, |mut row, author_id| {
        row.push_bind(book_id).push_bind(*author_id);
    });
    query.build().execute(conn).await?;

    Ok(())
}

pub async fn delete_book_authors(conn: &mut SqliteConnection, book_id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM book_author WHERE book_id = ?")
        .bind(book_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn find_author_ids(conn: &mut SqliteConnection, book_id: i64) -> sqlx::Result<Vec<i64>> {
    sqlx::query_scalar("SELECT author_id FROM book_author WHERE book_id = ? ORDER BY author_id")
        .bind(book_id)
        .fetch_all(conn)
        .await
}

pub async fn find_books_by_author(
    conn: &mut SqliteConnection,
    author_id: i64,
    status: Option<BookStatus>,
) -> sqlx::Result<Vec<BookRow>> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT b.id, b.title, b.price, b.status, b.created_at, b.updated_at \
         FROM book b JOIN book_author ba ON b.id = ba.book_id WHERE ba.author_id = ",
    );
    query.push_bind(author_id);
    if let Some(status) = status {
        query.push(" AND b.status = ").push_bind(status.as_str());
    }
    query.push(" ORDER BY b.id");

    query.build_query_as::<BookRow>().fetch_all(conn).await
}
