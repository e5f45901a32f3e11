use crate::models::{Author, AuthorName, BirthDate};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqliteConnection};
use time::OffsetDateTime;

impl<'r> FromRow<'r, SqliteRow> for Author {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let name = row.try_get("name")?;
        let birth_date = row.try_get("birth_date")?;
        let created_at = row.try_get("created_at")?;
        let updated_at = row.try_get("updated_at")?;

        let name = AuthorName::new_unchecked(name);
        let birth_date = BirthDate::new_unchecked(birth_date);
        Ok(Self::new(id, name, birth_date, created_at, updated_at))
    }
}

pub async fn insert_author(
    conn: &mut SqliteConnection,
    name: &AuthorName,
    birth_date: BirthDate,
    now: OffsetDateTime,
) -> sqlx::Result<Option<Author>> {
    sqlx::query_as(
        "INSERT INTO author (name, birth_date, created_at, updated_at) \
         VALUES (?, ?, ?, ?) RETURNING id, name, birth_date, created_at, updated_at",
    )
    .bind(name.as_str())
    .bind(birth_date.date())
    .bind(now)
    .bind(now)
    .fetch_optional(conn)
    .await
}

pub async fn update_author(
    conn: &mut SqliteConnection,
    id: i64,
    name: &AuthorName,
    birth_date: BirthDate,
    now: OffsetDateTime,
) -> sqlx::Result<Option<Author>> {
    sqlx::query_as(
        "UPDATE author SET name = ?, birth_date = ?, updated_at = ? WHERE id = ? \
         RETURNING id, name, birth_date, created_at, updated_at",
    )
    .bind(name.as_str())
    .bind(birth_date.date())
    .bind(now)
    .bind(id)
    .fetch_optional(conn)
    .await
}

pub async fn delete_author(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM author WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn author_exists(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<bool> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM author WHERE id = ?)")
        .bind(id)
        .fetch_one(conn)
        .await
}

// Duplicate ids are counted once by the query, so a list with duplicates
// never passes.
pub async fn authors_exist(conn: &mut SqliteConnection, ids: &[i64]) -> sqlx::Result<bool> {
    if ids.is_empty() {
        return Ok(true);
    }

    let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM author WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let count: i64 = query.build_query_scalar::<i64>().fetch_one(conn).await?;
    Ok(usize::try_from(count).is_ok_and(|count| count == ids.len()))
}
