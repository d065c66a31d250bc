//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookChanges, BookRow, BookStatus, NewBook},
};

use super::BookStore;

const BOOK_COLUMNS: &str = "id, book_id, title, status, created_at, updated_at";

/// Selects the record a book_id-addressed write applies to
const OLDEST_BY_BOOK_ID: &str =
    "SELECT id, status FROM books WHERE book_id = $1 ORDER BY created_at, id LIMIT 1";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn insert(&self, book: NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            INSERT INTO books (id, book_id, title, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&book.book_id)
        .bind(&book.title)
        .bind(book.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Book::try_from(row)
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {} FROM books ORDER BY created_at, id",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn update(&self, id: Uuid, changes: BookChanges) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books SET book_id = $2, title = $3, status = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.book_id)
        .bind(&changes.title)
        .bind(changes.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_book_id(&self, book_id: &str) -> AppResult<bool> {
        let result = sqlx::query(&format!(
            "DELETE FROM books WHERE id = (SELECT id FROM ({}) AS target)",
            OLDEST_BY_BOOK_ID
        ))
        .bind(book_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_status_by_book_id(
        &self,
        book_id: &str,
        status: BookStatus,
    ) -> AppResult<Option<BookStatus>> {
        let previous: Option<String> = sqlx::query_scalar(&format!(
            r#"
            WITH target AS ({})
            UPDATE books b SET status = $2, updated_at = NOW()
            FROM target
            WHERE b.id = target.id
            RETURNING target.status
            "#,
            OLDEST_BY_BOOK_ID
        ))
        .bind(book_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        previous
            .map(|s| s.parse::<BookStatus>().map_err(AppError::Internal))
            .transpose()
    }
}
