//! Book inventory service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{AddBookRequest, Book, BookChanges, BookStatus, Circulation, NewBook, UpdateBookRequest},
        user::parse_record_id,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book; new records always start available
    pub async fn add_book(&self, request: AddBookRequest) -> AppResult<Book> {
        request.validate()?;

        let book = self
            .repository
            .books
            .insert(NewBook {
                book_id: request.book_id,
                title: request.title,
                status: BookStatus::INITIAL,
            })
            .await?;

        tracing::info!(id = %book.id, book_id = %book.book_id, "Book added");
        Ok(book)
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Overwrite a book's metadata and status by record id
    pub async fn update_book(&self, request: UpdateBookRequest) -> AppResult<()> {
        request.validate()?;
        let id = parse_record_id(&request.record_id, "Book")?;

        let changes = BookChanges {
            book_id: request.book_id,
            title: request.title,
            status: BookStatus::from_flag(request.status),
        };

        if !self.repository.books.update(id, changes).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        tracing::info!(id = %id, "Book updated");
        Ok(())
    }

    pub async fn delete_book(&self, book_id: &str) -> AppResult<()> {
        if !self.repository.books.delete_by_book_id(book_id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }

        tracing::info!(book_id = %book_id, "Book deleted");
        Ok(())
    }

    /// Apply a borrow or return to the book carrying `book_id`.
    ///
    /// The prior state is not checked; repeating a transition still succeeds.
    pub async fn circulate(&self, book_id: &str, event: Circulation) -> AppResult<()> {
        let previous = self
            .repository
            .books
            .set_status_by_book_id(book_id, event.target())
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        if event.is_noop_from(previous) {
            tracing::warn!(book_id = %book_id, status = %previous, "Book {} again", event.past_tense());
        } else {
            tracing::info!(book_id = %book_id, "Book {}", event.past_tense());
        }
        Ok(())
    }
}
