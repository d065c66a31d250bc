//! In-process store used for local runs and tests

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookChanges, BookStatus, NewBook},
        user::{NewUser, Role, User},
    },
};

use super::{BookStore, UserStore};

/// Both collections kept in insertion order, so "first match" is the
/// oldest record just like the Postgres backend
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    books: RwLock<Vec<Book>>,
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_all_by_username_and_role(&self, username: &str, role: Role) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.username == username && u.role == role)
            .cloned()
            .collect())
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            password: user.password,
            role: user.role,
            last_token: None,
            created_at: now,
            updated_at: now,
        };
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn set_last_token(&self, id: Uuid, token: &str) -> AppResult<bool> {
        let mut users = self.users.write().await;
        Ok(match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.last_token = Some(token.to_string());
                user.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn update_credentials(&self, id: Uuid, username: &str, password: &str) -> AppResult<bool> {
        let mut users = self.users.write().await;
        Ok(match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.username = username.to_string();
                user.password = password.to_string();
                user.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn insert(&self, book: NewBook) -> AppResult<Book> {
        let now = Utc::now();
        let book = Book {
            id: Uuid::new_v4(),
            book_id: book.book_id,
            title: book.title,
            status: book.status,
            created_at: now,
            updated_at: now,
        };
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn update(&self, id: Uuid, changes: BookChanges) -> AppResult<bool> {
        let mut books = self.books.write().await;
        Ok(match books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                book.book_id = changes.book_id;
                book.title = changes.title;
                book.status = changes.status;
                book.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn delete_by_book_id(&self, book_id: &str) -> AppResult<bool> {
        let mut books = self.books.write().await;
        Ok(match books.iter().position(|b| b.book_id == book_id) {
            Some(index) => {
                books.remove(index);
                true
            }
            None => false,
        })
    }

    async fn set_status_by_book_id(
        &self,
        book_id: &str,
        status: BookStatus,
    ) -> AppResult<Option<BookStatus>> {
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|b| b.book_id == book_id).map(|book| {
            let previous = book.status;
            book.status = status;
            book.updated_at = Utc::now();
            previous
        }))
    }
}
