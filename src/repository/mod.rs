//! Repository layer: store contracts and their backends

pub mod books;
pub mod memory;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookChanges, BookStatus, NewBook},
        user::{NewUser, Role, User},
    },
};

/// Credential store contract
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Oldest record with that username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Every record holding both `username` and `role`, oldest first
    async fn find_all_by_username_and_role(&self, username: &str, role: Role) -> AppResult<Vec<User>>;

    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Record the last issued token; `false` when the id matches nothing
    async fn set_last_token(&self, id: Uuid, token: &str) -> AppResult<bool>;

    /// Overwrite username and secret; `false` when the id matches nothing
    async fn update_credentials(&self, id: Uuid, username: &str, password: &str) -> AppResult<bool>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Inventory store contract
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn insert(&self, book: NewBook) -> AppResult<Book>;

    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Overwrite a record by id; `false` when the id matches nothing
    async fn update(&self, id: Uuid, changes: BookChanges) -> AppResult<bool>;

    /// Remove the oldest record carrying `book_id`
    async fn delete_by_book_id(&self, book_id: &str) -> AppResult<bool>;

    /// Set the status of the oldest record carrying `book_id`, returning
    /// the status it had before the write, or `None` if nothing matched
    async fn set_status_by_book_id(
        &self,
        book_id: &str,
        status: BookStatus,
    ) -> AppResult<Option<BookStatus>>;
}

/// Main repository struct holding both stores
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a Postgres-backed repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool)),
        }
    }

    /// Create a repository that keeps every record in process memory
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            users: store.clone(),
            books: store,
        }
    }

    /// Assemble a repository from arbitrary store implementations
    pub fn from_stores(users: Arc<dyn UserStore>, books: Arc<dyn BookStore>) -> Self {
        Self { users, books }
    }
}
