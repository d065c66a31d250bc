//! Book model and availability state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Availability of a book record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookStatus {
    Available,
    Unavailable,
}

impl BookStatus {
    /// Status a freshly created record starts in
    pub const INITIAL: BookStatus = BookStatus::Available;

    /// Librarian override flag: `true` means available
    pub fn from_flag(available: bool) -> Self {
        if available {
            BookStatus::Available
        } else {
            BookStatus::Unavailable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "AVAILABLE",
            BookStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(BookStatus::Available),
            "UNAVAILABLE" => Ok(BookStatus::Unavailable),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

/// Member-driven availability transitions.
///
/// Transitions are unconditional: the target state does not depend on the
/// current one, so a second borrow or return is accepted as a plain write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Circulation {
    Borrow,
    Return,
}

impl Circulation {
    pub fn target(self) -> BookStatus {
        match self {
            Circulation::Borrow => BookStatus::Unavailable,
            Circulation::Return => BookStatus::Available,
        }
    }

    /// Whether applying this transition from `current` changes nothing
    pub fn is_noop_from(self, current: BookStatus) -> bool {
        current == self.target()
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Circulation::Borrow => "borrowed",
            Circulation::Return => "returned",
        }
    }
}

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    id: Uuid,
    book_id: String,
    title: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = AppError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e: String| AppError::Internal(format!("Book {}: {}", row.id, e)))?;

        Ok(Book {
            id: row.id,
            book_id: row.book_id,
            title: row.title,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    /// Application-level identifier, not unique
    pub book_id: String,
    pub title: String,
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book record about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub book_id: String,
    pub title: String,
    pub status: BookStatus,
}

/// Full overwrite of a book's librarian-editable fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub book_id: String,
    pub title: String,
    pub status: BookStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddBookRequest {
    #[validate(length(min = 1, message = "Book id must not be empty"))]
    pub book_id: String,
    pub title: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, message = "Book id must not be empty"))]
    pub book_id: String,
    pub title: String,
    /// `true` for AVAILABLE, anything else for UNAVAILABLE
    #[serde(default)]
    pub status: bool,
    /// Record id of the book to update
    pub record_id: String,
}

/// Request naming a book by its application identifier
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookIdRequest {
    pub book_id: String,
}
