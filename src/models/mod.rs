//! Data models for Libris

pub mod book;
pub mod policy;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookStatus, Circulation};
pub use policy::Operation;
pub use user::{Principal, Role, User};
