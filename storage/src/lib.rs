//! Storage crate: user and admin persistence.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserRecord
//! - [`repository`] – UserRepository trait
//! - [`user_repo`] – SqliteUserRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod models;
mod repository;
mod sqlite_pool;
mod user_repo;


pub use error::StorageError;
pub use models::UserRecord;
pub use repository::UserRepository;
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::SqliteUserRepository;
