//! User record model for persistence.
//!
//! Maps to the `users` table and is returned by UserRepository lookups.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    /// Telegram user id.
    pub user_id: i64,
    pub firstname: String,
    pub fullname: String,
    pub lastname: Option<String>,
    pub username: Option<String>,
    /// ISO 639-1 language code.
    pub lang: Option<String>,
}
