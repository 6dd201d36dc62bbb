use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::UserRecord;

/// Data access for bot users and administrators.
///
/// Inserts are idempotent: a conflicting `user_id` leaves the stored row untouched.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn add_user(
        &self,
        user_id: i64,
        firstname: &str,
        fullname: &str,
        lastname: Option<&str>,
        username: Option<&str>,
        lang: Option<&str>,
    ) -> Result<(), StorageError>;
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError>;
    /// All users ordered by `user_id` (the table's rowid), not by insertion time.
    async fn list_users(&self) -> Result<Vec<UserRecord>, StorageError>;
    async fn count_users(&self) -> Result<i64, StorageError>;
    async fn update_user_lang(&self, user_id: i64, lang: &str) -> Result<(), StorageError>;

    async fn add_admin(&self, user_id: i64) -> Result<(), StorageError>;
    async fn is_admin(&self, user_id: i64) -> Result<bool, StorageError>;
    async fn list_admins(&self) -> Result<Vec<i64>, StorageError>;
    /// Returns the number of rows removed (0 or 1).
    async fn del_admin(&self, user_id: i64) -> Result<u64, StorageError>;
}
