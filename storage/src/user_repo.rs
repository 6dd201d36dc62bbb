//! User repository: persistence and lookups for users and admins.
//!
//! Uses SqlitePoolManager and UserRecord. Every statement runs on its own and
//! auto-commits; nothing here spans tables.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::UserRecord;
use crate::repository::UserRepository;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool_manager: SqlitePoolManager,
}

impl SqliteUserRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    /// Wraps an existing pool; tables are created if missing.
    pub async fn with_pool_manager(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                firstname TEXT NOT NULL,
                fullname TEXT NOT NULL,
                lastname TEXT,
                username TEXT,
                lang TEXT
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admins (
                user_id INTEGER PRIMARY KEY
            )
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn add_user(
        &self,
        user_id: i64,
        firstname: &str,
        fullname: &str,
        lastname: Option<&str>,
        username: Option<&str>,
        lang: Option<&str>,
    ) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query(
            r#"
            INSERT INTO users (user_id, firstname, fullname, lastname, username, lang)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(firstname)
        .bind(fullname)
        .bind(lastname)
        .bind(username)
        .bind(lang)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            info!(user_id = user_id, "Saved new user");
        } else {
            debug!(user_id = user_id, "User already exists, insert ignored");
        }
        Ok(())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, firstname, fullname, lastname, username, lang FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let users: Vec<UserRecord> = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, firstname, fullname, lastname, username, lang FROM users ORDER BY rowid",
        )
        .fetch_all(pool)
        .await?;
        info!("Retrieved {} users", users.len());

        Ok(users)
    }

    async fn count_users(&self) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(total.0)
    }

    async fn update_user_lang(&self, user_id: i64, lang: &str) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("UPDATE users SET lang = ? WHERE user_id = ?")
            .bind(lang)
            .bind(user_id)
            .execute(pool)
            .await?;

        info!(
            user_id = user_id,
            lang = %lang,
            updated = result.rows_affected(),
            "Updated user language"
        );
        Ok(())
    }

    async fn add_admin(&self, user_id: i64) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query("INSERT INTO admins (user_id) VALUES (?) ON CONFLICT(user_id) DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;

        info!(user_id = user_id, "Admin stored");
        Ok(())
    }

    async fn is_admin(&self, user_id: i64) -> Result<bool, StorageError> {
        let pool = self.pool_manager.pool();

        let row: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM admins WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(row.is_some())
    }

    async fn list_admins(&self) -> Result<Vec<i64>, StorageError> {
        let pool = self.pool_manager.pool();

        let rows: Vec<(i64,)> = sqlx::query_as("SELECT user_id FROM admins ORDER BY user_id")
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn del_admin(&self, user_id: i64) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("DELETE FROM admins WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;

        info!(
            user_id = user_id,
            deleted = result.rows_affected(),
            "Deleted admin"
        );
        Ok(result.rows_affected())
    }
}
