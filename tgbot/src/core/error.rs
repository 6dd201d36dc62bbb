//! Error type for the bot core.

use storage::StorageError;
use thiserror::Error;

/// Failures a handler or the reply transport can surface to the chain.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Bot error: {0}")]
    Bot(String),
}

impl From<StorageError> for BotError {
    fn from(e: StorageError) -> Self {
        BotError::Database(e.to_string())
    }
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
