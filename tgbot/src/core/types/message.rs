//! Incoming message as seen by handlers.

use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A single incoming message with user, chat and text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
}
