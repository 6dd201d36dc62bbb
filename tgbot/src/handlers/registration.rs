//! Stores the sender on first contact, before any command handler runs.

use std::sync::Arc;

use async_trait::async_trait;
use storage::UserRepository;
use tracing::{error, instrument};

use crate::core::{BotError, Handler, Message, Result};
use crate::i18n;

/// Upserts the sender into `users` in before(); existing rows are left untouched. Always continues.
#[derive(Clone)]
pub struct RegistrationHandler {
    repo: Arc<dyn UserRepository>,
}

impl RegistrationHandler {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl Handler for RegistrationHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let user = &message.user;
        // Channel posts and anonymous admins carry no sender.
        if user.id == 0 {
            return Ok(true);
        }

        let firstname = user.first_name.clone().unwrap_or_default();
        let lang = user
            .language_code
            .as_deref()
            .and_then(i18n::is_language_supported);

        self.repo
            .add_user(
                user.id,
                &firstname,
                &user.full_name(),
                user.last_name.as_deref(),
                user.username.as_deref(),
                lang,
            )
            .await
            .map_err(|e| {
                error!(error = %e, user_id = user.id, "Failed to register user");
                BotError::from(e)
            })?;

        Ok(true)
    }
}
