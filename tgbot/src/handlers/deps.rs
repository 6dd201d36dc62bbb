//! Dependencies shared by command handlers.

use std::sync::Arc;

use storage::UserRepository;
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::core::{Bot, User};
use crate::i18n;

/// Reply transport, repository handle and fallback language, cloned into each handler.
#[derive(Clone)]
pub struct HandlerDeps {
    pub bot: Arc<dyn Bot>,
    pub repo: Arc<dyn UserRepository>,
    pub default_lang: LanguageIdentifier,
}

impl HandlerDeps {
    pub fn new(
        bot: Arc<dyn Bot>,
        repo: Arc<dyn UserRepository>,
        default_lang: LanguageIdentifier,
    ) -> Self {
        Self {
            bot,
            repo,
            default_lang,
        }
    }

    /// Language for replies to `user`: stored `lang`, then the client language, then the default.
    pub async fn user_lang(&self, user: &User) -> LanguageIdentifier {
        match self.repo.get_user(user.id).await {
            Ok(Some(record)) => {
                if let Some(code) = record.lang.as_deref().and_then(i18n::is_language_supported) {
                    return i18n::lang_from_code(code);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, user_id = user.id, "Failed to load user language"),
        }

        match user
            .language_code
            .as_deref()
            .and_then(i18n::is_language_supported)
        {
            Some(code) => i18n::lang_from_code(code),
            None => self.default_lang.clone(),
        }
    }
}
