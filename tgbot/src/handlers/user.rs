//! Commands open to every user: `/start` greeting and `/lang`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use super::HandlerDeps;
use crate::chain::HandlerChain;
use crate::core::{Command, Handler, HandlerResponse, Message, Result};
use crate::i18n;

/// Greets non-admins on `/start`. Registered after the admin handlers, so admins never get here.
pub struct UserStartHandler {
    deps: HandlerDeps,
}

impl UserStartHandler {
    pub fn new(deps: HandlerDeps) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl Handler for UserStartHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match Command::parse(&message.content) {
            Some(cmd) if cmd.is("start") => {}
            _ => return Ok(HandlerResponse::Continue),
        }

        let lang = self.deps.user_lang(&message.user).await;
        let user_name = message.user.first_name.clone().unwrap_or_default();
        let text = i18n::t_args(&lang, "user-start", &[("user_name", user_name)]);

        self.deps.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}

/// `/lang <code>`: stores the user's language and answers in it.
pub struct LangHandler {
    deps: HandlerDeps,
}

impl LangHandler {
    pub fn new(deps: HandlerDeps) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl Handler for LangHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let cmd = match Command::parse(&message.content) {
            Some(cmd) if cmd.is("lang") => cmd,
            _ => return Ok(HandlerResponse::Continue),
        };

        let text = match i18n::is_language_supported(cmd.args) {
            Some(code) => {
                self.deps.repo.update_user_lang(message.user.id, code).await?;
                info!(user_id = message.user.id, lang = %code, "User language changed");
                let lang = i18n::lang_from_code(code);
                i18n::t_args(
                    &lang,
                    "lang-updated",
                    &[("lang_name", i18n::language_name(code).to_string())],
                )
            }
            None => {
                let lang = self.deps.user_lang(&message.user).await;
                let langs = i18n::SUPPORTED_LANGS
                    .iter()
                    .map(|(code, _)| *code)
                    .collect::<Vec<_>>()
                    .join(", ");
                i18n::t_args(&lang, "lang-usage", &[("langs", langs)])
            }
        };

        self.deps.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}

/// Appends the handlers available to every user.
pub fn register_user(chain: HandlerChain, deps: &HandlerDeps) -> HandlerChain {
    chain
        .add_handler(Arc::new(UserStartHandler::new(deps.clone())))
        .add_handler(Arc::new(LangHandler::new(deps.clone())))
}
