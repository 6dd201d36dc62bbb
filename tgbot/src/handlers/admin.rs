//! Admin panel: `/start` greeting with the admin keyboard, and admin management commands.
//!
//! Both handlers assume the caller is already an admin; [`register_admin`] wraps them in a
//! [`RoleFilter`] so nobody else reaches them.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use super::{HandlerDeps, RoleFilter, RoleResolver};
use crate::chain::HandlerChain;
use crate::core::{Command, Handler, HandlerResponse, Keyboard, Message, Result};
use crate::i18n;

/// Most users listed by `/users`.
const USERS_LIST_LIMIT: usize = 50;

/// Reply keyboard shown with the admin greeting.
pub fn admin_keyboard() -> Keyboard {
    Keyboard::new()
        .row(["/users"])
        .row(["/lang en", "/lang ru"])
}

/// Replies to `/start` with the localized admin greeting and [`admin_keyboard`].
pub struct AdminStartHandler {
    deps: HandlerDeps,
}

impl AdminStartHandler {
    pub fn new(deps: HandlerDeps) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl Handler for AdminStartHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match Command::parse(&message.content) {
            Some(cmd) if cmd.is("start") => {}
            _ => return Ok(HandlerResponse::Continue),
        }

        let lang = self.deps.user_lang(&message.user).await;
        let user_name = message.user.first_name.clone().unwrap_or_default();
        let text = i18n::t_args(&lang, "admin-start", &[("user_name", user_name)]);

        self.deps
            .bot
            .reply_with_keyboard(message, &text, &admin_keyboard())
            .await?;

        info!(user_id = message.user.id, "Admin start sent");
        Ok(HandlerResponse::Reply(text))
    }
}

/// `/add_admin <id>`, `/del_admin <id>` and `/users`.
///
/// Admins from `ADMINS` cannot be removed here; `/del_admin` says so instead of touching the table.
pub struct AdminCommandsHandler {
    deps: HandlerDeps,
    resolver: Arc<RoleResolver>,
}

impl AdminCommandsHandler {
    pub fn new(deps: HandlerDeps, resolver: Arc<RoleResolver>) -> Self {
        Self { deps, resolver }
    }

    async fn add_admin(&self, message: &Message, args: &str) -> Result<String> {
        let lang = self.deps.user_lang(&message.user).await;
        let Some(user_id) = parse_user_id(args) else {
            warn!(args = %args, "Bad /add_admin argument");
            return Ok(i18n::t(&lang, "admin-add-usage"));
        };

        self.deps.repo.add_admin(user_id).await?;
        info!(by = message.user.id, user_id = user_id, "Admin added");
        Ok(i18n::t_args(&lang, "admin-added", &[("user_id", user_id.to_string())]))
    }

    async fn del_admin(&self, message: &Message, args: &str) -> Result<String> {
        let lang = self.deps.user_lang(&message.user).await;
        let Some(user_id) = parse_user_id(args) else {
            warn!(args = %args, "Bad /del_admin argument");
            return Ok(i18n::t(&lang, "admin-del-usage"));
        };
        let id_arg = [("user_id", user_id.to_string())];

        if self.resolver.is_configured_admin(user_id) {
            info!(by = message.user.id, user_id = user_id, "Refused to remove configured admin");
            return Ok(i18n::t_args(&lang, "admin-configured", &id_arg));
        }

        let deleted = self.deps.repo.del_admin(user_id).await?;
        info!(by = message.user.id, user_id = user_id, deleted = deleted, "Admin removal");
        let key = if deleted > 0 {
            "admin-removed"
        } else {
            "admin-not-found"
        };
        Ok(i18n::t_args(&lang, key, &id_arg))
    }

    async fn list_users(&self, message: &Message) -> Result<String> {
        let lang = self.deps.user_lang(&message.user).await;
        let users = self.deps.repo.list_users().await?;
        if users.is_empty() {
            return Ok(i18n::t(&lang, "users-empty"));
        }

        let mut text = i18n::t_args(&lang, "users-list", &[("count", users.len().to_string())]);
        for user in users.iter().take(USERS_LIST_LIMIT) {
            text.push('\n');
            text.push_str(&format!("{} {}", user.user_id, user.fullname));
            if let Some(username) = &user.username {
                text.push_str(&format!(" @{}", username));
            }
            if let Some(code) = &user.lang {
                text.push_str(&format!(" [{}]", code));
            }
        }
        Ok(text)
    }
}

#[async_trait]
impl Handler for AdminCommandsHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(cmd) = Command::parse(&message.content) else {
            return Ok(HandlerResponse::Continue);
        };

        let text = if cmd.is("add_admin") {
            self.add_admin(message, cmd.args).await?
        } else if cmd.is("del_admin") {
            self.del_admin(message, cmd.args).await?
        } else if cmd.is("users") {
            self.list_users(message).await?
        } else {
            return Ok(HandlerResponse::Continue);
        };

        self.deps.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}

fn parse_user_id(args: &str) -> Option<i64> {
    args.split_whitespace().next()?.parse().ok()
}

/// Appends the admin handlers, each behind an admin-only [`RoleFilter`].
pub fn register_admin(
    chain: HandlerChain,
    deps: &HandlerDeps,
    resolver: Arc<RoleResolver>,
) -> HandlerChain {
    chain
        .add_handler(Arc::new(RoleFilter::admin(
            resolver.clone(),
            Arc::new(AdminStartHandler::new(deps.clone())),
        )))
        .add_handler(Arc::new(RoleFilter::admin(
            resolver.clone(),
            Arc::new(AdminCommandsHandler::new(deps.clone(), resolver)),
        )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42"), Some(42));
        assert_eq!(parse_user_id(" 42 extra"), Some(42));
        assert_eq!(parse_user_id(""), None);
        assert_eq!(parse_user_id("abc"), None);
    }

    #[test]
    fn test_admin_keyboard_has_users_button() {
        let kb = admin_keyboard();
        assert_eq!(kb.rows[0], vec!["/users".to_string()]);
    }
}
