//! Startup wiring: repository, admin seeding, handler chain and the teloxide REPL.

use anyhow::Result;
use std::sync::Arc;
use storage::{SqliteUserRepository, UserRepository};
use tracing::{error, info, instrument, warn};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::{init_tracing, Bot, Chat, HandlerResponse, Message as CoreMessage};
use crate::handlers::{
    register_admin, register_user, HandlerDeps, LoggingHandler, RegistrationHandler, RoleResolver,
};
use crate::i18n;
use crate::telegram::{run_repl, TelegramBotAdapter};

/// Bot wiring: config, repository and handler chain. The reply transport is injected.
pub struct TgBot {
    pub config: BotConfig,
    pub repo: Arc<dyn UserRepository>,
    pub handler_chain: HandlerChain,
}

impl TgBot {
    /// Opens the repository from `config.database_url()`, seeds configured admins and builds the chain.
    pub async fn new(config: BotConfig, bot: Arc<dyn Bot>) -> Result<Self> {
        let repo: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(config.database_url()).await?);
        seed_admins(repo.as_ref(), config.admin_ids()).await?;

        let deps = HandlerDeps::new(bot, repo.clone(), config.default_lang());
        let handler_chain = build_handler_chain(&deps, config.admin_ids().to_vec());

        Ok(Self {
            config,
            repo,
            handler_chain,
        })
    }

    /// Drive the handler chain with a core Message. Chain errors are logged, not returned.
    pub async fn handle_core_message(&self, message: &CoreMessage) -> Result<HandlerResponse> {
        info!(
            user_id = message.user.id,
            message_content = %message.content,
            "Handling core message"
        );
        match self.handler_chain.handle(message).await {
            Ok(response) => Ok(response),
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "Handler chain failed");
                Ok(HandlerResponse::Stop)
            }
        }
    }
}

/// Logging → registration → admin handlers (role-gated) → user handlers.
pub fn build_handler_chain(deps: &HandlerDeps, admin_ids: Vec<i64>) -> HandlerChain {
    let resolver = Arc::new(RoleResolver::new(deps.repo.clone(), admin_ids));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(RegistrationHandler::new(deps.repo.clone())));
    let chain = register_admin(chain, deps, resolver);
    register_user(chain, deps)
}

/// Stores configured admins in the `admins` table (idempotent).
pub async fn seed_admins(repo: &dyn UserRepository, admin_ids: &[i64]) -> Result<()> {
    for &user_id in admin_ids {
        repo.add_admin(user_id).await?;
    }
    if !admin_ids.is_empty() {
        info!(count = admin_ids.len(), "Configured admins seeded");
    }
    Ok(())
}

/// Tells each configured admin that the bot is up. Failures (e.g. admin never opened the chat) are logged.
pub async fn notify_admins(bot: &dyn Bot, config: &BotConfig) {
    let text = i18n::t(&config.default_lang(), "bot-started");
    for &admin_id in config.admin_ids() {
        if let Err(e) = bot.send_message(&Chat::private(admin_id), &text).await {
            warn!(error = %e, admin_id = admin_id, "Failed to notify admin");
        }
    }
}

/// Builds the teloxide Bot, pointing it at TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => {
            let url = reqwest::Url::parse(url_str)?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Main entry: validate config, init logging, open storage, build the chain, then run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        admins = config.admin_ids().len(),
        "Initializing bot"
    );

    let teloxide_bot = build_teloxide_bot(&config)?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let tg_bot = TgBot::new(config, bot.clone()).await?;

    notify_admins(bot.as_ref(), &tg_bot.config).await;
    info!("Bot started successfully");

    run_repl(teloxide_bot, tg_bot.handler_chain).await
}
