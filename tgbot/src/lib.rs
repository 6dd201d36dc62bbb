//! # Telegram bot with a role-gated admin panel
//!
//! Wires the handler chain, role-gated handlers and the `storage` repository. Loads config from env
//! and runs the teloxide REPL.

pub mod chain;
pub mod cli;
pub mod config;
pub mod core;
pub mod handlers;
pub mod i18n;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use crate::core::{
    init_tracing, parse_message_id, role_permits, Bot, BotError, Chat, Command, Handler,
    HandlerResponse, Keyboard, Message, Result, ToCoreMessage, ToCoreUser, User, UserRole,
};

pub use chain::HandlerChain;

pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use config::{AccessConfig, BaseConfig, BotConfig};
pub use runner::{build_handler_chain, run_bot, seed_admins, TgBot};

pub use handlers::{
    admin_keyboard, register_admin, register_user, AdminCommandsHandler, AdminStartHandler,
    HandlerDeps, LangHandler, LoggingHandler, RegistrationHandler, RoleFilter, RoleResolver,
    UserStartHandler,
};
