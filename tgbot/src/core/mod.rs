//! Core types and traits: Handler, Bot, Message, HandlerResponse, roles, commands, error, logger.
//! Transport-agnostic; the teloxide side lives in [`crate::telegram`].

pub mod bot;
pub mod command;
pub mod error;
pub mod keyboard;
pub mod logger;
pub mod role;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use command::Command;
pub use error::{BotError, Result};
pub use keyboard::Keyboard;
pub use logger::init_tracing;
pub use role::{role_permits, UserRole};
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
