//! Telegram framework layer: adapters, Bot implementation, REPL runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_keyboard_markup, TelegramBotAdapter};
pub use runner::run_repl;
