//! Bot configuration: BaseConfig (Telegram + log + DB) + AccessConfig (admins, default language).

mod access;
mod base;
mod bot_config;


pub use access::{parse_admin_ids, AccessConfig};
pub use base::BaseConfig;
pub use bot_config::BotConfig;
