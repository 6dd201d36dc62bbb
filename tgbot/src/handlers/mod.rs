//! Handler implementations: logging, user registration, role gating, admin and user commands.

mod admin;
mod deps;
mod logging;
mod registration;
mod role_filter;
mod user;

pub use admin::{admin_keyboard, register_admin, AdminCommandsHandler, AdminStartHandler};
pub use deps::HandlerDeps;
pub use logging::LoggingHandler;
pub use registration::RegistrationHandler;
pub use role_filter::{RoleFilter, RoleResolver};
pub use user::{register_user, LangHandler, UserStartHandler};
