//! BotConfig: BaseConfig + AccessConfig. Use load() for env-based loading.

use anyhow::Result;
use unic_langid::LanguageIdentifier;

use super::{AccessConfig, BaseConfig};
use crate::i18n;

/// Bot config: BaseConfig + access. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub access: AccessConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let access = AccessConfig::from_env()?;
        Ok(Self { base, access })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.access.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn admin_ids(&self) -> &[i64] {
        &self.access.admin_ids
    }
    pub fn default_lang(&self) -> LanguageIdentifier {
        i18n::lang_from_code(&self.access.default_lang)
    }
}
