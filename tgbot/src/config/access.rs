//! Access config: statically configured admins and the fallback language.

use anyhow::{Context, Result};
use std::env;

use crate::i18n;

/// Admins from `ADMINS` (comma-separated Telegram ids) and `DEFAULT_LANG`.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Always resolve to the admin role; also seeded into the `admins` table at startup.
    pub admin_ids: Vec<i64>,
    /// ISO 639-1 code used when neither the stored nor the client language is supported.
    pub default_lang: String,
}

impl AccessConfig {
    pub fn from_env() -> Result<Self> {
        let admin_ids = match env::var("ADMINS") {
            Ok(raw) => parse_admin_ids(&raw)?,
            Err(_) => Vec::new(),
        };
        let default_lang = env::var("DEFAULT_LANG").unwrap_or_else(|_| "en".to_string());

        Ok(Self {
            admin_ids,
            default_lang,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if i18n::is_language_supported(&self.default_lang).is_none() {
            anyhow::bail!("DEFAULT_LANG is not a supported language: {}", self.default_lang);
        }
        Ok(())
    }
}

/// Parses `"1, 2,3"` into ids; empty entries are skipped.
pub fn parse_admin_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("ADMINS contains an invalid user id: {}", s))
        })
        .collect()
}
