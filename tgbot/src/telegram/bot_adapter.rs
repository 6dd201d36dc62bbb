//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code sends messages via Telegram; tests substitute another Bot impl.

use crate::core::{parse_message_id, Bot as CoreBot, BotError, Chat, Keyboard, Message, Result};
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatId, KeyboardButton, KeyboardMarkup, MessageId, ReplyParameters},
};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

/// Converts a core [`Keyboard`] into a Telegram reply keyboard.
pub fn to_keyboard_markup(keyboard: &Keyboard) -> KeyboardMarkup {
    KeyboardMarkup::new(
        keyboard
            .rows
            .iter()
            .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone()))),
    )
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let id = parse_message_id(&message.id)?;
        self.bot
            .send_message(ChatId(message.chat.id), text.to_string())
            .reply_parameters(ReplyParameters::new(MessageId(id)))
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply_with_keyboard(
        &self,
        message: &Message,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<()> {
        let id = parse_message_id(&message.id)?;
        self.bot
            .send_message(ChatId(message.chat.id), text.to_string())
            .reply_parameters(ReplyParameters::new(MessageId(id)))
            .reply_markup(to_keyboard_markup(keyboard))
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}
