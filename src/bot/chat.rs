//! Outbound side of the chat platform.
//!
//! [`ChatApi`] is the only surface the dispatcher talks to; [`TelegramChat`]
//! implements it on top of a `teloxide` bot.

use async_trait::async_trait;
use teloxide::Bot;
use teloxide::payloads::setters::*;
use teloxide::requests::Requester;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use thiserror::Error;

use super::keyboard::{Button, Keyboard, OutgoingMessage};
use crate::domain::{ChatId, MessageId};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),

    #[error("Invalid keyboard: {0}")]
    InvalidKeyboard(String),
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Sends a new message and returns the id Telegram assigned to it.
    async fn send_message(
        &self,
        chat: ChatId,
        message: OutgoingMessage,
    ) -> Result<MessageId, ChatError>;

    /// Replaces text and keyboard of an existing message.
    ///
    /// A message without a keyboard removes any buttons currently shown.
    async fn edit_message(
        &self,
        chat: ChatId,
        message_id: MessageId,
        message: OutgoingMessage,
    ) -> Result<(), ChatError>;

    async fn delete_message(&self, chat: ChatId, message_id: MessageId) -> Result<(), ChatError>;

    /// Stops the loading indicator on the pressed button.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), ChatError>;

    /// Re-posts a message into the same chat without the "forwarded from" header.
    async fn copy_message(&self, chat: ChatId, message_id: MessageId) -> Result<(), ChatError>;
}

#[derive(Clone)]
pub struct TelegramChat {
    bot: Bot,
}

impl TelegramChat {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn markup(keyboard: &Keyboard) -> Result<InlineKeyboardMarkup, ChatError> {
        let rows = keyboard
            .rows
            .iter()
            .map(|row| row.iter().map(Self::button).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(InlineKeyboardMarkup::new(rows))
    }

    fn button(button: &Button) -> Result<InlineKeyboardButton, ChatError> {
        match button {
            Button::Callback { text, data } => {
                Ok(InlineKeyboardButton::callback(text.clone(), data.clone()))
            }
            Button::Url { text, url } => {
                let url = url::Url::parse(url)
                    .map_err(|e| ChatError::InvalidKeyboard(format!("{url}: {e}")))?;
                Ok(InlineKeyboardButton::url(text.clone(), url))
            }
        }
    }
}

fn tg_chat(chat: ChatId) -> teloxide::types::ChatId {
    teloxide::types::ChatId(chat.value())
}

fn tg_message(message_id: MessageId) -> teloxide::types::MessageId {
    teloxide::types::MessageId(message_id.value())
}

#[async_trait]
impl ChatApi for TelegramChat {
    async fn send_message(
        &self,
        chat: ChatId,
        message: OutgoingMessage,
    ) -> Result<MessageId, ChatError> {
        let mut request = self.bot.send_message(tg_chat(chat), message.text);
        if message.html {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(keyboard) = &message.keyboard {
            request = request.reply_markup(Self::markup(keyboard)?);
        }

        let sent = request.await?;
        Ok(MessageId::new(sent.id.0))
    }

    async fn edit_message(
        &self,
        chat: ChatId,
        message_id: MessageId,
        message: OutgoingMessage,
    ) -> Result<(), ChatError> {
        let mut request =
            self.bot
                .edit_message_text(tg_chat(chat), tg_message(message_id), message.text);
        if message.html {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(keyboard) = &message.keyboard {
            request = request.reply_markup(Self::markup(keyboard)?);
        }

        request.await?;
        Ok(())
    }

    async fn delete_message(&self, chat: ChatId, message_id: MessageId) -> Result<(), ChatError> {
        self.bot
            .delete_message(tg_chat(chat), tg_message(message_id))
            .await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), ChatError> {
        self.bot.answer_callback_query(callback_id.to_string()).await?;
        Ok(())
    }

    async fn copy_message(&self, chat: ChatId, message_id: MessageId) -> Result<(), ChatError> {
        self.bot
            .copy_message(tg_chat(chat), tg_chat(chat), tg_message(message_id))
            .await?;
        Ok(())
    }
}
