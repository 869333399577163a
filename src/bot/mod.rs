//! Update dispatch: classifies inbound updates and drives the metadata
//! client and the movie store.
//!
//! Handling is stateless between updates. Everything the confirm/reject
//! buttons need is recovered from the store by the id of the message the
//! button sits under.

pub mod chat;
pub mod command;
pub mod keyboard;
pub mod menu;
pub mod poller;
pub mod render;
pub mod update;

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::clients::omdb::MovieLookup;
use crate::constants::{buttons, replies};
use crate::db::Store;
use crate::domain::{ChatId, MessageId};
use chat::{ChatApi, ChatError};
use command::Command;
use keyboard::{Button, Keyboard, OutgoingMessage};
use menu::MenuPage;
use update::{CallbackPress, Inbound, IncomingMessage};

pub struct Dispatcher {
    chat: Arc<dyn ChatApi>,
    lookup: Arc<dyn MovieLookup>,
    store: Store,
    bot_username: String,
}

impl Dispatcher {
    pub fn new(
        chat: Arc<dyn ChatApi>,
        lookup: Arc<dyn MovieLookup>,
        store: Store,
        bot_username: impl Into<String>,
    ) -> Self {
        Self {
            chat,
            lookup,
            store,
            bot_username: bot_username.into(),
        }
    }

    /// Handles one update. Failures are logged, never returned.
    pub async fn handle(&self, inbound: Inbound) {
        metrics::counter!("bot_updates_total", "kind" => inbound.kind()).increment(1);

        match inbound {
            Inbound::Callback(press) => self.handle_button(press).await,
            Inbound::Message(message) => self.handle_message(message).await,
        }
    }

    async fn handle_message(&self, message: IncomingMessage) {
        let Some(sender) = &message.sender else {
            return;
        };

        let text = message.text.as_deref().unwrap_or_default();
        info!(
            event = "message_received",
            chat_id = %message.chat_id,
            sender = %sender,
            text = %text,
            "Incoming message"
        );

        let result = if text.starts_with('/') {
            match Command::parse(text, &self.bot_username) {
                Some(command) => self.handle_command(message.chat_id, command).await,
                None => {
                    debug!(event = "command_ignored", text = %text, "Not a command for this bot");
                    Ok(())
                }
            }
        } else {
            self.chat
                .copy_message(message.chat_id, message.message_id)
                .await
        };

        if let Err(e) = result {
            error!(
                event = "reply_failed",
                chat_id = %message.chat_id,
                error = %e,
                "Failed to reply"
            );
        }
    }

    async fn handle_command(&self, chat_id: ChatId, command: Command) -> Result<(), ChatError> {
        metrics::counter!("bot_commands_total", "command" => command.name()).increment(1);

        match command {
            Command::Menu => self.send_menu(chat_id).await,
            Command::Backlog => self.send_backlog(chat_id).await,
            Command::Movie { title } => self.propose_movie(chat_id, &title).await,
        }
    }

    async fn send_menu(&self, chat_id: ChatId) -> Result<(), ChatError> {
        let page = MenuPage::First;
        let message = OutgoingMessage::html(page.text()).with_keyboard(page.keyboard());
        self.chat.send_message(chat_id, message).await?;
        Ok(())
    }

    async fn send_backlog(&self, chat_id: ChatId) -> Result<(), ChatError> {
        let text = match self.store.list_backlog().await {
            Ok(movies) => render::backlog(&movies),
            Err(e) => {
                error!(event = "backlog_failed", error = %e, "Failed to list backlog");
                e.to_string()
            }
        };

        self.chat
            .send_message(chat_id, OutgoingMessage::plain(text))
            .await?;
        Ok(())
    }

    async fn propose_movie(&self, chat_id: ChatId, title: &str) -> Result<(), ChatError> {
        if title.is_empty() {
            self.chat
                .send_message(chat_id, OutgoingMessage::plain(replies::MISSING_TITLE))
                .await?;
            return Ok(());
        }

        let movie = match self.lookup.fetch(title).await {
            Ok(movie) => movie,
            Err(e) => {
                warn!(event = "lookup_failed", title = %title, error = %e, "Movie lookup failed");
                self.chat
                    .send_message(chat_id, OutgoingMessage::plain(e.to_string()))
                    .await?;
                return Ok(());
            }
        };

        if !movie.is_found() {
            info!(event = "movie_not_found", title = %title, "Lookup found no movie");
            self.chat
                .send_message(chat_id, OutgoingMessage::plain(render::not_found(&movie)))
                .await?;
            return Ok(());
        }

        let card = OutgoingMessage::html(render::movie_card(&movie)).with_keyboard(vote_keyboard());
        debug!(event = "movie_card", card = %card.text, "Sending movie card");

        let message_id = match self.chat.send_message(chat_id, card).await {
            Ok(id) => id,
            Err(e) => {
                error!(
                    event = "movie_card_failed",
                    chat_id = %chat_id,
                    error = %e,
                    "Failed to send movie card"
                );
                return Ok(());
            }
        };

        if let Err(e) = self.store.save_movie(&movie, message_id).await {
            error!(
                event = "movie_save_failed",
                message_id = %message_id,
                error = %e,
                "Failed to store movie candidate"
            );
        }

        Ok(())
    }

    async fn handle_button(&self, press: CallbackPress) {
        if let Err(e) = self.chat.answer_callback(&press.id).await {
            warn!(event = "callback_ack_failed", error = %e, "Failed to answer callback");
        }

        let Some((chat_id, message_id)) = press.message else {
            warn!(event = "callback_without_message", "Callback has no message attached");
            return;
        };
        let data = press.data.as_deref().unwrap_or_default();

        match data {
            buttons::MOVIE_NO => self.reject_movie(chat_id, message_id).await,
            buttons::MOVIE_YES => self.confirm_movie(chat_id, message_id).await,
            _ => match MenuPage::after_press(data) {
                Some(page) => self.show_menu_page(chat_id, message_id, page).await,
                None => warn!(event = "unknown_button", data = %data, "Unknown button pressed"),
            },
        }
    }

    async fn reject_movie(&self, chat_id: ChatId, message_id: MessageId) {
        match self.store.delete_movie_by_message_id(message_id).await {
            Ok(removed) => debug!(
                event = "movie_rejected",
                message_id = %message_id,
                removed,
                "Removed movie candidate"
            ),
            Err(e) => {
                error!(
                    event = "movie_delete_failed",
                    message_id = %message_id,
                    error = %e,
                    "Failed to delete movie candidate"
                );
                return;
            }
        }

        if let Err(e) = self.chat.delete_message(chat_id, message_id).await {
            error!(
                event = "message_delete_failed",
                message_id = %message_id,
                error = %e,
                "Failed to delete movie card"
            );
        }
    }

    async fn confirm_movie(&self, chat_id: ChatId, message_id: MessageId) {
        let movie = match self.store.get_movie_by_message_id(message_id).await {
            Ok(movie) => movie,
            Err(e) => {
                error!(
                    event = "movie_lookup_by_message_failed",
                    message_id = %message_id,
                    error = %e,
                    "Failed to load movie candidate"
                );
                return;
            }
        };

        let message = OutgoingMessage::html(render::movie_card(&movie));
        if let Err(e) = self.chat.edit_message(chat_id, message_id, message).await {
            error!(
                event = "movie_confirm_failed",
                message_id = %message_id,
                error = %e,
                "Failed to post confirmed movie"
            );
        }
    }

    async fn show_menu_page(&self, chat_id: ChatId, message_id: MessageId, page: MenuPage) {
        let message = OutgoingMessage::html(page.text()).with_keyboard(page.keyboard());
        if let Err(e) = self.chat.edit_message(chat_id, message_id, message).await {
            error!(
                event = "menu_switch_failed",
                message_id = %message_id,
                error = %e,
                "Failed to switch menu page"
            );
        }
    }
}

fn vote_keyboard() -> Keyboard {
    Keyboard::new(vec![vec![
        Button::callback(buttons::MOVIE_YES_LABEL, buttons::MOVIE_YES),
        Button::callback(buttons::MOVIE_NO_LABEL, buttons::MOVIE_NO),
    ]])
}
