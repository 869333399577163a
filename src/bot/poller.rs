//! Long-polling loop feeding Telegram updates to the dispatcher.

use std::future::Future;

use futures::StreamExt;
use teloxide::Bot;
use teloxide::types::{Update, UpdateKind};
use teloxide::update_listeners::{AsUpdateStream, Polling};
use tracing::{debug, info, warn};

use super::Dispatcher;
use super::update::{CallbackPress, Inbound, IncomingMessage};
use crate::constants::polling;
use crate::domain::{ChatId, MessageId};

/// Maps a raw Telegram update onto the bot's own event type.
///
/// Update kinds the bot does not react to yield `None`.
#[must_use]
pub fn to_inbound(update: Update) -> Option<Inbound> {
    match update.kind {
        UpdateKind::Message(msg) => Some(Inbound::Message(IncomingMessage {
            chat_id: ChatId::new(msg.chat.id.0),
            message_id: MessageId::new(msg.id.0),
            text: msg.text().map(str::to_owned),
            sender: msg.from.as_ref().map(|user| user.first_name.clone()),
        })),
        UpdateKind::CallbackQuery(query) => Some(Inbound::Callback(CallbackPress {
            id: query.id.clone(),
            data: query.data.clone(),
            message: query
                .message
                .as_ref()
                .map(|m| (ChatId::new(m.chat().id.0), MessageId::new(m.id().0))),
        })),
        _ => None,
    }
}

/// Polls until `shutdown` resolves, handling updates strictly one at a time.
///
/// Offsets and backoff after failed requests are left to teloxide's
/// [`Polling`] listener.
pub async fn run<S>(bot: Bot, dispatcher: &Dispatcher, dump_updates: bool, shutdown: S)
where
    S: Future<Output = ()>,
{
    let mut listener = Polling::builder(bot).timeout(polling::TIMEOUT).build();
    let updates = listener.as_stream();
    tokio::pin!(updates);
    tokio::pin!(shutdown);

    loop {
        let next = tokio::select! {
            () = &mut shutdown => {
                info!(event = "polling_stopped", "Stop listening for updates.");
                return;
            }
            next = updates.next() => next,
        };

        match next {
            Some(Ok(update)) => {
                if dump_updates {
                    debug!(event = "update_raw", update = ?update, "Raw update");
                }
                match to_inbound(update) {
                    Some(inbound) => {
                        debug!(event = "update_received", kind = inbound.kind(), "Update received");
                        dispatcher.handle(inbound).await;
                    }
                    None => debug!(event = "update_skipped", "Ignoring unsupported update kind"),
                }
            }
            Some(Err(e)) => warn!(event = "poll_failed", error = %e, "Failed to get updates"),
            None => {
                info!(event = "polling_stopped", "Update stream ended");
                return;
            }
        }
    }
}
