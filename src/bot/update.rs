use crate::domain::{ChatId, MessageId};

/// Platform-independent view of one inbound update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Message(IncomingMessage),
    Callback(CallbackPress),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    /// Text or caption-less messages (stickers, photos) carry `None`.
    pub text: Option<String>,
    /// First name of the author; channel posts have no author.
    pub sender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPress {
    pub id: String,
    pub data: Option<String>,
    /// Chat and id of the message carrying the pressed button, when the
    /// platform still has it.
    pub message: Option<(ChatId, MessageId)>,
}

impl Inbound {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::Callback(_) => "callback",
        }
    }
}
