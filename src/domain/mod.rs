//! Strongly typed identifiers for the chat platform.
//!
//! Telegram hands out chat ids as 64-bit and message ids as 32-bit integers.
//! Wrapping both prevents passing a chat id where a message id is expected,
//! which matters here because movie records are keyed by message id.

use std::fmt;

/// Identifier of a Telegram chat (group, supergroup or private chat).
///
/// # Examples
///
/// ```rust
/// use cinemanager::domain::ChatId;
///
/// let id = ChatId::new(-100123);
/// assert_eq!(id.value(), -100123);
/// assert_eq!(id.to_string(), "-100123");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChatId(i64);

impl ChatId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a single message inside a chat.
///
/// Movie candidates are stored under the id of the card message that shows
/// them, so this is the lookup key for the whole confirm/reject flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MessageId(i32);

impl MessageId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_displays_raw_value() {
        let id = MessageId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn chat_id_keeps_negative_group_ids() {
        let id = ChatId::new(-1_001_234_567_890);
        assert_eq!(id.value(), -1_001_234_567_890);
    }
}
