//! Transient value types flowing through the bot.
//!
//! An [`InboundEvent`] is built by the transport for every relevant update,
//! consumed once by the router, and answered with at most one
//! [`OutboundMessage`]. Nothing here is persisted.

use reqwest::Url;

/// Username used when the sender has no public Telegram username.
pub const NO_USERNAME: &str = "NoUsername";

/// An event received from the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A text message, possibly a bot command.
    Command {
        /// First whitespace-separated token of the text (e.g. `/join@bingo_bot`)
        name: String,
        /// Full message text as received
        text: String,
        /// Conversation identifier
        chat_id: i64,
        /// Public username of the sender, if any
        username: Option<String>,
    },
    /// The user shared their phone number through the contact keyboard.
    ContactShared {
        /// Conversation identifier
        chat_id: i64,
        /// Public username of the sender, if any
        username: Option<String>,
        /// Phone number carried by the contact
        phone_number: String,
        /// First name carried by the contact, if any
        first_name: Option<String>,
    },
}

impl InboundEvent {
    /// Builds a [`InboundEvent::Command`] from raw message text.
    pub fn command(text: &str, chat_id: i64, username: Option<String>) -> Self {
        let name = text.split_whitespace().next().unwrap_or_default().to_owned();

        InboundEvent::Command {
            name,
            text: text.to_owned(),
            chat_id,
            username,
        }
    }

    /// Conversation the event belongs to.
    pub fn chat_id(&self) -> i64 {
        match self {
            InboundEvent::Command { chat_id, .. } => *chat_id,
            InboundEvent::ContactShared { chat_id, .. } => *chat_id,
        }
    }

    /// Sender username, falling back to [`NO_USERNAME`].
    pub fn username(&self) -> String {
        let username = match self {
            InboundEvent::Command { username, .. } => username,
            InboundEvent::ContactShared { username, .. } => username,
        };

        username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(NO_USERNAME)
            .to_owned()
    }
}

/// Keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// One-time reply keyboard with a single button asking for the user's phone number.
    RequestContact {
        /// Button label
        label: String,
    },
    /// Inline button opening an external URL.
    Link {
        /// Button label
        label: String,
        /// Target URL
        url: Url,
    },
}

/// A message to send back to a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Conversation identifier
    pub chat_id: i64,
    /// Plain message text
    pub text: String,
    /// Optional keyboard shown with the message
    pub keyboard: Option<Keyboard>,
}
