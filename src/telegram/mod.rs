//! Telegram Bot API integration for the bot.
//!
//! This module hides every Telegram detail from the rest of the bot:
//! - Translating Telegram messages into [`InboundEvent`]s
//! - Rendering [`OutboundMessage`](crate::events::OutboundMessage)s with their keyboards
//! - Receiving updates, either by long polling or through a webhook
//!
//! # Architecture
//!
//! The module is structured around the [`client::TelegramClient`] which wraps the
//! Bot API connection, and two interchangeable transports:
//! - **Sync**: long polling through the teloxide dispatcher, see [`sync::TelegramSync`]
//! - **Webhook**: an HTTP endpoint Telegram posts updates to, see [`webhook`]
//!
//! Both transports report each event to the same [`OnEvent`] callback.

pub mod client;
pub mod sync;
pub mod webhook;

use std::sync::Arc;

use futures::future::BoxFuture;
use teloxide::types::{Message, Update, UpdateKind};

use crate::events::InboundEvent;

pub use crate::telegram::client::TelegramClient;

/// Callback invoked for every inbound event, whatever the transport.
///
/// The returned future completes once the event is fully handled.
pub type OnEvent = Arc<dyn Fn(InboundEvent) -> BoxFuture<'static, ()> + Send + Sync>;

/// Translates a Telegram message into an inbound event.
///
/// A shared contact wins over any text the message carries. The username is the
/// sender's Telegram handle, when they have one.
///
/// # Returns
///
/// * `Some(InboundEvent)` - The message is a contact share or a text message
/// * `None` - Any other message kind (photos, stickers, service messages...)
pub fn to_inbound_event(message: &Message) -> Option<InboundEvent> {
    let chat_id = message.chat.id.0;
    let username = message
        .from
        .as_ref()
        .and_then(|user| user.username.clone());

    if let Some(contact) = message.contact() {
        return Some(InboundEvent::ContactShared {
            chat_id,
            username,
            phone_number: contact.phone_number.clone(),
            first_name: Some(contact.first_name.clone()).filter(|name| !name.is_empty()),
        });
    }

    message
        .text()
        .map(|text| InboundEvent::command(text, chat_id, username))
}

/// Translates a raw update; only new messages carry events.
pub fn update_to_inbound_event(update: &Update) -> Option<InboundEvent> {
    match &update.kind {
        UpdateKind::Message(message) => to_inbound_event(message),
        _ => None,
    }
}
