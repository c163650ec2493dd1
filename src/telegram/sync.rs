//! Long polling of Telegram updates.
//!
//! This module provides the [`TelegramSync`] struct which drives the teloxide
//! dispatcher. The dispatcher fetches updates with `getUpdates` and hands every
//! message to [`on_message`], which translates it and awaits the [`OnEvent`]
//! callback.
//!
//! Updates of one chat are dispatched in order, one at a time, while different
//! chats are processed concurrently.

use log::{debug, info};
use teloxide::prelude::*;

use crate::telegram::{OnEvent, TelegramClient, to_inbound_event};

/// Long polling loop over the Bot API.
pub struct TelegramSync {
    /// The teloxide bot handle
    bot: teloxide::Bot,
}

impl TelegramSync {
    /// Creates a polling loop for the bot of `client`.
    ///
    /// This does not start polling; call [`TelegramSync::listen`].
    pub fn new(client: &TelegramClient) -> Self {
        TelegramSync { bot: client.bot() }
    }

    /// Polls updates until the process is asked to stop.
    ///
    /// # Arguments
    ///
    /// * `on_event` - Callback invoked for every text or contact message
    pub async fn listen(&self, on_event: OnEvent) {
        info!("starting long polling");

        let handler = Update::filter_message().endpoint(on_message);

        Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![on_event])
            .default_handler(|upd| async move {
                debug!("ignoring non message update {:?}", upd.id);
            })
            .error_handler(LoggingErrorHandler::with_custom_text("telegram"))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("long polling stopped");
    }
}

/// Dispatcher endpoint for every message update.
async fn on_message(message: Message, on_event: OnEvent) -> ResponseResult<()> {
    match to_inbound_event(&message) {
        Some(event) => on_event(event).await,
        None => debug!("ignoring non text message in chat {}", message.chat.id.0),
    }

    Ok(())
}
