//! Telegram Bot API client wrapper.
//!
//! This module provides the [`TelegramClient`] struct, the only place where the
//! bot talks to the Bot API: sending replies, managing the webhook registration
//! and publishing the command menu.

use log::{debug, error, info};
use reqwest::Url;
use teloxide::{
    Bot as TelegramBot,
    requests::Requester,
    types::{
        BotCommand, ButtonRequest, ChatId, InlineKeyboardButton, InlineKeyboardMarkup,
        KeyboardButton, KeyboardMarkup, ReplyMarkup,
    },
};

use crate::events::{Keyboard, OutboundMessage};

/// Commands published in the Telegram command menu.
const COMMAND_MENU: [(&str, &str); 5] = [
    ("start", "Start the bot"),
    ("help", "Show the commands"),
    ("join", "Join a game"),
    ("bingo", "Call bingo"),
    ("status", "Check game status"),
];

/// Client for the Telegram Bot API.
///
/// Cloning the inner [`TelegramBot`] is cheap; it shares one HTTP connection pool.
pub struct TelegramClient {
    /// The teloxide bot handle
    bot: TelegramBot,
}

impl TelegramClient {
    /// Creates a client for the bot identified by `token`.
    ///
    /// No request is issued until the client is used.
    pub fn new(token: &str) -> Self {
        TelegramClient {
            bot: TelegramBot::new(token),
        }
    }

    /// Returns a handle on the underlying bot, for the long polling dispatcher.
    pub fn bot(&self) -> TelegramBot {
        self.bot.clone()
    }

    /// Sends a message, with its keyboard if any.
    ///
    /// Delivery failures are logged and swallowed: a reply that cannot be sent
    /// must never stop the bot.
    pub async fn send(&self, message: &OutboundMessage) {
        let mut request = self
            .bot
            .send_message(ChatId(message.chat_id), message.text.clone());

        if let Some(keyboard) = &message.keyboard {
            request.reply_markup = Some(reply_markup(keyboard));
        }

        match request.await {
            Ok(_) => debug!("message sent to chat {}", message.chat_id),
            Err(e) => error!("failed to send message to chat {}: {}", message.chat_id, e),
        }
    }

    /// Publishes the command menu shown by Telegram clients.
    ///
    /// Failures are logged only; the bot works without a menu.
    pub async fn publish_commands(&self) {
        let commands = COMMAND_MENU
            .iter()
            .map(|(command, description)| BotCommand::new(*command, *description))
            .collect::<Vec<_>>();

        match self.bot.set_my_commands(commands).await {
            Ok(_) => info!("command menu published"),
            Err(e) => error!("failed to publish command menu: {}", e),
        }
    }

    /// Asks Telegram to post updates to `url`.
    pub async fn set_webhook(&self, url: Url) -> Result<(), anyhow::Error> {
        self.bot.set_webhook(url).await?;
        info!("webhook registered");

        Ok(())
    }

    /// Removes any webhook so that long polling receives the updates.
    pub async fn delete_webhook(&self) -> Result<(), anyhow::Error> {
        self.bot.delete_webhook().await?;
        debug!("webhook removed");

        Ok(())
    }
}

/// Renders a keyboard into its Telegram markup.
///
/// - [`Keyboard::RequestContact`] becomes a one-time reply keyboard whose single
///   button shares the user's phone number
/// - [`Keyboard::Link`] becomes an inline button opening the url
fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::RequestContact { label } => ReplyMarkup::Keyboard(
            KeyboardMarkup::new(vec![vec![
                KeyboardButton::new(label.clone()).request(ButtonRequest::Contact),
            ]])
            .resize_keyboard()
            .one_time_keyboard(),
        ),
        Keyboard::Link { label, url } => ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(
            vec![vec![InlineKeyboardButton::url(label.clone(), url.clone())]],
        )),
    }
}
