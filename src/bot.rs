//! Bot module wiring Telegram to the bingo backend.
//!
//! This module provides the main [`Bot`] implementation that connects the
//! Telegram client with the game backend. It owns the bot lifecycle: choosing
//! the transport, publishing the command menu and handling every event.
//!
//! # Overview
//!
//! Users talk to the bot with slash commands and by sharing their contact.
//! Each event is routed by the [`Commander`], which calls the backend when
//! needed and produces at most one reply.
//!
//! # Transports
//!
//! 1. **Polling**: any webhook is removed, the health endpoint is served in a
//!    background task and the dispatcher long polls updates.
//!
//! 2. **Webhook**: `<public_url>/bot<token>` is registered with Telegram and the
//!    HTTP server receives updates next to the health endpoint.
//!
//! # Event Processing Flow
//!
//! ```text
//! Telegram Update → InboundEvent → Chat Lock → Commander → OutboundMessage → Telegram
//! ```
//!
//! # Example
//!
//! ```no_run
//! # use bingo_bot::bot::Bot;
//! # use bingo_bot::config::Config;
//! # async fn run() -> Result<(), anyhow::Error> {
//! let config = Config::load(Some("config.yaml"))?;
//!
//! let bot = Bot::new(config)?;
//! bot.start().await?; // Runs until stopped
//! # Ok(())
//! # }
//! ```

use std::{sync::Arc, time::Duration};

use futures::FutureExt;
use log::{error, info};
use reqwest::Url;

use crate::{
    backend::BackendRequester,
    chat_lock::{ChatLock, ChatTicket},
    commands::Commander,
    config::{Config, Transport},
    events::InboundEvent,
    telegram::{
        OnEvent, TelegramClient,
        sync::TelegramSync,
        webhook::{health_router, serve, webhook_path, webhook_router},
    },
};

/// Everything needed to handle one event, moved into its task.
struct EventContext {
    event: InboundEvent,
    telegram_client: Arc<TelegramClient>,
    commander: Arc<Commander<BackendRequester>>,
    ticket: Option<ChatTicket>,
}

/// Main bot orchestrator.
///
/// Holds the shared services and starts the configured transport.
pub struct Bot {
    /// Telegram client, shared with every handler
    telegram_client: Arc<TelegramClient>,

    /// Command router, shared with every handler
    commander: Arc<Commander<BackendRequester>>,

    /// Per-chat lock, absent when chat serialization is disabled
    chat_lock: Option<Arc<ChatLock>>,

    /// Update transport
    transport: Transport,

    /// Webhook URL, set for the webhook transport
    webhook_url: Option<Url>,

    /// Path of the webhook route
    webhook_path: String,

    /// Port of the HTTP server
    port: u16,
}

impl Bot {
    /// Creates a bot from its configuration.
    ///
    /// Nothing is sent to Telegram or to the backend yet.
    ///
    /// # Errors
    ///
    /// Fails if a configured URL is invalid or the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let game_url = config.game_url()?;
        let webhook_url = match config.telegram.transport {
            Transport::Webhook => Some(config.webhook_url()?),
            Transport::Polling => None,
        };

        let requester = BackendRequester::new(
            &config.backend.url,
            Duration::from_secs(config.backend.timeout),
        )?;
        let commander = Arc::new(Commander::new(
            requester,
            game_url,
            config.game.start_policy,
        ));

        let chat_lock = config.chat.serialize.then(|| Arc::new(ChatLock::new()));

        Ok(Bot {
            telegram_client: Arc::new(TelegramClient::new(&config.telegram.token)),
            commander,
            chat_lock,
            transport: config.telegram.transport,
            webhook_url,
            webhook_path: webhook_path(&config.telegram.token),
            port: config.server.port,
        })
    }

    /// Starts the bot and runs until the transport stops.
    ///
    /// # Errors
    ///
    /// Fails if the webhook cannot be registered or removed, or if the HTTP
    /// server cannot bind its port in webhook mode.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        self.telegram_client.publish_commands().await;

        let on_event = self.on_event();

        match (self.transport, self.webhook_url) {
            (Transport::Webhook, Some(webhook_url)) => {
                self.telegram_client.set_webhook(webhook_url).await?;
                info!("receiving updates by webhook");

                serve(self.port, webhook_router(&self.webhook_path, on_event)).await?;
            }
            _ => {
                self.telegram_client.delete_webhook().await?;

                // Health endpoint runs beside polling and must not stop it
                let port = self.port;
                tokio::spawn(async move {
                    if let Err(e) = serve(port, health_router()).await {
                        error!("health server stopped: {}", e);
                    }
                });

                TelegramSync::new(&self.telegram_client)
                    .listen(on_event)
                    .await;
            }
        }

        Ok(())
    }

    /// Builds the callback the transports invoke for every event.
    ///
    /// The chat ticket is reserved when the callback is called, before the
    /// returned future is spawned, so events keep their arrival order.
    fn on_event(&self) -> OnEvent {
        let telegram_client = Arc::clone(&self.telegram_client);
        let commander = Arc::clone(&self.commander);
        let chat_lock = self.chat_lock.clone();

        Arc::new(move |event: InboundEvent| {
            let ticket = chat_lock
                .as_ref()
                .map(|chat_lock| chat_lock.reserve(event.chat_id()));
            let ctx = EventContext {
                event,
                telegram_client: Arc::clone(&telegram_client),
                commander: Arc::clone(&commander),
                ticket,
            };
            Self::handle_event(ctx).boxed()
        })
    }

    /// Handles one event and sends the reply, if any.
    ///
    /// When chat serialization is on, the chat is held from routing until the
    /// reply is sent.
    async fn handle_event(ctx: EventContext) {
        let _guard = match ctx.ticket {
            Some(ticket) => Some(ticket.wait().await),
            None => None,
        };

        let Some(message) = ctx.commander.handle(&ctx.event).await else {
            return;
        };

        ctx.telegram_client.send(&message).await;
    }
}
