//! Configuration structures for the bingo bot.
//!
//! This module defines the configuration format. Values come from an optional
//! YAML file, overridden by environment variables.
//!
//! # Configuration File Format
//!
//! ```yaml
//! telegram:
//!   # Bot token issued by BotFather
//!   token: "123456:ABC-DEF"
//!   # How updates are received: polling (default) or webhook
//!   transport: webhook
//!   # Public base URL of this process, required for the webhook transport
//!   public_url: "https://bingo-bot.example.com"
//!
//! backend:
//!   # Base URL of the game backend
//!   url: "https://bingo-backend.example.com"
//!   # Upper bound of one backend call, in seconds
//!   timeout: 10
//!
//! game:
//!   # Web client opened by the play button
//!   client_url: "https://bingo-telegram-web.vercel.app"
//!   # What /start offers first: contact (default) or play
//!   start_policy: contact
//!
//! server:
//!   # Port of the health and webhook endpoints
//!   port: 3000
//!
//! chat:
//!   # Handle the events of one chat one at a time
//!   serialize: true
//! ```
//!
//! # Environment Variables
//!
//! Every key can be set with the `BINGO_` prefix and `__` between sections,
//! for example `BINGO_TELEGRAM__TOKEN` or `BINGO_BACKEND__URL`. The `PORT`
//! variable set by most hosting platforms maps to `server.port`.

use std::path::Path;

use anyhow::{Context, bail};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use reqwest::Url;
use serde::Deserialize;

use crate::{commands::StartPolicy, utils::join_url};

/// Root configuration structure for the bingo bot.
#[derive(Deserialize, Debug)]
pub struct Config {
    /// Telegram configuration
    pub telegram: Telegram,
    /// Game backend configuration
    pub backend: Backend,
    /// Game client configuration
    pub game: Game,
    /// HTTP server configuration
    #[serde(default)]
    pub server: Server,
    /// Chat handling configuration
    #[serde(default)]
    pub chat: Chat,
}

/// How the bot receives Telegram updates.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// The bot asks Telegram for updates with `getUpdates`
    #[default]
    Polling,
    /// Telegram posts updates to `<public_url>/bot<token>`
    Webhook,
}

/// Telegram configuration.
///
/// ```yaml
/// telegram:
///   token: "123456:ABC-DEF"
///   transport: polling
/// ```
#[derive(Deserialize, Debug)]
pub struct Telegram {
    /// Bot token issued by BotFather.
    pub token: String,

    /// Update transport.
    #[serde(default)]
    pub transport: Transport,

    /// Public base URL of this process.
    ///
    /// Only read by the webhook transport, which registers
    /// `<public_url>/bot<token>` with Telegram.
    #[serde(default)]
    pub public_url: Option<String>,
}

/// Game backend configuration.
#[derive(Deserialize, Debug)]
pub struct Backend {
    /// Base URL of the backend.
    ///
    /// Should include the protocol (http/https); a trailing slash is ignored.
    pub url: String,

    /// Timeout of one backend call, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Game client configuration.
#[derive(Deserialize, Debug)]
pub struct Game {
    /// URL opened by the play button.
    pub client_url: String,

    /// Keyboard offered by `/start`.
    #[serde(default)]
    pub start_policy: StartPolicy,
}

/// HTTP server configuration.
#[derive(Deserialize, Debug)]
pub struct Server {
    /// Listening port of the health and webhook endpoints.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Chat handling configuration.
#[derive(Deserialize, Debug)]
pub struct Chat {
    /// When true, events of one chat are handled one at a time, in arrival order.
    #[serde(default = "default_serialize")]
    pub serialize: bool,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            port: default_port(),
        }
    }
}

impl Default for Chat {
    fn default() -> Self {
        Chat {
            serialize: default_serialize(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_port() -> u16 {
    3000
}

fn default_serialize() -> bool {
    true
}

impl Config {
    /// Loads the configuration and validates it.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional YAML file; environment variables override its values
    ///
    /// # Errors
    ///
    /// Fails when the file is missing, when a required key is absent, or when
    /// a URL does not parse.
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        let mut figment = Figment::new();

        if let Some(path) = path {
            if !Path::new(path).exists() {
                bail!("config file {} not found", path);
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Config = figment
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
            .merge(Env::prefixed("BINGO_").split("__"))
            .extract()
            .context("invalid configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Checks the values no deserializer can check.
    fn validate(&self) -> Result<(), anyhow::Error> {
        self.game_url()?;

        if self.telegram.transport == Transport::Webhook {
            self.webhook_url()?;
        }

        Ok(())
    }

    /// Parsed game client URL.
    pub fn game_url(&self) -> Result<Url, anyhow::Error> {
        Url::parse(&self.game.client_url)
            .with_context(|| format!("invalid game.client_url {}", self.game.client_url))
    }

    /// Full webhook URL registered with Telegram.
    pub fn webhook_url(&self) -> Result<Url, anyhow::Error> {
        let Some(public_url) = &self.telegram.public_url else {
            bail!("telegram.public_url is required by the webhook transport");
        };

        let path = crate::telegram::webhook::webhook_path(&self.telegram.token);
        Url::parse(&join_url(public_url, &path))
            .with_context(|| format!("invalid telegram.public_url {}", public_url))
    }
}
