//! # bingo-bot
//!
//! A Telegram bot relaying bingo game commands to a game backend.
//!
//! The bot greets users, registers them once they share their phone number,
//! and lets them join a game, call bingo and check their status. Every game
//! rule lives in the backend; the bot only translates chat messages into
//! backend calls and backend answers into chat replies.
//!
//! ## Commands
//!
//! - `/start` - Welcome message with the contact (or play) keyboard
//! - `/help` - List the commands
//! - `/join` - Join a game and receive a ticket
//! - `/bingo` - Call bingo
//! - `/status` - Show the game status
//!
//! ## Transports
//!
//! Updates are received by long polling (default) or by webhook. Both modes
//! serve a health endpoint on `GET /`.

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod backend;
mod bot;
mod chat_lock;
mod commands;
mod config;
mod events;
mod telegram;
mod utils;

/// Command-line arguments for the bingo bot.
///
/// Configuration comes from an optional YAML file and from environment
/// variables (see [`config::Config`]).
///
/// # Examples
///
/// ```bash
/// bingo-bot --config config.yaml
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Optional: the whole configuration can be given through `BINGO_*`
    /// environment variables instead.
    ///
    /// # Example
    ///
    /// ```yaml
    /// telegram:
    ///   token: "123456:ABC-DEF"
    /// backend:
    ///   url: "https://bingo-backend.example.com"
    /// game:
    ///   client_url: "https://bingo-telegram-web.vercel.app"
    /// ```
    ///
    /// With environment variable overrides:
    ///
    /// ```bash
    /// export BINGO_TELEGRAM__TOKEN="token-from-env"
    /// bingo-bot --config config.yaml
    /// ```
    #[arg(short, long)]
    config: Option<String>,
}

/// Main entry point for the bingo bot.
///
/// 1. **Logging Setup**: `info` level by default, overridden by `RUST_LOG`
/// 2. **Argument Parsing**: parses command-line arguments using `clap`
/// 3. **Configuration Loading**: reads the YAML file and environment variables
/// 4. **Bot Initialization**: builds the Telegram and backend clients
/// 5. **Bot Execution**: runs the configured transport until stopped
///
/// # Error Handling
///
/// Configuration and startup errors are logged and the process returns
/// without panicking. Errors while handling a single event are logged and
/// never stop the bot.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug bingo-bot --config config.yaml
/// ```
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting bingo-bot {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {:#}", e);
            return;
        }
    };

    // Launch bot
    let bot = match Bot::new(config) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {:#}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Bot stopped: {:#}", e);
    }
}
