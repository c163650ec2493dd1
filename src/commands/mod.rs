//! Event routing and command handling.
//!
//! This module provides the complete command processing pipeline for the bot,
//! relaying chat commands to the bingo backend.
//!
//! # Overview
//!
//! Each inbound event goes through:
//! 1. **Classification** - Turning an [`InboundEvent`](crate::events::InboundEvent)
//!    into a [`command::Command`], or ignoring it
//! 2. **Execution** - Routing the command to exactly one handler
//! 3. **Response** - Rendering one reply from the backend result or error
//!
//! # Architecture
//!
//! ```text
//! InboundEvent
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: handle() = parse() + parse_command()
//! └─────────────┘
//!      │
//!      ├── parse() ────────────────────┐
//!      │                               ▼
//!                          ┌──────────────────┐
//!                          │  command::Command│
//!                          └──────────────────┘
//!      │
//!      └── parse_command() ───────────┐
//!                                     ▼
//!                          ┌─────────────────────┐
//!                          │ Action Handlers     │
//!                          │  - handle_start     │
//!                          │  - handle_help      │
//!                          │  - handle_register  │
//!                          │  - handle_join      │
//!                          │  - handle_bingo     │
//!                          │  - handle_status    │
//!                          └─────────────────────┘
//!                                     │
//!                                     ▼
//!                          ┌────────────────────┐
//!                          │  OutboundMessage   │
//!                          └────────────────────┘
//! ```
//!
//! ## Available Commands
//!
//! | Command | Backend call | Description |
//! |---------|--------------|-------------|
//! | `/start` | none | Welcome message with contact request or play link |
//! | `/help` | none | List the game commands |
//! | `/join` | `JoinGame` | Join the game and show the ticket |
//! | `/bingo` | `CallBingo` | Call bingo |
//! | `/status` | `QueryStatus` | Show the game status |
//! | shared contact | `RegisterUser` | Register the phone number, then offer the play link |
//!
//! # Error Handling
//!
//! Text that is not a known command is ignored without reply or log noise.
//! Backend failures never escape a handler: they are logged and turned into a
//! generic reply.
//!
//! # Module Organization
//!
//! - [`commander`] - Router classifying events and executing commands
//! - [`command`] - Command enum and classification logic
//! - [`actions`] - Individual command handler implementations
//! - [`text_response`] - Reply texts

use serde::Deserialize;

use crate::events::Keyboard;

mod actions;
pub mod command;
mod commander;
pub mod text_response;

pub use crate::commands::commander::Commander;

/// What `/start` offers first.
///
/// Both policies are valid; a deployment picks one.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StartPolicy {
    /// Ask for the phone number; the play link comes after registration.
    #[default]
    Contact,
    /// Offer the play link immediately.
    Play,
}

/// Runtime context for command execution.
///
/// # Fields
///
/// * `chat_id` - Conversation where the command was issued
/// * `username` - Sender username, `NoUsername` when absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub chat_id: i64,
    pub username: String,
}

/// Result of command execution.
///
/// # Fields
///
/// * `response` - Text to send back to the conversation
/// * `keyboard` - Optional keyboard attached to the reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub response: String,
    pub keyboard: Option<Keyboard>,
}
