//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives a
//! [`CommandContext`](crate::commands::CommandContext), issues at most one
//! backend call, and returns a [`CommandResult`](crate::commands::CommandResult).
//!
//! # Handler Pattern
//!
//! Handlers follow a consistent pattern:
//! 1. Build the backend request from the context (defaults already applied)
//! 2. Await the single backend call
//! 3. Render exactly one reply, success or failure, logging the cause of a failure
//!
//! Handlers never retry and never call each other.
//!
//! # Available Handlers
//!
//! - [`handle_start`] - Welcome message with the configured keyboard
//! - [`handle_help`] - Display help information
//! - [`handle_register`] - Register the user from a shared contact
//! - [`handle_join`] - Join the current game
//! - [`handle_bingo`] - Call bingo
//! - [`handle_status`] - Read the game status

mod bingo;
mod help;
mod join;
mod register;
mod start;
mod status;

pub use crate::commands::actions::{
    bingo::handle_bingo, help::handle_help, join::handle_join, register::handle_register,
    start::handle_start, status::handle_status,
};
