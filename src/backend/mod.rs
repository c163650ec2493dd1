//! Bingo game backend integration.
//!
//! The backend owns every piece of game state: users, tickets, and win
//! validation. This module only knows how to reach it over HTTP+JSON.
//!
//! # Modules
//!
//! - `requester` - HTTP client issuing the four backend calls
//! - `request_structs` - Request bodies, serialized with the backend field names
//! - `response_structs` - Typed response payloads
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use bingo_bot::backend::{BackendRequester, Requester, JoinGameRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let requester = BackendRequester::new("https://backend.example", Duration::from_secs(10))?;
//! let joined = requester
//!     .join_game(&JoinGameRequest { telegram_id: 42, username: "alice".to_string() })
//!     .await?;
//! println!("ticket {}", joined.ticket_number);
//! # Ok(())
//! # }
//! ```

use std::fmt;

mod request_structs;
mod requester;
mod response_structs;

pub use crate::backend::request_structs::{CallBingoRequest, JoinGameRequest, RegisterUserRequest};
#[cfg(test)]
pub use crate::backend::requester::MockRequester;
pub use crate::backend::requester::{BackendRequester, Requester};
pub use crate::backend::response_structs::{CallBingoResponse, JoinGameResponse, StatusResponse};
#[cfg(test)]
pub use crate::backend::response_structs::TicketNumber;

/// Errors that can occur while calling the backend.
///
/// # Variants
///
/// * `Network` - The request never got a response (connection failure or timeout)
/// * `Status` - The backend answered with a non-2xx status
/// * `Malformed` - The response body does not match the expected schema
#[derive(Debug)]
pub enum RequestError {
    /// Connection failure or timeout.
    Network(reqwest::Error),
    /// Non-2xx HTTP status.
    Status(reqwest::StatusCode),
    /// Body could not be decoded into the expected payload.
    Malformed(reqwest::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::Network(e) if e.is_timeout() => write!(f, "backend timed out: {}", e),
            RequestError::Network(e) => write!(f, "backend unreachable: {}", e),
            RequestError::Status(status) => write!(f, "backend answered with status {}", status),
            RequestError::Malformed(e) => write!(f, "malformed backend response: {}", e),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Network(e) | RequestError::Malformed(e) => Some(e),
            RequestError::Status(_) => None,
        }
    }
}
