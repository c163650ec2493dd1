//! Response structures for backend API endpoints.
//!
//! Every call is decoded into an explicit payload; a body that does not match
//! is rejected instead of being read field by field.

use serde::Deserialize;
use std::fmt;

/// Ticket identifier issued by the backend.
///
/// The backend may send it as a JSON string or number; either way it is opaque
/// to the bot and rendered verbatim.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TicketNumber {
    Text(String),
    Number(i64),
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TicketNumber::Text(text) => write!(f, "{}", text),
            TicketNumber::Number(number) => write!(f, "{}", number),
        }
    }
}

/// Response from `POST /api/game/join`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameResponse {
    /// Ticket assigned to the player.
    pub ticket_number: TicketNumber,
}

/// Response from `POST /api/bingo`.
///
/// `success` tells whether the bingo call was a win. It is independent from
/// the HTTP status, which is 2xx for both outcomes.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CallBingoResponse {
    pub success: bool,
}

/// Response from `GET /api/status`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    /// Human readable game status, shown verbatim.
    pub status: String,
}

impl fmt::Display for StatusResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "status={}", self.status)
    }
}
