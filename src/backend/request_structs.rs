//! Request bodies for the backend API.
//!
//! Field names are defined by the backend and must match exactly. The
//! registration call uses snake_case, the game calls use camelCase.

use serde::Serialize;

/// Body of `POST /api/user/telegram-auth`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    /// Chat identifier of the user
    pub telegram_id: i64,
    /// Telegram username, `NoUsername` when the user has none
    pub username: String,
    /// Phone number shared by the user
    pub phone_number: String,
    /// First name from the shared contact, empty when unknown
    pub first_name: String,
}

/// Body of `POST /api/game/join`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameRequest {
    pub telegram_id: i64,
    pub username: String,
}

/// Body of `POST /api/bingo`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallBingoRequest {
    pub telegram_id: i64,
}
