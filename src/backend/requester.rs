//! HTTP client for the bingo backend API.
//!
//! This module provides the [`BackendRequester`] struct for issuing the four
//! backend calls the bot relies on.

use std::time::Duration;

use log::{debug, info};
use mockall::automock;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    backend::{
        RequestError,
        request_structs::{CallBingoRequest, JoinGameRequest, RegisterUserRequest},
        response_structs::{CallBingoResponse, JoinGameResponse, StatusResponse},
    },
    utils::normalize_url,
};

/// HTTP client for requesting the bingo backend.
///
/// A single instance is built at startup and shared by every handler. The
/// underlying [`Client`] keeps a connection pool and applies `timeout` to each
/// call, so a hung backend cannot hang a handler forever.
pub struct BackendRequester {
    /// Backend base url, without trailing slash
    url: String,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to the backend.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Registers the user who shared their contact.
    async fn register_user(&self, request: &RegisterUserRequest) -> Result<(), RequestError>;
    /// Joins the current game and returns the assigned ticket.
    async fn join_game(&self, request: &JoinGameRequest) -> Result<JoinGameResponse, RequestError>;
    /// Calls bingo for the user.
    async fn call_bingo(&self, request: &CallBingoRequest)
    -> Result<CallBingoResponse, RequestError>;
    /// Fetches the game status of the user.
    async fn query_status(&self, telegram_id: i64) -> Result<StatusResponse, RequestError>;
}

impl BackendRequester {
    /// Create a new [BackendRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the backend.
    /// * `timeout` - Upper bound for a whole request, connection included.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built (TLS backend initialisation).
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(BackendRequester {
            url: normalize_url(url),
            client,
        })
    }

    /// Sends the request and rejects non-2xx statuses.
    async fn send(request: RequestBuilder) -> Result<Response, RequestError> {
        let response = request.send().await.map_err(RequestError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status(status));
        }

        Ok(response)
    }

    /// Decodes the response body into the expected payload.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RequestError> {
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                RequestError::Malformed(e)
            } else {
                RequestError::Network(e)
            }
        })
    }
}

impl Requester for BackendRequester {
    /// Request `POST /api/user/telegram-auth` to register a user.
    ///
    /// Any 2xx answer is an acknowledgement; the body is ignored.
    async fn register_user(&self, request: &RegisterUserRequest) -> Result<(), RequestError> {
        let url = format!("{}/api/user/telegram-auth", &self.url);
        info!("request user registration for {}", request.telegram_id);
        debug!("request {} -> {:?}", &url, request);

        Self::send(self.client.post(&url).json(request)).await?;

        debug!("response from {}: registered", &url);

        Ok(())
    }

    /// Request `POST /api/game/join` to join the game.
    ///
    /// This api call returns a json object with the assigned ticket:
    /// ```json
    /// { "ticketNumber": "T-0042" }
    /// ```
    async fn join_game(&self, request: &JoinGameRequest) -> Result<JoinGameResponse, RequestError> {
        let url = format!("{}/api/game/join", &self.url);
        info!("request game join for {}", request.telegram_id);
        debug!("request {} -> {:?}", &url, request);

        let response = Self::send(self.client.post(&url).json(request)).await?;
        let join_response: JoinGameResponse = Self::decode(response).await?;

        debug!("response from {} -> {:?}", &url, &join_response);

        Ok(join_response)
    }

    /// Request `POST /api/bingo` to call bingo.
    ///
    /// ```json
    /// { "success": true }
    /// ```
    async fn call_bingo(
        &self,
        request: &CallBingoRequest,
    ) -> Result<CallBingoResponse, RequestError> {
        let url = format!("{}/api/bingo", &self.url);
        info!("request bingo call for {}", request.telegram_id);
        debug!("request {} -> {:?}", &url, request);

        let response = Self::send(self.client.post(&url).json(request)).await?;
        let bingo_response: CallBingoResponse = Self::decode(response).await?;

        debug!("response from {} -> {:?}", &url, &bingo_response);

        Ok(bingo_response)
    }

    /// Request `GET /api/status?telegramId={id}` to read the game status.
    ///
    /// ```json
    /// { "status": "waiting" }
    /// ```
    async fn query_status(&self, telegram_id: i64) -> Result<StatusResponse, RequestError> {
        let url = format!("{}/api/status", &self.url);
        info!("request status for {}", telegram_id);
        debug!("request {}?telegramId={}", &url, telegram_id);

        let response =
            Self::send(self.client.get(&url).query(&[("telegramId", telegram_id)])).await?;
        let status_response: StatusResponse = Self::decode(response).await?;

        debug!(
            "response from {}?telegramId={} -> {}",
            &url, telegram_id, &status_response
        );

        Ok(status_response)
    }
}
