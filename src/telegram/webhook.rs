//! Webhook transport and health endpoint.
//!
//! In webhook mode Telegram posts each update as JSON to `POST /bot<token>`.
//! The endpoint answers 200 as soon as the body is read and handles the event
//! in a spawned task, so Telegram never retries because of a slow backend.
//!
//! `GET /` answers a static text in both transports so that hosting platforms
//! can probe the process.

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use log::{debug, info, warn};
use teloxide::types::Update;
use tokio::net::TcpListener;

use crate::telegram::{OnEvent, update_to_inbound_event};

/// Body of the health endpoint.
pub const HEALTH_BODY: &str = "✅ 1Bingo Telegram Bot is running!";

/// Path Telegram posts updates to; the token keeps it unguessable.
pub fn webhook_path(token: &str) -> String {
    format!("/bot{}", token)
}

/// Router exposing only the health endpoint.
pub fn health_router() -> Router {
    Router::new().route("/", get(health))
}

/// Router exposing the health endpoint and the webhook at `path`.
pub fn webhook_router(path: &str, on_event: OnEvent) -> Router {
    let webhook = Router::new()
        .route(path, post(receive_update))
        .with_state(on_event);

    health_router().merge(webhook)
}

/// Serves `router` on every interface until the process stops.
pub async fn serve(port: u16, router: Router) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("web server listening on port {}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

async fn health() -> &'static str {
    HEALTH_BODY
}

/// Acknowledges an update, then handles it in the background.
///
/// `on_event` is called here, in request order, and only its future is
/// spawned. Undecodable bodies are acknowledged too: Telegram would retry
/// them forever.
async fn receive_update(State(on_event): State<OnEvent>, body: Bytes) -> StatusCode {
    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => match update_to_inbound_event(&update) {
            Some(event) => {
                tokio::spawn(on_event(event));
            }
            None => debug!("ignoring update {:?}", update.id),
        },
        Err(e) => warn!("failed to decode update: {}", e),
    }

    StatusCode::OK
}
