//! Contact registration handler.
//!
//! Triggered when the user shares their phone number. The contact is sent to
//! the backend once, whatever the outcome. On success the user receives the
//! play link; on failure a generic error, and they have to share again.

use log::{debug, error, info};
use reqwest::Url;

use crate::{
    backend::{RegisterUserRequest, Requester},
    commands::{
        CommandContext, CommandResult,
        command::Command,
        text_response::{PLAY_LABEL, format_contact_error, format_contact_saved},
    },
    events::Keyboard,
};

/// Registers the user who shared their contact.
///
/// # Returns
///
/// - `Some(CommandResult)`: Always returns a result (success or error message)
/// - `None`: Only if the command is not a `ShareContact` variant
pub async fn handle_register<R: Requester>(
    requester: &R,
    context: &CommandContext,
    command: &Command,
    game_url: &Url,
) -> Option<CommandResult> {
    debug!("handling register command: {:?}", command);

    let (phone_number, first_name) = match command {
        Command::ShareContact {
            phone_number,
            first_name,
        } => (phone_number.clone(), first_name.clone()),
        _ => return None,
    };

    let request = RegisterUserRequest {
        telegram_id: context.chat_id,
        username: context.username.clone(),
        phone_number,
        first_name,
    };

    let result = match requester.register_user(&request).await {
        Ok(()) => {
            info!("contact saved for {}", context.username);
            CommandResult {
                response: format_contact_saved(),
                keyboard: Some(Keyboard::Link {
                    label: PLAY_LABEL.to_owned(),
                    url: game_url.clone(),
                }),
            }
        }
        Err(e) => {
            error!("contact error for chat {}: {}", context.chat_id, e);
            CommandResult {
                response: format_contact_error(),
                keyboard: None,
            }
        }
    };

    debug!("register command result {:?}", result);

    Some(result)
}
