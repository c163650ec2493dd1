//! Start command handler.
//!
//! Welcomes the user. Depending on the deployment's [`StartPolicy`], the reply
//! either asks for the phone number first or offers the play link directly.
//! No backend call is made.

use log::debug;
use reqwest::Url;

use crate::{
    commands::{
        CommandResult, StartPolicy,
        text_response::{PLAY_LABEL, SHARE_PHONE_LABEL, format_welcome_contact, format_welcome_play},
    },
    events::Keyboard,
};

/// Returns the welcome message with the keyboard required by `policy`.
pub fn handle_start(policy: StartPolicy, game_url: &Url) -> CommandResult {
    debug!("handling start command with policy {:?}", policy);

    match policy {
        StartPolicy::Contact => CommandResult {
            response: format_welcome_contact(),
            keyboard: Some(Keyboard::RequestContact {
                label: SHARE_PHONE_LABEL.to_owned(),
            }),
        },
        StartPolicy::Play => CommandResult {
            response: format_welcome_play(),
            keyboard: Some(Keyboard::Link {
                label: PLAY_LABEL.to_owned(),
                url: game_url.clone(),
            }),
        },
    }
}
