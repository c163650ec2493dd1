//! Command classification.
//!
//! This module turns an [`InboundEvent`] into a structured [`Command`]. A shared
//! contact is its own message kind and always wins over text parsing; text is
//! matched by case-sensitive prefix against a fixed command table.

use log::debug;

use crate::events::InboundEvent;

/// Represents a classified bot command.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Command {
    /// Welcome the user
    Start,
    /// Display help information
    Help,
    /// Join the current game
    Join,
    /// Call bingo
    Bingo,
    /// Read the game status
    Status,
    /// Register the user with the shared contact
    ///
    /// # Fields
    ///
    /// * `phone_number` - Phone number carried by the contact
    /// * `first_name` - First name carried by the contact, empty when unknown
    ShareContact {
        phone_number: String,
        first_name: String,
    },
}

/// Text commands, matched in order.
const COMMAND_TABLE: [(&str, Command); 5] = [
    ("/start", Command::Start),
    ("/help", Command::Help),
    ("/join", Command::Join),
    ("/bingo", Command::Bingo),
    ("/status", Command::Status),
];

/// Reasons an event is not a command. None of them produce a reply.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// The text does not start with `/`
    NotACommand,
    /// The text starts with `/` but matches no known command
    Unknown,
}

impl Command {
    /// Classifies an inbound event.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is not a slash command - [`CommandParsingError::NotACommand`]
    /// - The slash command is not in the command table - [`CommandParsingError::Unknown`]
    ///
    /// # Examples
    ///
    /// ```
    /// # use bingo_bot::commands::command::Command;
    /// # use bingo_bot::events::InboundEvent;
    /// let event = InboundEvent::command("/join", 42, None);
    /// assert_eq!(Command::parse(&event), Ok(Command::Join));
    /// ```
    pub fn parse(event: &InboundEvent) -> Result<Self, CommandParsingError> {
        let text = match event {
            InboundEvent::ContactShared {
                phone_number,
                first_name,
                ..
            } => {
                return Ok(Command::ShareContact {
                    phone_number: phone_number.clone(),
                    first_name: first_name.clone().unwrap_or_default(),
                });
            }
            InboundEvent::Command { text, .. } => text,
        };

        if !text.starts_with('/') {
            return Err(CommandParsingError::NotACommand);
        }

        let command = COMMAND_TABLE
            .iter()
            .find(|(prefix, _)| text.starts_with(prefix))
            .map(|(_, command)| command.clone())
            .ok_or(CommandParsingError::Unknown)?;

        debug!("parsed command {:?} from {:?}", command, text);

        Ok(command)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Join => "join",
            Command::Bingo => "bingo",
            Command::Status => "status",
            Command::ShareContact { .. } => "contact",
        }
    }
}
