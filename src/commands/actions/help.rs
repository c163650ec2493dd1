//! Help command handler.
//!
//! This is a stateless command that always returns the same help message.

use log::debug;

use crate::commands::{CommandResult, text_response::format_help};

/// Returns the list of game commands. No backend call, no failure mode.
pub fn handle_help() -> CommandResult {
    debug!("handling help command");

    CommandResult {
        response: format_help(),
        keyboard: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_help() {
        let result = handle_help();

        assert!(result.keyboard.is_none());
        assert!(!result.response.is_empty());
    }
}
