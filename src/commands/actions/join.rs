//! Join command handler.
//!
//! Joins the current game and shows the ticket assigned by the backend. The
//! ticket identifier is opaque here and rendered as received.

use log::{debug, error};

use crate::{
    backend::{JoinGameRequest, Requester},
    commands::{
        CommandContext, CommandResult,
        text_response::{format_join_error, format_joined},
    },
};

/// Joins the game for the requesting user.
pub async fn handle_join<R: Requester>(requester: &R, context: &CommandContext) -> CommandResult {
    debug!("handling join command");

    let request = JoinGameRequest {
        telegram_id: context.chat_id,
        username: context.username.clone(),
    };

    let response = match requester.join_game(&request).await {
        Ok(joined) => format_joined(&joined.ticket_number.to_string()),
        Err(e) => {
            error!("join error for chat {}: {}", context.chat_id, e);
            format_join_error()
        }
    };

    let result = CommandResult {
        response,
        keyboard: None,
    };

    debug!("join command result {:?}", result);

    result
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::backend::{JoinGameResponse, MockRequester, RequestError, TicketNumber};

    fn create_test_context(username: &str) -> CommandContext {
        CommandContext {
            chat_id: 42,
            username: username.to_string(),
        }
    }

    #[tokio::test]
    async fn test_handle_join_embeds_ticket() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_join_game()
            .with(eq(JoinGameRequest {
                telegram_id: 42,
                username: "NoUsername".to_string(),
            }))
            .times(1)
            .returning(|_| {
                Ok(JoinGameResponse {
                    ticket_number: TicketNumber::Text("T-0042".to_string()),
                })
            });

        let result = handle_join(&mock_requester, &create_test_context("NoUsername")).await;

        assert_eq!(result.response, format_joined("T-0042"));
        assert!(result.response.contains("T-0042"));
        assert!(result.keyboard.is_none());
    }

    #[tokio::test]
    async fn test_handle_join_numeric_ticket() {
        let mut mock_requester = MockRequester::new();
        mock_requester.expect_join_game().times(1).returning(|_| {
            Ok(JoinGameResponse {
                ticket_number: TicketNumber::Number(7),
            })
        });

        let result = handle_join(&mock_requester, &create_test_context("alice")).await;

        assert_eq!(result.response, format_joined("7"));
    }

    #[tokio::test]
    async fn test_handle_join_backend_error() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_join_game()
            .times(1)
            .returning(|_| Err(RequestError::Status(reqwest::StatusCode::CONFLICT)));

        let result = handle_join(&mock_requester, &create_test_context("alice")).await;

        assert_eq!(result.response, format_join_error());
    }
}
