//! Bingo command handler.
//!
//! The reply has three disjoint outcomes:
//! - **Win**: the backend answered `success: true`
//! - **Not yet**: the backend answered `success: false`
//! - **Error**: the call failed (network, status, or malformed body)
//!
//! The branch is on the `success` field, never on the HTTP status.

use log::{debug, error, info};

use crate::{
    backend::{CallBingoRequest, Requester},
    commands::{
        CommandContext, CommandResult,
        text_response::{format_bingo_error, format_bingo_not_yet, format_bingo_win},
    },
};

/// Calls bingo for the requesting user.
pub async fn handle_bingo<R: Requester>(requester: &R, context: &CommandContext) -> CommandResult {
    debug!("handling bingo command");

    let request = CallBingoRequest {
        telegram_id: context.chat_id,
    };

    let response = match requester.call_bingo(&request).await {
        Ok(bingo) if bingo.success => {
            info!("bingo won by chat {}", context.chat_id);
            format_bingo_win()
        }
        Ok(_) => format_bingo_not_yet(),
        Err(e) => {
            error!("bingo error for chat {}: {}", context.chat_id, e);
            format_bingo_error()
        }
    };

    CommandResult {
        response,
        keyboard: None,
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::backend::{CallBingoResponse, MockRequester, RequestError};

    fn create_test_context() -> CommandContext {
        CommandContext {
            chat_id: 42,
            username: "alice".to_string(),
        }
    }

    fn mock_with(outcome: fn() -> Result<CallBingoResponse, RequestError>) -> MockRequester {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_call_bingo()
            .with(eq(CallBingoRequest { telegram_id: 42 }))
            .times(1)
            .returning(move |_| outcome());
        mock_requester
    }

    #[tokio::test]
    async fn test_handle_bingo_win() {
        let mock_requester = mock_with(|| Ok(CallBingoResponse { success: true }));

        let result = handle_bingo(&mock_requester, &create_test_context()).await;

        assert_eq!(result.response, format_bingo_win());
    }

    #[tokio::test]
    async fn test_handle_bingo_not_yet() {
        let mock_requester = mock_with(|| Ok(CallBingoResponse { success: false }));

        let result = handle_bingo(&mock_requester, &create_test_context()).await;

        assert_eq!(result.response, format_bingo_not_yet());
    }

    #[tokio::test]
    async fn test_handle_bingo_backend_error() {
        let mock_requester =
            mock_with(|| Err(RequestError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)));

        let result = handle_bingo(&mock_requester, &create_test_context()).await;

        assert_eq!(result.response, format_bingo_error());
        assert_ne!(result.response, format_bingo_not_yet());
    }

    #[tokio::test]
    async fn test_handle_bingo_network_error() {
        // Nothing listens on port 1
        let error = reqwest::get("http://127.0.0.1:1").await.unwrap_err();
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_call_bingo()
            .times(1)
            .return_once(move |_| Err(RequestError::Network(error)));

        let result = handle_bingo(&mock_requester, &create_test_context()).await;

        assert_eq!(result.response, format_bingo_error());
    }
}
