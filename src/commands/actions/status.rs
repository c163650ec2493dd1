//! Status command handler.
//!
//! Reads the user's game status from the backend and shows it verbatim.

use log::{debug, error};

use crate::{
    backend::Requester,
    commands::{
        CommandContext, CommandResult,
        text_response::{format_status, format_status_error},
    },
};

/// Shows the game status of the requesting user.
///
/// The status string is rendered verbatim; any backend failure yields the
/// generic status error text.
pub async fn handle_status<R: Requester>(requester: &R, context: &CommandContext) -> CommandResult {
    debug!("handling status command");

    let response = match requester.query_status(context.chat_id).await {
        Ok(status) => format_status(&status.status),
        Err(e) => {
            error!("status error for chat {}: {}", context.chat_id, e);
            format_status_error()
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
    use crate::backend::{MockRequester, RequestError, StatusResponse};

    fn create_test_context() -> CommandContext {
        CommandContext {
            chat_id: 42,
            username: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn test_handle_status() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_query_status()
            .with(eq(42))
            .times(1)
            .returning(|_| {
                Ok(StatusResponse {
                    status: "waiting".to_string(),
                })
            });

        let result = handle_status(&mock_requester, &create_test_context()).await;

        assert!(result.response.contains("waiting"));
    }

    #[tokio::test]
    async fn test_handle_status_backend_error() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_query_status()
            .times(1)
            .returning(|_| Err(RequestError::Status(reqwest::StatusCode::NOT_FOUND)));

        let result = handle_status(&mock_requester, &create_test_context()).await;

        assert_eq!(result.response, format_status_error());
    }
}
