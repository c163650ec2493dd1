//! Event routing and command execution.
//!
//! This module provides the [`Commander`] struct, the event router of the bot.
//! It classifies inbound events and routes each one to exactly one handler.
//!
//! # Flow
//!
//! ```text
//! InboundEvent → parse() → Command → parse_command() → CommandResult → OutboundMessage
//! ```
//!
//! The commander holds no mutable state. It is built once at startup, shared
//! behind an `Arc`, and concurrent events route independently.
//!
//! # Examples
//!
//! ```no_run
//! # use bingo_bot::commands::{Commander, StartPolicy};
//! # use bingo_bot::backend::BackendRequester;
//! # use bingo_bot::events::InboundEvent;
//! # use reqwest::Url;
//! # async fn example(requester: BackendRequester) {
//! let commander = Commander::new(
//!     requester,
//!     Url::parse("https://game.example").unwrap(),
//!     StartPolicy::Contact,
//! );
//!
//! let event = InboundEvent::command("/status", 42, None);
//! if let Some(message) = commander.handle(&event).await {
//!     println!("reply: {}", message.text);
//! }
//! # }
//! ```

use log::debug;
use reqwest::Url;

use crate::{
    backend::Requester,
    commands::{
        CommandContext, CommandResult, StartPolicy,
        actions::{
            handle_bingo, handle_help, handle_join, handle_register, handle_start, handle_status,
        },
        command::Command,
    },
    events::{InboundEvent, OutboundMessage},
};

/// Event router for classifying events and executing commands.
///
/// The Commander is responsible for:
/// - Classifying inbound events into commands
/// - Silently dropping anything that is not a known command
/// - Routing commands to their handler
/// - Wrapping the handler result into an outbound message
///
/// # Supported Commands
///
/// - `/start` - Welcome message
/// - `/help` - Display help information
/// - `/join` - Join the game
/// - `/bingo` - Call bingo
/// - `/status` - Show the game status
/// - shared contact - Register the user
pub struct Commander<R: Requester> {
    /// Backend client shared by every handler
    requester: R,
    /// Game client opened by the play button
    game_url: Url,
    /// Keyboard offered by `/start`
    start_policy: StartPolicy,
}

impl<R: Requester> Commander<R> {
    /// Creates a new Commander.
    ///
    /// # Arguments
    ///
    /// * `requester` - Backend client used by the handlers
    /// * `game_url` - Game client URL behind the play button
    /// * `start_policy` - What `/start` offers first
    pub fn new(requester: R, game_url: Url, start_policy: StartPolicy) -> Self {
        Commander {
            requester,
            game_url,
            start_policy,
        }
    }

    /// Classifies an inbound event.
    ///
    /// # Returns
    ///
    /// * `Some(Command)` - The event is a contact share or a known command
    /// * `None` - Anything else; the event must be ignored without reply
    pub fn parse(&self, event: &InboundEvent) -> Option<Command> {
        match Command::parse(event) {
            Ok(command) => Some(command),
            Err(e) => {
                debug!("ignoring event in chat {}: {:?}", event.chat_id(), e);
                None
            }
        }
    }

    /// Executes a command and returns the result.
    ///
    /// # Command Handlers
    ///
    /// - [`Command::Start`] → [`handle_start`]
    /// - [`Command::Help`] → [`handle_help`]
    /// - [`Command::Join`] → [`handle_join`]
    /// - [`Command::Bingo`] → [`handle_bingo`]
    /// - [`Command::Status`] → [`handle_status`]
    /// - [`Command::ShareContact`] → [`handle_register`]
    pub async fn parse_command(
        &self,
        command: &Command,
        context: &CommandContext,
    ) -> Option<CommandResult> {
        let result = match command {
            Command::Start => handle_start(self.start_policy, &self.game_url),
            Command::Help => handle_help(),
            Command::Join => handle_join(&self.requester, context).await,
            Command::Bingo => handle_bingo(&self.requester, context).await,
            Command::Status => handle_status(&self.requester, context).await,
            Command::ShareContact { .. } => {
                handle_register(&self.requester, context, command, &self.game_url).await?
            }
        };

        Some(result)
    }

    /// Routes one event end to end.
    ///
    /// # Returns
    ///
    /// * `Some(OutboundMessage)` - The reply to send to the event's chat
    /// * `None` - The event was not for the bot
    pub async fn handle(&self, event: &InboundEvent) -> Option<OutboundMessage> {
        let command = self.parse(event)?;

        let context = CommandContext {
            chat_id: event.chat_id(),
            username: event.username(),
        };

        debug!(
            "routing {} command for chat {}",
            command.name(),
            context.chat_id
        );

        let result = self.parse_command(&command, &context).await?;

        Some(OutboundMessage {
            chat_id: context.chat_id,
            text: result.response,
            keyboard: result.keyboard,
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        backend::{
            CallBingoResponse, JoinGameRequest, JoinGameResponse, MockRequester,
            RegisterUserRequest, RequestError, StatusResponse, TicketNumber,
        },
        commands::text_response::{
            PLAY_LABEL, format_bingo_error, format_bingo_not_yet, format_bingo_win, format_help,
            format_join_error, format_welcome_contact,
        },
        events::Keyboard,
    };

    fn game_url() -> Url {
        Url::parse("https://game.example").unwrap()
    }

    fn create_commander(mock_requester: MockRequester) -> Commander<MockRequester> {
        Commander::new(mock_requester, game_url(), StartPolicy::Contact)
    }

    fn text(body: &str, username: Option<&str>) -> InboundEvent {
        InboundEvent::command(body, 42, username.map(str::to_string))
    }

    /// Requester that fails the test on any call
    fn silent_requester() -> MockRequester {
        let mut mock_requester = MockRequester::new();
        mock_requester.expect_register_user().never();
        mock_requester.expect_join_game().never();
        mock_requester.expect_call_bingo().never();
        mock_requester.expect_query_status().never();
        mock_requester
    }

    #[tokio::test]
    async fn test_unrecognized_text_is_ignored() {
        let commander = create_commander(silent_requester());

        assert!(commander.handle(&text("hello", None)).await.is_none());
        assert!(commander.handle(&text("/unknown", None)).await.is_none());
    }

    #[tokio::test]
    async fn test_start_needs_no_backend() {
        let commander = create_commander(silent_requester());

        let message = commander.handle(&text("/start", None)).await.unwrap();

        assert_eq!(message.chat_id, 42);
        assert_eq!(message.text, format_welcome_contact());
        assert!(matches!(
            message.keyboard,
            Some(Keyboard::RequestContact { .. })
        ));
    }

    #[tokio::test]
    async fn test_start_with_play_policy() {
        let commander = Commander::new(silent_requester(), game_url(), StartPolicy::Play);

        let message = commander.handle(&text("/start", None)).await.unwrap();

        assert!(matches!(message.keyboard, Some(Keyboard::Link { .. })));
    }

    #[tokio::test]
    async fn test_help_needs_no_backend() {
        let commander = create_commander(silent_requester());

        let message = commander.handle(&text("/help", None)).await.unwrap();

        assert_eq!(message.text, format_help());
        assert!(message.keyboard.is_none());
    }

    #[tokio::test]
    async fn test_join_defaults_username() {
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
        let commander = create_commander(mock_requester);

        let message = commander.handle(&text("/join", None)).await.unwrap();

        assert!(message.text.contains("T-0042"));
    }

    #[tokio::test]
    async fn test_bingo_three_outcomes() {
        let outcomes: [(fn() -> Result<CallBingoResponse, RequestError>, String); 3] = [
            (|| Ok(CallBingoResponse { success: true }), format_bingo_win()),
            (
                || Ok(CallBingoResponse { success: false }),
                format_bingo_not_yet(),
            ),
            (
                || Err(RequestError::Status(reqwest::StatusCode::BAD_GATEWAY)),
                format_bingo_error(),
            ),
        ];

        for (outcome, expected) in outcomes {
            let mut mock_requester = MockRequester::new();
            mock_requester
                .expect_call_bingo()
                .times(1)
                .returning(move |_| outcome());
            let commander = create_commander(mock_requester);

            let message = commander.handle(&text("/bingo", None)).await.unwrap();

            assert_eq!(message.text, expected);
        }
    }

    #[tokio::test]
    async fn test_network_error_yields_generic_message() {
        // Nothing listens on port 1
        let error = reqwest::get("http://127.0.0.1:1").await.unwrap_err();
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_join_game()
            .times(1)
            .return_once(move |_| Err(RequestError::Network(error)));
        let commander = create_commander(mock_requester);

        let message = commander.handle(&text("/join", Some("alice"))).await.unwrap();

        assert_eq!(message.chat_id, 42);
        assert_eq!(message.text, format_join_error());
        assert!(message.keyboard.is_none());
    }

    #[tokio::test]
    async fn test_status_renders_backend_status() {
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
        let commander = create_commander(mock_requester);

        let message = commander.handle(&text("/status", Some("alice"))).await.unwrap();

        assert!(message.text.contains("waiting"));
    }

    #[tokio::test]
    async fn test_contact_registration() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_register_user()
            .with(eq(RegisterUserRequest {
                telegram_id: 42,
                username: "NoUsername".to_string(),
                phone_number: "+100".to_string(),
                first_name: String::new(),
            }))
            .times(1)
            .returning(|_| Ok(()));
        let commander = create_commander(mock_requester);

        let event = InboundEvent::ContactShared {
            chat_id: 42,
            username: None,
            phone_number: "+100".to_string(),
            first_name: Some(String::new()),
        };
        let message = commander.handle(&event).await.unwrap();

        assert!(matches!(
            message.keyboard,
            Some(Keyboard::Link { label, .. }) if label == PLAY_LABEL
        ));
    }

    #[tokio::test]
    async fn test_redelivered_event_is_not_deduplicated() {
        let mut mock_requester = MockRequester::new();
        mock_requester.expect_query_status().times(2).returning(|_| {
            Ok(StatusResponse {
                status: "playing".to_string(),
            })
        });
        let commander = create_commander(mock_requester);
        let event = text("/status", None);

        let first = commander.handle(&event).await;
        let second = commander.handle(&event).await;

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_parse_command_help() {
        let commander = create_commander(silent_requester());
        let context = CommandContext {
            chat_id: 42,
            username: "alice".to_string(),
        };

        let result = commander.parse_command(&Command::Help, &context).await;

        assert_eq!(result.unwrap().response, format_help());
    }
}
