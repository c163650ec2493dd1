//! User-facing texts for bot replies.
//!
//! Every message the bot can send lives here so handlers only decide which one
//! to pick. Telegram renders them as plain text.

/// Label of the reply keyboard button requesting the user's phone number.
pub const SHARE_PHONE_LABEL: &str = "📞 Share Your Phone";

/// Label of the inline button opening the game client.
pub const PLAY_LABEL: &str = "▶️ Play";

/// Welcome message when the user must share a contact before playing.
///
/// # Examples
///
/// ```
/// # use bingo_bot::commands::text_response::format_welcome_contact;
/// assert!(format_welcome_contact().contains("phone number"));
/// ```
pub fn format_welcome_contact() -> String {
    "👋 Welcome to 1Bingo!\n\nPlease share your phone number to continue:".to_owned()
}

/// Welcome message when the play link is offered right away.
pub fn format_welcome_play() -> String {
    "👋 Welcome to 1Bingo!\n\nTap 'Play' to start 🎮".to_owned()
}

pub fn format_contact_saved() -> String {
    "✅ Phone received! Tap 'Play' to continue 🎮".to_owned()
}

pub fn format_contact_error() -> String {
    "❌ Error saving your contact. Please try again later.".to_owned()
}

/// Formats the help message listing the game commands.
///
/// # Examples
///
/// ```
/// # use bingo_bot::commands::text_response::format_help;
/// let help = format_help();
/// assert!(help.contains("/join"));
/// ```
pub fn format_help() -> String {
    let body = "Commands:\n\
        /join - Join a game\n\
        /bingo - Call bingo\n\
        /status - Check game status";

    body.to_owned()
}

/// Formats the join confirmation.
///
/// # Arguments
///
/// * `ticket` - Ticket identifier returned by the backend, shown verbatim
pub fn format_joined(ticket: &str) -> String {
    format!("✅ You joined the game! Your ticket: {}", ticket)
}

pub fn format_join_error() -> String {
    "❌ Failed to join game. Please try again later.".to_owned()
}

pub fn format_bingo_win() -> String {
    "🎉 Congratulations! You called Bingo successfully!".to_owned()
}

pub fn format_bingo_not_yet() -> String {
    "❌ You do not have Bingo yet!".to_owned()
}

pub fn format_bingo_error() -> String {
    "❌ Error calling Bingo. Please try again.".to_owned()
}

/// Formats the game status.
///
/// # Arguments
///
/// * `status` - Status string returned by the backend, shown verbatim
pub fn format_status(status: &str) -> String {
    format!("🎲 Your game status: {}", status)
}

pub fn format_status_error() -> String {
    "❌ Unable to fetch status right now.".to_owned()
}
