//! Welcome message commands.
//!
//! The greeting itself is sent by the member-join event handler.

use tracing::info;

use crate::bot::dispatcher::AppState;
use crate::i18n::{fill, get_text, get_text_with};
use crate::platform::Outgoing;
use crate::utils::html_escape;

use super::{CommandError, CommandInput, CommandResult, reply, require_admin};

/// Name of the `{username}` placeholder, replaced by the new member's mention.
pub const USERNAME_PLACEHOLDER: &str = "username";

/// Handle /setwelcome command.
///
/// Usage: /setwelcome <message>, where the message may contain `{username}`.
pub async fn setwelcome_command(state: &AppState, input: &CommandInput) -> CommandResult {
    let admin_id = require_admin(state, input, "common.admins_only").await?;

    if input.args.is_empty() {
        return Err(CommandError::Usage(format!(
            "{}\n{}",
            get_text("welcome.usage"),
            get_text("welcome.placeholders")
        )));
    }

    state.settings(input.chat).set_welcome_message(input.args.as_str());
    info!("Welcome message updated in chat {} by {}", input.chat, admin_id);

    let text = get_text_with("welcome.saved", &[("message", &html_escape(&input.args))]);
    reply(state, input, Outgoing::html(text)).await
}

/// Build the greeting for a new member.
///
/// Falls back to the default greeting when the chat has no template.
pub fn format_welcome(template: Option<&str>, mention: &str) -> String {
    let args = [(USERNAME_PLACEHOLDER, mention)];
    match template {
        Some(template) => fill(template, &args),
        None => get_text_with("welcome.default", &args),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn test_format_welcome_substitutes_mention() {
        assert_eq!(format_welcome(Some("Hi {username}!"), "Bob"), "Hi Bob!");
        assert_eq!(format_welcome(Some("No placeholder"), "Bob"), "No placeholder");
    }

    #[test]
    fn test_format_welcome_default() {
        let text = format_welcome(None, "Bob");
        assert!(text.starts_with("Yoh-koh-so, Bob! ☠️"));
        assert!(text.ends_with("Prove your devotion… the Cult watches. 👁️"));
    }

    #[tokio::test]
    async fn test_setwelcome_stores_template() {
        let (state, platform) = test_state(MockPlatform::new());

        setwelcome_command(&state, &input(ADMIN, "Welcome, {username}! <Read> the rules"))
            .await
            .unwrap();

        assert_eq!(
            state.settings(CHAT).welcome_message().as_deref(),
            Some("Welcome, {username}! <Read> the rules")
        );
        assert_eq!(
            platform.sent_texts(),
            vec![
                "✅ Welcome message for this chat set to:\n<code>Welcome, {username}! &lt;Read&gt; the rules</code>"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_setwelcome_without_text() {
        let (state, _platform) = test_state(MockPlatform::new());

        let err = setwelcome_command(&state, &input(ADMIN, "")).await.unwrap_err();

        assert!(matches!(err, CommandError::Usage(_)));
        assert_eq!(state.settings(CHAT).welcome_message(), None);
    }
}
