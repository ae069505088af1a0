//! Protection toggle commands: /nobots, /cleanlinked, /antichannelpin.
//!
//! All three share one state machine. `on`/`yes` enables, `off`/`no`
//! disables, no argument reports the current state.

use tracing::info;

use crate::bot::dispatcher::AppState;
use crate::i18n::{get_text, get_text_with};
use crate::platform::Outgoing;
use crate::store::Toggle;

use super::{CommandError, CommandInput, CommandResult, reply, require_admin};

/// What a toggle command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleRequest {
    Query,
    Set(bool),
}

/// Parse the first argument of a toggle command (case-insensitive).
///
/// Returns `None` for anything that is not a known word.
pub fn parse_toggle_arg(args: &str) -> Option<ToggleRequest> {
    let Some(word) = args.split_whitespace().next() else {
        return Some(ToggleRequest::Query);
    };

    match word.to_lowercase().as_str() {
        "on" | "yes" => Some(ToggleRequest::Set(true)),
        "off" | "no" => Some(ToggleRequest::Set(false)),
        _ => None,
    }
}

/// Handle a toggle command.
pub async fn toggle_command(state: &AppState, input: &CommandInput, toggle: Toggle) -> CommandResult {
    let denial = match toggle {
        Toggle::AntiChannelPin => "toggles.denied_antichannelpin",
        Toggle::NoBots | Toggle::CleanLinked => "common.admins_only",
    };
    let admin_id = require_admin(state, input, denial).await?;

    let request = parse_toggle_arg(&input.args)
        .ok_or_else(|| CommandError::Usage(get_text("toggles.invalid")))?;

    let settings = state.settings(input.chat);
    let key = match request {
        ToggleRequest::Query => {
            if settings.toggle(toggle) {
                "toggles.currently_enabled"
            } else {
                "toggles.currently_disabled"
            }
        }
        ToggleRequest::Set(enabled) => {
            settings.set_toggle(toggle, enabled);
            info!(
                "{:?} set to {} in chat {} by {}",
                toggle, enabled, input.chat, admin_id
            );
            if enabled {
                "toggles.now_enabled"
            } else {
                "toggles.now_disabled"
            }
        }
    };

    let text = get_text_with(key, &[("feature", &get_text(toggle.label_key()))]);
    reply(state, input, Outgoing::html(text)).await
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn test_parse_toggle_arg() {
        assert_eq!(parse_toggle_arg(""), Some(ToggleRequest::Query));
        assert_eq!(parse_toggle_arg("ON"), Some(ToggleRequest::Set(true)));
        assert_eq!(parse_toggle_arg("yes please"), Some(ToggleRequest::Set(true)));
        assert_eq!(parse_toggle_arg("No"), Some(ToggleRequest::Set(false)));
        assert_eq!(parse_toggle_arg("off"), Some(ToggleRequest::Set(false)));
        assert_eq!(parse_toggle_arg("maybe"), None);
    }

    #[tokio::test]
    async fn test_toggle_on_twice_then_query() {
        let (state, platform) = test_state(MockPlatform::new());

        toggle_command(&state, &input(ADMIN, "on"), Toggle::NoBots).await.unwrap();
        toggle_command(&state, &input(ADMIN, "on"), Toggle::NoBots).await.unwrap();
        assert!(state.settings(CHAT).toggle(Toggle::NoBots));

        toggle_command(&state, &input(ADMIN, ""), Toggle::NoBots).await.unwrap();
        assert!(state.settings(CHAT).toggle(Toggle::NoBots));

        assert_eq!(
            platform.sent_texts(),
            vec![
                "✅ Anti-bot protection is now <b>enabled</b>.".to_string(),
                "✅ Anti-bot protection is now <b>enabled</b>.".to_string(),
                "✅ Anti-bot protection is currently <b>enabled</b>.".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_query_never_changes_state() {
        let (state, platform) = test_state(MockPlatform::new());

        toggle_command(&state, &input(ADMIN, ""), Toggle::CleanLinked)
            .await
            .unwrap();

        assert!(!state.settings(CHAT).toggle(Toggle::CleanLinked));
        assert_eq!(
            platform.sent_texts(),
            vec!["❌ Deletion of linked channel messages is currently <b>disabled</b>.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_toggle_off() {
        let (state, platform) = test_state(MockPlatform::new());
        state.settings(CHAT).set_toggle(Toggle::AntiChannelPin, true);

        toggle_command(&state, &input(ADMIN, "no"), Toggle::AntiChannelPin)
            .await
            .unwrap();

        assert!(!state.settings(CHAT).toggle(Toggle::AntiChannelPin));
        assert_eq!(
            platform.sent_texts(),
            vec!["❌ Anti-channel pin is now <b>disabled</b>.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_invalid_argument_keeps_state() {
        let (state, _platform) = test_state(MockPlatform::new());

        let err = toggle_command(&state, &input(ADMIN, "maybe"), Toggle::NoBots)
            .await
            .unwrap_err();

        assert_eq!(
            err.reply_text(),
            Some("Invalid argument. Use 'yes', 'no', 'on', or 'off'.")
        );
        assert!(!state.settings(CHAT).toggle(Toggle::NoBots));
    }

    #[tokio::test]
    async fn test_antichannelpin_denial_text() {
        let (state, _platform) = test_state(MockPlatform::new());

        let err = toggle_command(&state, &input(MEMBER, "on"), Toggle::AntiChannelPin)
            .await
            .unwrap_err();

        assert_eq!(
            err.reply_text(),
            Some("You are not authorized to manage anti-channel pin settings.")
        );
    }
}
