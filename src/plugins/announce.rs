//! Announcement command.

use tracing::info;

use crate::bot::dispatcher::AppState;
use crate::i18n::{get_text, get_text_with};
use crate::platform::Outgoing;

use super::{CommandError, CommandInput, CommandResult, reply};

/// Handle /announce command - forward text to the configured target chat.
///
/// Only bot admins (`ADMIN_USER_IDS`) may announce; chat admins may not.
pub async fn announce_command(state: &AppState, input: &CommandInput) -> CommandResult {
    let Some(user_id) = input
        .user_id()
        .filter(|id| state.permissions.is_bot_admin(*id))
    else {
        return Err(CommandError::Unauthorized(get_text("common.bot_admins_only")));
    };

    if input.args.is_empty() {
        return Err(CommandError::Usage(get_text("announce.usage")));
    }

    let Some(target) = state.target_chat_id else {
        return Err(CommandError::NotConfigured(get_text("announce.not_configured")));
    };

    state
        .platform
        .send_message(target, Outgoing::plain(input.args.as_str()))
        .await
        .map_err(|e| {
            let reply = get_text_with("announce.failed", &[("error", &e.to_string())]);
            CommandError::platform(reply, e)
        })?;

    info!("Announcement sent to chat {} by {}", target, user_id);

    let text = get_text_with("announce.sent", &[("chat", &target.to_string())]);
    reply(state, input, Outgoing::plain(text)).await
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[tokio::test]
    async fn test_announce_sends_to_target() {
        let (state, platform) = test_state(MockPlatform::new());

        announce_command(&state, &input(BOT_ADMIN, "Meeting at 3 PM!"))
            .await
            .unwrap();

        let calls = platform.calls();
        assert_eq!(
            calls[0],
            Call::Send {
                chat: TARGET_CHAT,
                message: Outgoing::plain("Meeting at 3 PM!")
            }
        );
        assert_eq!(
            platform.sent_texts()[1],
            format!("✅ Announcement sent to chat ID {}.", TARGET_CHAT)
        );
    }

    #[tokio::test]
    async fn test_chat_admin_cannot_announce() {
        let (state, platform) = test_state(MockPlatform::new());

        let err = announce_command(&state, &input(ADMIN, "hello")).await.unwrap_err();

        assert!(matches!(err, CommandError::Unauthorized(_)));
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_announce_without_target() {
        let (state, platform) = test_state_with_target(MockPlatform::new(), None);

        let err = announce_command(&state, &input(BOT_ADMIN, "hello"))
            .await
            .unwrap_err();

        assert_eq!(
            err.reply_text(),
            Some("❌ TARGET_CHAT_ID is not configured. The announcement was not sent.")
        );
        assert!(matches!(err, CommandError::NotConfigured(_)));
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_announce_usage() {
        let (state, _platform) = test_state(MockPlatform::new());

        let err = announce_command(&state, &input(BOT_ADMIN, "")).await.unwrap_err();
        assert!(matches!(err, CommandError::Usage(_)));
    }
}
