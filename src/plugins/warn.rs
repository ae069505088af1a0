//! Warning command handler.

use tracing::info;

use crate::bot::dispatcher::AppState;
use crate::i18n::{get_text, get_text_with};
use crate::platform::Outgoing;
use crate::utils::html_escape;

use super::{CommandInput, CommandResult, replied_user, reply, require_admin};

/// Handle /warn command.
///
/// Usage: reply to a message with `/warn [reason]`. Warnings are announced
/// only; nothing is recorded.
pub async fn warn_command(state: &AppState, input: &CommandInput) -> CommandResult {
    let admin_id = require_admin(state, input, "common.admins_only").await?;
    let target = replied_user(input, "warn")?;

    let reason = if input.args.is_empty() {
        get_text("moderation.no_reason")
    } else {
        html_escape(&input.args)
    };

    let text = get_text_with(
        "moderation.warned",
        &[("mention", &target.mention_html()), ("reason", &reason)],
    );

    reply(state, input, Outgoing::html(text)).await?;

    info!(
        "User {} warned in chat {} by {}: {}",
        target.id, input.chat, admin_id, input.args
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::super::CommandError;
    use super::*;

    #[tokio::test]
    async fn test_warn_with_reason() {
        let (state, platform) = test_state(MockPlatform::new());

        warn_command(&state, &replying_input(ADMIN, "spamming links", TARGET))
            .await
            .unwrap();

        assert_eq!(
            platform.sent_texts(),
            vec![format!(
                "⚠️ <a href=\"tg://user?id={}\">Bob</a> has been warned.\n<b>Reason:</b> spamming links",
                TARGET
            )]
        );
        assert!(platform.moderation_calls().is_empty());
    }

    #[tokio::test]
    async fn test_warn_target_named_like_placeholder() {
        let (state, platform) = test_state(MockPlatform::new());
        let mut command_input = replying_input(ADMIN, "spam", TARGET);
        if let Some(replied) = command_input.replied.as_mut() {
            replied.from = Some(user(TARGET, "{reason}"));
        }

        warn_command(&state, &command_input).await.unwrap();

        assert_eq!(
            platform.sent_texts(),
            vec![format!(
                "⚠️ <a href=\"tg://user?id={}\">{{reason}}</a> has been warned.\n<b>Reason:</b> spam",
                TARGET
            )]
        );
    }

    #[tokio::test]
    async fn test_warn_default_reason() {
        let (state, platform) = test_state(MockPlatform::new());

        warn_command(&state, &replying_input(BOT_ADMIN, "", TARGET))
            .await
            .unwrap();

        assert!(platform.sent_texts()[0].ends_with("No reason specified."));
    }

    #[tokio::test]
    async fn test_warn_requires_reply() {
        let (state, platform) = test_state(MockPlatform::new());

        let result = warn_command(&state, &input(ADMIN, "why")).await;

        match result {
            Err(CommandError::Usage(text)) => {
                assert_eq!(text, "Please reply to a user's message to warn them.")
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(platform.sent_texts().is_empty());
    }
}
