//! Ban command handlers.
//!
//! Commands for removing users from groups.

use teloxide::types::UserId;
use tracing::{error, info};

use crate::bot::dispatcher::AppState;
use crate::i18n::{get_text, get_text_with};
use crate::platform::{Outgoing, PlatformError};

use super::{CommandError, CommandInput, CommandResult, replied_user, reply, require_admin};

/// Handle /kick command - remove the replied user, who may rejoin.
pub async fn kick_command(state: &AppState, input: &CommandInput) -> CommandResult {
    let admin_id = require_admin(state, input, "common.admins_only").await?;
    let target = replied_user(input, "kick")?;

    state
        .platform
        .kick_member(input.chat, target.id)
        .await
        .map_err(|e| match e {
            PlatformError::StillBanned(_) => {
                error!(
                    "Kick of user {} in chat {} by {} left them banned: {}",
                    target.id, input.chat, admin_id, e
                );
                let reply = get_text_with(
                    "moderation.kick_still_banned",
                    &[("id", &target.id.to_string()), ("error", &e.to_string())],
                );
                CommandError::platform(reply, e)
            }
            other => failed("kick", other),
        })?;

    info!("User {} kicked from chat {} by {}", target.id, input.chat, admin_id);

    let text = get_text_with("moderation.kicked", &[("mention", &target.mention_html())]);
    reply(state, input, Outgoing::html(text)).await
}

/// Handle /ban command - ban the replied user.
pub async fn ban_command(state: &AppState, input: &CommandInput) -> CommandResult {
    let admin_id = require_admin(state, input, "common.admins_only").await?;
    let target = replied_user(input, "ban")?;

    state
        .platform
        .ban_member(input.chat, target.id)
        .await
        .map_err(|e| failed("ban", e))?;

    info!("User {} banned from chat {} by {}", target.id, input.chat, admin_id);

    let text = get_text_with("moderation.banned", &[("mention", &target.mention_html())]);
    reply(state, input, Outgoing::html(text)).await
}

/// Handle /unban command.
///
/// Usage: /unban <user_id>
pub async fn unban_command(state: &AppState, input: &CommandInput) -> CommandResult {
    let admin_id = require_admin(state, input, "common.admins_only").await?;

    let user_id = input
        .words()
        .next()
        .and_then(|raw| raw.parse::<u64>().ok())
        .map(UserId)
        .ok_or_else(|| CommandError::Usage(get_text("moderation.unban_usage")))?;

    state
        .platform
        .unban_member(input.chat, user_id)
        .await
        .map_err(|e| failed("unban", e))?;

    info!("User {} unbanned in chat {} by {}", user_id, input.chat, admin_id);

    let text = get_text_with("moderation.unbanned", &[("id", &user_id.to_string())]);
    reply(state, input, Outgoing::plain(text)).await
}

fn failed(action: &str, source: PlatformError) -> CommandError {
    let reply = get_text_with(
        "moderation.failed",
        &[("action", action), ("error", &source.to_string())],
    );
    CommandError::platform(reply, source)
}
