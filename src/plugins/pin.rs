//! Pin management commands.
//!
//! Commands for pinning and unpinning messages.

use tracing::info;

use crate::bot::dispatcher::AppState;
use crate::i18n::{get_text, get_text_with};
use crate::platform::{Outgoing, PlatformError};

use super::{CommandError, CommandInput, CommandResult, reply, require_admin};

/// Arguments that turn on the pin notification.
const NOTIFY_WORDS: [&str; 2] = ["loud", "notify"];

fn is_notify_word(word: &str) -> bool {
    NOTIFY_WORDS.iter().any(|w| word.eq_ignore_ascii_case(w))
}

/// Platform failure reply built from a text key with an `{error}` slot.
fn failed(key: &str, source: PlatformError) -> CommandError {
    let reply = get_text_with(key, &[("error", &source.to_string())]);
    CommandError::platform(reply, source)
}

/// Handle /pinned command - show the current pinned message.
pub async fn pinned_command(state: &AppState, input: &CommandInput) -> CommandResult {
    let chat = state
        .platform
        .get_chat(input.chat)
        .await
        .map_err(|e| CommandError::platform(get_text("pin.fetch_failed"), e))?;

    let text = match chat.pinned {
        Some(pinned) => {
            let body = pinned.text.unwrap_or_else(|| get_text("pin.media"));
            get_text_with("pin.current", &[("text", &body)])
        }
        None => get_text("pin.none"),
    };

    reply(state, input, Outgoing::plain(text)).await
}

/// Handle /pin command - pin a message.
///
/// By default pins silently. Add 'loud' or 'notify' to send notification.
/// Usage:
/// - reply to a message with /pin [loud]
/// - /pin [loud] <text> to send and pin a new message
pub async fn pin_command(state: &AppState, input: &CommandInput) -> CommandResult {
    require_admin(state, input, "pin.denied_pin").await?;

    let notify = input.words().any(is_notify_word);

    if let Some(replied) = &input.replied {
        state
            .platform
            .pin_message(input.chat, replied.id, notify)
            .await
            .map_err(|e| failed("pin.pin_failed", e))?;

        info!(
            "Pinned message {} in chat {} (notify: {})",
            replied.id.0, input.chat, notify
        );
        return reply(state, input, Outgoing::plain(get_text("pin.pinned"))).await;
    }

    let text = input
        .words()
        .filter(|word| !is_notify_word(word))
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return Err(CommandError::Usage(get_text("pin.usage")));
    }

    let sent = state
        .platform
        .send_message(input.chat, Outgoing::html(text))
        .await
        .map_err(|e| failed("pin.pin_failed", e))?;
    state
        .platform
        .pin_message(input.chat, sent, notify)
        .await
        .map_err(|e| failed("pin.pin_failed", e))?;

    info!(
        "Custom message {} pinned in chat {} (notify: {})",
        sent.0, input.chat, notify
    );
    reply(state, input, Outgoing::plain(get_text("pin.custom_pinned"))).await
}

/// Handle /announcepin command - send an announcement and pin it loudly.
pub async fn announcepin_command(state: &AppState, input: &CommandInput) -> CommandResult {
    require_admin(state, input, "pin.denied_announcepin").await?;

    if input.args.is_empty() {
        return Err(CommandError::Usage(get_text("pin.announcepin_usage")));
    }

    let sent = state
        .platform
        .send_message(input.chat, Outgoing::html(input.args.as_str()))
        .await
        .map_err(|e| failed("pin.announcepin_failed", e))?;
    state
        .platform
        .pin_message(input.chat, sent, true)
        .await
        .map_err(|e| failed("pin.announcepin_failed", e))?;

    info!("Announcement {} pinned in chat {}", sent.0, input.chat);
    reply(state, input, Outgoing::plain(get_text("pin.announcepin_done"))).await
}

/// Handle /permapin command - send a formatted message and pin it silently.
pub async fn permapin_command(state: &AppState, input: &CommandInput) -> CommandResult {
    require_admin(state, input, "pin.denied_permapin").await?;

    if input.args.is_empty() {
        return Err(CommandError::Usage(get_text("pin.permapin_usage")));
    }

    let message = Outgoing::html(input.args.as_str()).without_preview();
    let sent = state
        .platform
        .send_message(input.chat, message)
        .await
        .map_err(|e| failed("pin.permapin_failed", e))?;
    state
        .platform
        .pin_message(input.chat, sent, false)
        .await
        .map_err(|e| failed("pin.permapin_failed", e))?;

    info!("Custom message {} perma-pinned in chat {}", sent.0, input.chat);
    reply(state, input, Outgoing::plain(get_text("pin.permapin_done"))).await
}

/// Handle /unpin command - unpin the replied message or the latest pin.
pub async fn unpin_command(state: &AppState, input: &CommandInput) -> CommandResult {
    require_admin(state, input, "pin.denied_unpin").await?;

    let target = input.replied.as_ref().map(|r| r.id);
    state
        .platform
        .unpin_message(input.chat, target)
        .await
        .map_err(|e| failed("pin.unpin_failed", e))?;

    let key = match target {
        Some(id) => {
            info!("Unpinned message {} in chat {}", id.0, input.chat);
            "pin.unpinned"
        }
        None => {
            info!("Unpinned last pinned message in chat {}", input.chat);
            "pin.unpinned_last"
        }
    };

    reply(state, input, Outgoing::plain(get_text(key))).await
}

/// Handle /unpinall command.
pub async fn unpinall_command(state: &AppState, input: &CommandInput) -> CommandResult {
    require_admin(state, input, "pin.denied_unpinall").await?;

    state
        .platform
        .unpin_all(input.chat)
        .await
        .map_err(|e| failed("pin.unpinall_failed", e))?;

    info!("Unpinned all messages in chat {}", input.chat);
    reply(state, input, Outgoing::plain(get_text("pin.unpinned_all"))).await
}
