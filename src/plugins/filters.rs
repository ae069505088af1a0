//! Filter command handlers.
//!
//! Commands for managing auto-reply filters in groups. Matching incoming
//! messages against the filters happens in `events::filters`.

use tracing::info;

use crate::bot::dispatcher::AppState;
use crate::i18n::{fill, get_text, get_text_with};
use crate::platform::Outgoing;
use crate::utils::split_filter_args;

use super::{CommandError, CommandInput, CommandResult, reply, require_admin};

/// Handle /filter command - add a new filter.
///
/// Usage:
/// - /filter <trigger> <reply>
/// - /filter "multi word trigger" <reply>
pub async fn filter_command(state: &AppState, input: &CommandInput) -> CommandResult {
    require_admin(state, input, "filters.denied_add").await?;

    let (trigger, reply_text) = split_filter_args(&input.args);
    if trigger.is_empty() || reply_text.is_empty() {
        return Err(CommandError::Usage(get_text("filters.usage")));
    }

    let trigger = trigger.to_lowercase();
    state.settings(input.chat).add_filter(&trigger, &reply_text);
    info!("Filter '{}' added in chat {}", trigger, input.chat);

    let text = get_text_with("filters.added", &[("trigger", &trigger)]);
    reply(state, input, Outgoing::plain(text)).await
}

/// Handle /filters command - list all filters.
pub async fn filters_command(state: &AppState, input: &CommandInput) -> CommandResult {
    let filters = state.settings(input.chat).filters();

    if filters.is_empty() {
        return reply(state, input, Outgoing::plain(get_text("filters.none"))).await;
    }

    let item = get_text("filters.list_item");
    let mut text = get_text("filters.list_header");
    for entry in filters.iter() {
        text.push_str(
            &fill(&item, &[("trigger", &entry.trigger), ("reply", &entry.reply)]),
        );
    }

    reply(state, input, Outgoing::plain(text)).await
}

/// Handle /stop command - remove one filter.
pub async fn stop_command(state: &AppState, input: &CommandInput) -> CommandResult {
    require_admin(state, input, "filters.denied_stop").await?;

    let (trigger, _) = split_filter_args(&input.args);
    if trigger.is_empty() {
        return Err(CommandError::Usage(get_text("filters.stop_usage")));
    }

    let trigger = trigger.to_lowercase();
    let key = if state.settings(input.chat).remove_filter(&trigger) {
        info!("Filter '{}' stopped in chat {}", trigger, input.chat);
        "filters.stopped"
    } else {
        "filters.not_found"
    };

    let text = get_text_with(key, &[("trigger", &trigger)]);
    reply(state, input, Outgoing::plain(text)).await
}

/// Handle /stopall command - remove every filter of the chat.
pub async fn stopall_command(state: &AppState, input: &CommandInput) -> CommandResult {
    require_admin(state, input, "filters.denied_stopall").await?;

    let key = if state.settings(input.chat).clear_filters() {
        info!("All filters stopped in chat {}", input.chat);
        "filters.stopped_all"
    } else {
        "filters.none_to_stop"
    };

    reply(state, input, Outgoing::plain(get_text(key))).await
}
