//! Plugin system for command handlers.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Adding a `Command` variant and routing it in `execute()`
//!
//! Handlers take the shared [`AppState`] and a [`CommandInput`] and return a
//! [`CommandResult`]. Failures are turned into replies in one place,
//! [`respond`].

pub mod activity;
pub mod announce;
pub mod ban;
mod error;
pub mod filters;
pub mod help;
pub mod pin;
pub mod start;
pub mod toggles;
pub mod warn;
pub mod welcome;

#[cfg(test)]
pub(crate) mod testing;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, UserId};
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info};

use crate::bot::dispatcher::AppState;
use crate::i18n::{get_text, get_text_with};
use crate::platform::{Outgoing, UserRef};
use crate::store::Toggle;
use crate::utils::command_args;

pub use error::{CommandError, CommandResult};

/// All bot commands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,

    #[command(description = "Show the help guide")]
    Help,

    // Moderation
    #[command(description = "Warn the replied user")]
    Warn,

    #[command(description = "Kick the replied user")]
    Kick,

    #[command(description = "Ban the replied user")]
    Ban,

    #[command(description = "Unban a user by id")]
    Unban,

    // Welcome
    #[command(description = "Set the welcome message")]
    Setwelcome,

    // Announcements
    #[command(description = "Send an announcement to the target chat")]
    Announce,

    // Protection
    #[command(description = "Delete linked channel forwards")]
    Cleanlinked,

    #[command(description = "Delete messages from other bots")]
    Nobots,

    #[command(description = "Unpin linked channel forwards")]
    Antichannelpin,

    // Filters
    #[command(description = "Add an auto-reply filter")]
    Filter,

    #[command(description = "List filters")]
    Filters,

    #[command(description = "Remove a filter")]
    Stop,

    #[command(description = "Remove all filters")]
    Stopall,

    // Activity
    #[command(description = "Show the most active users")]
    Top,

    // Pins
    #[command(description = "Show the pinned message")]
    Pinned,

    #[command(description = "Pin a message")]
    Pin,

    #[command(description = "Send and pin an announcement")]
    Announcepin,

    #[command(description = "Send and pin a formatted message")]
    Permapin,

    #[command(description = "Unpin a message")]
    Unpin,

    #[command(description = "Unpin all messages")]
    Unpinall,
}

/// The message a command replied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepliedMessage {
    pub id: MessageId,
    pub from: Option<UserRef>,
}

/// Everything a command handler needs to know about the invoking message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInput {
    pub chat: ChatId,
    pub message_id: MessageId,
    pub from: Option<UserRef>,
    /// Text after the command word, trimmed.
    pub args: String,
    pub replied: Option<RepliedMessage>,
}

impl CommandInput {
    pub fn from_message(msg: &Message) -> Self {
        let text = msg.text().or_else(|| msg.caption()).unwrap_or("");

        Self {
            chat: msg.chat.id,
            message_id: msg.id,
            from: msg.from.as_ref().map(UserRef::from),
            args: command_args(text).to_string(),
            replied: msg.reply_to_message().map(|reply| RepliedMessage {
                id: reply.id,
                from: reply.from.as_ref().map(UserRef::from),
            }),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.from.as_ref().map(|u| u.id)
    }

    /// Arguments split on whitespace.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.args.split_whitespace()
    }
}

/// Build the combined command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    teloxide::filter_command::<Command, _>().endpoint(handle_command)
}

async fn handle_command(msg: Message, command: Command, state: AppState) -> anyhow::Result<()> {
    let input = CommandInput::from_message(&msg);

    debug!(
        "Command {:?} in chat {} from {:?}",
        command,
        input.chat,
        input.user_id()
    );

    let result = execute(&state, &command, &input).await;
    respond(&state, &input, result).await;

    Ok(())
}

/// Route a command to its handler.
pub async fn execute(state: &AppState, command: &Command, input: &CommandInput) -> CommandResult {
    match command {
        Command::Start => start::start_command(state, input).await,
        Command::Help => help::help_command(state, input).await,
        // Moderation
        Command::Warn => warn::warn_command(state, input).await,
        Command::Kick => ban::kick_command(state, input).await,
        Command::Ban => ban::ban_command(state, input).await,
        Command::Unban => ban::unban_command(state, input).await,
        // Welcome
        Command::Setwelcome => welcome::setwelcome_command(state, input).await,
        // Announcements
        Command::Announce => announce::announce_command(state, input).await,
        Command::Announcepin => pin::announcepin_command(state, input).await,
        // Protection
        Command::Nobots => toggles::toggle_command(state, input, Toggle::NoBots).await,
        Command::Cleanlinked => toggles::toggle_command(state, input, Toggle::CleanLinked).await,
        Command::Antichannelpin => {
            toggles::toggle_command(state, input, Toggle::AntiChannelPin).await
        }
        // Filters
        Command::Filter => filters::filter_command(state, input).await,
        Command::Filters => filters::filters_command(state, input).await,
        Command::Stop => filters::stop_command(state, input).await,
        Command::Stopall => filters::stopall_command(state, input).await,
        // Activity
        Command::Top => activity::top_command(state, input).await,
        // Pins
        Command::Pinned => pin::pinned_command(state, input).await,
        Command::Pin => pin::pin_command(state, input).await,
        Command::Permapin => pin::permapin_command(state, input).await,
        Command::Unpin => pin::unpin_command(state, input).await,
        Command::Unpinall => pin::unpinall_command(state, input).await,
    }
}

/// Turn a handler failure into its reply and log line.
pub async fn respond(state: &AppState, input: &CommandInput, result: CommandResult) {
    let err = match result {
        Ok(()) => return,
        Err(err) => err,
    };

    match &err {
        CommandError::Unauthorized(_) => {
            info!(
                "Denied command in chat {} for user {:?}",
                input.chat,
                input.user_id()
            );
        }
        CommandError::Usage(_) => {
            debug!("Usage hint sent in chat {}", input.chat);
        }
        CommandError::Platform { source, .. } => {
            error!("Platform call failed in chat {}: {}", input.chat, source);
        }
        CommandError::NotConfigured(what) => {
            error!("Command in chat {} needs configuration: {}", input.chat, what);
        }
        CommandError::Reply(e) => {
            error!("Failed to reply in chat {}: {}", input.chat, e);
        }
    }

    if let Some(text) = err.reply_text()
        && let Err(e) = state
            .platform
            .reply_message(input.chat, input.message_id, Outgoing::plain(text))
            .await
    {
        error!("Failed to send error reply in chat {}: {}", input.chat, e);
    }
}

/// Ensure the caller is an admin of the chat (or a bot admin).
///
/// `denial_key` names the text sent back when they are not.
pub async fn require_admin(
    state: &AppState,
    input: &CommandInput,
    denial_key: &str,
) -> Result<UserId, CommandError> {
    match input.user_id() {
        Some(user_id) if state.permissions.is_admin(input.chat, user_id).await => Ok(user_id),
        _ => Err(CommandError::Unauthorized(get_text(denial_key))),
    }
}

/// Reply to the command message.
pub async fn reply(state: &AppState, input: &CommandInput, message: Outgoing) -> CommandResult {
    state
        .platform
        .reply_message(input.chat, input.message_id, message)
        .await?;
    Ok(())
}

/// Author of the message the command replied to.
///
/// `action` fills the "reply to a user's message to {action} them" hint.
pub fn replied_user<'a>(input: &'a CommandInput, action: &str) -> Result<&'a UserRef, CommandError> {
    input
        .replied
        .as_ref()
        .and_then(|replied| replied.from.as_ref())
        .ok_or_else(|| {
            CommandError::Usage(get_text_with("moderation.reply_required", &[("action", action)]))
        })
}
