//! Activity leaderboard command.

use futures::future::join_all;
use tracing::warn;

use crate::bot::dispatcher::AppState;
use crate::i18n::{fill, get_text};
use crate::platform::{MemberStatus, Outgoing, PlatformError};

use super::{CommandInput, CommandResult, reply};

/// How many users /top shows.
pub const TOP_USERS: usize = 5;

/// Handle /top command - list the most active users.
///
/// Users who left or were banned since they were counted are listed by id
/// as not found.
pub async fn top_command(state: &AppState, input: &CommandInput) -> CommandResult {
    let ranking = state.settings(input.chat).top_activity(TOP_USERS);

    if ranking.is_empty() {
        return reply(state, input, Outgoing::plain(get_text("activity.none"))).await;
    }

    let members = join_all(
        ranking
            .iter()
            .map(|(user_id, _)| state.platform.chat_member(input.chat, *user_id)),
    )
    .await;

    let line = get_text("activity.line");
    let line_missing = get_text("activity.line_missing");
    let mut text = get_text("activity.header");

    for (rank, ((user_id, count), member)) in ranking.iter().zip(members).enumerate() {
        let rank = (rank + 1).to_string();
        let count = count.to_string();

        let member = member.and_then(|member| {
            if matches!(member.status, MemberStatus::Left | MemberStatus::Banned) {
                Err(PlatformError::Api(format!("user is {:?}", member.status)))
            } else {
                Ok(member)
            }
        });

        let entry = match member {
            Ok(member) => fill(
                &line,
                &[
                    ("rank", &rank),
                    ("mention", &member.user.mention_html()),
                    ("count", &count),
                ],
            ),
            Err(e) => {
                warn!(
                    "Could not find user {} for top list in chat {}: {}",
                    user_id, input.chat, e
                );
                fill(
                    &line_missing,
                    &[("rank", &rank), ("id", &user_id.to_string()), ("count", &count)],
                )
            }
        };
        text.push_str(&entry);
    }

    reply(state, input, Outgoing::html(text)).await
}
