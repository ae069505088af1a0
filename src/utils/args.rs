//! Command argument parsing.

/// Everything after the command word, trimmed.
///
/// `/setwelcome  Hello {username}!` gives `Hello {username}!`.
pub fn command_args(text: &str) -> &str {
    text.split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .unwrap_or("")
}

/// Remove one pair of surrounding double quotes, if present.
pub fn strip_quotes(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

/// Split `/filter` arguments into trigger and reply.
///
/// Supported forms:
/// - `trigger reply text`
/// - `"multi word trigger" reply text`
///
/// The reply may itself be wrapped in quotes, which are removed.
pub fn split_filter_args(args: &str) -> (String, String) {
    let args = args.trim();

    if let Some(rest) = args.strip_prefix('"')
        && let Some(end) = rest.find('"')
    {
        let trigger = rest[..end].trim().to_string();
        let reply = strip_quotes(&rest[end + 1..]).to_string();
        return (trigger, reply);
    }

    match args.split_once(char::is_whitespace) {
        Some((trigger, reply)) => (trigger.to_string(), strip_quotes(reply).to_string()),
        None => (args.to_string(), String::new()),
    }
}
