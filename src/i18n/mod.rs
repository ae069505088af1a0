//! User-facing texts.
//!
//! Texts are embedded from `en.json` at compile time and looked up by
//! dotted key, e.g. `filters.added`. Placeholders use `{name}` syntax and
//! are filled with [`fill`] or [`get_text_with`].

use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::warn;

static TRANSLATIONS: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("en.json")).unwrap_or_else(|e| {
        warn!("Failed to parse text catalog: {}", e);
        Value::Null
    })
});

/// Get the text for `key`. Unknown keys resolve to the key itself.
pub fn get_text(key: &str) -> String {
    resolve_key(&TRANSLATIONS, key).unwrap_or_else(|| key.to_string())
}

/// Get the text for `key` with its placeholders filled from `args`.
pub fn get_text_with(key: &str, args: &[(&str, &str)]) -> String {
    fill(&get_text(key), args)
}

/// Substitute `{name}` placeholders in one pass over `template`.
///
/// Substituted values are never scanned again, so a value that itself
/// looks like a placeholder is kept verbatim. Unknown placeholders are
/// left as they are.
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let found = tail.find('}').and_then(|end| {
            let name = &tail[1..end];
            args.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match found {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn resolve_key(val: &Value, key: &str) -> Option<String> {
    let mut current = val;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    current.as_str().map(|s| s.to_string())
}
