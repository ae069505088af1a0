//! Utility functions.
//!
//! Collection of helper functions used across the bot.

pub mod args;

pub use args::{command_args, split_filter_args};

/// Escape HTML special characters.
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
