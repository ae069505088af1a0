//! Command failure taxonomy.

use thiserror::Error;

use crate::platform::PlatformError;

/// Why a command did not complete.
///
/// Every variant except [`CommandError::Reply`] carries the text shown to
/// the user.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The caller may not use this command.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// Missing or malformed arguments.
    #[error("bad usage: {0}")]
    Usage(String),

    /// A moderation or pin call was rejected by the platform.
    #[error("{reply}")]
    Platform {
        reply: String,
        #[source]
        source: PlatformError,
    },

    /// A required setting is absent from the configuration.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Sending the command's own reply failed. Nothing left to tell the user.
    #[error("failed to send reply: {0}")]
    Reply(#[from] PlatformError),
}

impl CommandError {
    pub fn platform(reply: impl Into<String>, source: PlatformError) -> Self {
        Self::Platform {
            reply: reply.into(),
            source,
        }
    }

    /// Text to send back to the caller, if any.
    pub fn reply_text(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(text) | Self::Usage(text) | Self::NotConfigured(text) => Some(text),
            Self::Platform { reply, .. } => Some(reply),
            Self::Reply(_) => None,
        }
    }
}

pub type CommandResult = Result<(), CommandError>;
