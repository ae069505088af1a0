//! Configuration module for the Yunks bot.
//!
//! Loads configuration from environment variables.

use std::collections::HashSet;
use std::env;

use anyhow::{Context, bail};
use serde::Deserialize;
use teloxide::types::ChatId;
use tracing::warn;

/// Bot running mode
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BotMode {
    #[default]
    Polling,
    Webhook,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_mode: BotMode,
    pub webhook_url: Option<String>,
    pub webhook_port: u16,
    pub webhook_secret: Option<String>,

    /// Bot admin user IDs (comma-separated).
    /// These users are admins in every chat and may use /announce.
    pub admin_ids: HashSet<u64>,

    /// Chat that receives /announce messages.
    pub target_chat_id: Option<ChatId>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bot_token = env::var("BOT_TOKEN")
            .or_else(|_| env::var("TELEGRAM_TOKEN"))
            .context("BOT_TOKEN must be set")?;

        let bot_mode = match env::var("BOT_MODE")
            .unwrap_or_else(|_| "polling".to_string())
            .to_lowercase()
            .as_str()
        {
            "webhook" => BotMode::Webhook,
            _ => BotMode::Polling,
        };

        let webhook_url = env::var("WEBHOOK_URL").ok().filter(|s| !s.is_empty());

        // Validate webhook URL is set if mode is webhook
        if bot_mode == BotMode::Webhook && webhook_url.is_none() {
            bail!("WEBHOOK_URL must be set when BOT_MODE is webhook");
        }

        let webhook_port = match env::var("WEBHOOK_PORT") {
            Ok(port) => port
                .trim()
                .parse()
                .with_context(|| format!("Invalid WEBHOOK_PORT: {}", port))?,
            Err(_) => 8080,
        };

        let target_chat_id = match env::var("TARGET_CHAT_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(ChatId(
                raw.trim()
                    .parse()
                    .with_context(|| format!("Invalid TARGET_CHAT_ID: {}", raw))?,
            )),
            _ => None,
        };

        Ok(Self {
            bot_token,
            bot_mode,
            webhook_url,
            webhook_port,
            webhook_secret: env::var("WEBHOOK_SECRET").ok().filter(|s| !s.is_empty()),
            admin_ids: parse_admin_ids(&env::var("ADMIN_USER_IDS").unwrap_or_default()),
            target_chat_id,
        })
    }
}

/// Parse a comma-separated list of user ids, skipping invalid entries.
pub fn parse_admin_ids(raw: &str) -> HashSet<u64> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<u64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring invalid admin id in ADMIN_USER_IDS: {:?}", s);
                None
            }
        })
        .collect()
}
