//! Yunks - Telegram chat moderation bot
//!
//! Keeps per-chat moderation settings in memory and applies them to every
//! message and membership change of the chats it is in.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `store` - Per-chat settings store (filters, toggles, welcome, activity)
//! - `platform` - Messaging platform boundary (teloxide behind a trait)
//! - `cache` - TTL caching with Moka
//! - `permissions` - Admin checking with caching
//! - `bot` - Core bot functionality (with Throttle for API rate limiting)
//! - `plugins` - Command handlers
//! - `events` - Message pipeline and member events
//! - `i18n` - User-facing texts
//! - `utils` - Utility functions

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod bot;
mod cache;
mod config;
mod events;
mod i18n;
mod permissions;
mod platform;
mod plugins;
mod store;
mod utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::AppState;
use config::Config;
use platform::TelegramPlatform;
use store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("yunks=info,teloxide=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Yunks bot...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");
    info!("Bot mode: {:?}", config.bot_mode);

    if config.admin_ids.is_empty() {
        info!("No bot admins configured (ADMIN_USER_IDS is empty)");
    } else {
        info!("Bot admins: {:?}", config.admin_ids);
    }
    match config.target_chat_id {
        Some(chat) => info!("Announcements go to chat {}", chat),
        None => info!("TARGET_CHAT_ID not set, /announce is disabled"),
    }

    // Initialize bot with Throttle for automatic rate limiting
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    let state = AppState::new(
        Arc::new(TelegramPlatform::new(bot.clone())),
        Arc::new(MemoryStore::new()),
        config.admin_ids.clone(),
        config.target_chat_id,
        me.id,
    );

    let dispatcher = bot::build_dispatcher(bot.clone(), state);

    bot::run(&config, bot, dispatcher).await
}
