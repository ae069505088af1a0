//! Permission system for checking user roles.
//!
//! A user is an admin in a chat if they are in the static bot admin set
//! (from `ADMIN_USER_IDS`) or in the chat's administrator list.
//!
//! ## Features
//!
//! - Static bot admins skip every platform lookup
//! - Cached administrator lists (reduces API hits)
//!
//! ## Usage
//!
//! ```rust
//! let perms = Permissions::new(platform.clone(), admin_ids);
//!
//! if perms.is_admin(chat_id, user_id).await {
//!     // ...
//! }
//! ```

mod checker;

pub use checker::Permissions;
