//! Telegram bot integration and handlers

pub mod bot;
pub mod callback;
pub mod handlers;
pub mod markdown;
pub mod menu;
pub mod registration;

use teloxide::types::InlineKeyboardButton;

pub use bot::{create_bot, setup_bot_commands, wait_for_bot_api, Command};
pub use callback::MenuAction;
pub use handlers::{schema, HandlerDeps, HandlerError, SessionDialogue, SessionStorage};
pub use teloxide::Bot;

/// Inline button carrying callback data.
pub fn cb(text: impl Into<String>, data: impl Into<String>) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, data)
}
