//! Telegram bot handler tree configuration
//!
//! The same schema is used by the binary and by tests that need the
//! production handler tree.

mod messages;
mod schema;
mod types;

pub use messages::{handle_help_command, handle_message, handle_start_command, message_payload};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError, SessionDialogue, SessionStorage};
