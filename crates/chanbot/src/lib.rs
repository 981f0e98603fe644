//! Chanbot - Telegram front end for registering and managing channels and groups
//!
//! # Module Structure
//!
//! - `telegram`: bot setup, handler tree, menus, callback tokens, auto-registration
//! - `i18n`: Fluent translations (Arabic default, English)
//! - `inspect`: offline dump of the data file
//! - `cli`: command-line interface
//! - `supervisor`: restart loop around the bot runtime
//!
//! Storage, session state, delivery, configuration and the health server live
//! in `chancore`.

pub mod cli;
pub mod i18n;
pub mod inspect;
pub mod supervisor;
pub mod telegram;
