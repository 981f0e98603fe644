//! Dispatcher schema and handler chain builders

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{ChatMemberUpdated, Message};

use super::messages::{handle_help_command, handle_message, handle_start_command};
use super::types::{HandlerDeps, HandlerError, SessionDialogue};
use chancore::SessionMode;
use crate::telegram::bot::Command;
use crate::telegram::menu::handle_menu_callback;
use crate::telegram::registration::handle_my_chat_member;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The dispatcher must provide an `InMemStorage<SessionMode>` dependency.
///
/// # Arguments
/// * `deps` - Handler dependencies (store, delivery backend)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        // Commands first so /start never becomes a pending payload
        .branch(command_handler())
        .branch(message_handler(deps.clone()))
        .branch(callback_handler(deps.clone()))
        .branch(membership_handler(deps))
}

/// Handler for bot commands (/start, /help)
fn command_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(|bot: Bot, msg: Message, cmd: Command| async move {
            match cmd {
                Command::Start => handle_start_command(&bot, &msg).await,
                Command::Help => handle_help_command(&bot, &msg).await,
            }
        })
}

/// Handler for every other private message: pending payloads, forwarded
/// channel posts, or the main menu
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.chat.is_private())
        .enter_dialogue::<Message, InMemStorage<SessionMode>, SessionMode>()
        .endpoint(move |bot: Bot, msg: Message, dialogue: SessionDialogue| {
            let deps = deps.clone();
            async move { handle_message(bot, msg, dialogue, deps).await }
        })
}

/// Handler for inline keyboard presses
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query()
        .enter_dialogue::<CallbackQuery, InMemStorage<SessionMode>, SessionMode>()
        .endpoint(move |bot: Bot, q: CallbackQuery, dialogue: SessionDialogue| {
            let deps = deps.clone();
            async move { handle_menu_callback(bot, q, dialogue, deps).await }
        })
}

/// Handler for changes of the bot's own membership in channels and groups
fn membership_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_my_chat_member().endpoint(move |bot: Bot, update: ChatMemberUpdated| {
        let deps = deps.clone();
        async move {
            handle_my_chat_member(&bot, &update, &deps).await;
            Ok(())
        }
    })
}
