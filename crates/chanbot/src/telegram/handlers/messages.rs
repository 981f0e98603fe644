//! Command and free-message handlers

use chancore::SessionMode;
use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use super::types::{HandlerDeps, HandlerError, SessionDialogue};
use crate::i18n;
use crate::telegram::bot::Command;
use crate::telegram::markdown::send_markdown;
use crate::telegram::menu::send_main_menu_as_new;
use crate::telegram::registration;

/// /start: main menu with a personal greeting
pub async fn handle_start_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    let lang = i18n::lang_for_user(msg.from.as_ref());
    let first_name = msg.from.as_ref().map(|u| u.first_name.as_str()).unwrap_or_default();
    log::info!("/start in chat {}", msg.chat.id);
    send_main_menu_as_new(bot, msg.chat.id, &lang, first_name).await?;
    Ok(())
}

/// /help: plain-text list of commands
pub async fn handle_help_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
    Ok(())
}

/// What a pending flow delivers: the text, else the media caption, else empty.
pub fn message_payload(msg: &Message) -> String {
    msg.text().or_else(|| msg.caption()).unwrap_or_default().to_string()
}

/// Handles a non-command private message.
///
/// A pending flow consumes the message whatever it contains and returns the
/// chat to `Idle`. Otherwise a forwarded channel post registers the channel,
/// and anything else gets the main menu.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    dialogue: SessionDialogue,
    deps: HandlerDeps,
) -> Result<(), HandlerError> {
    let lang = i18n::lang_for_user(msg.from.as_ref());
    let mode = dialogue.get_or_default().await?;
    if mode.is_pending() {
        log::debug!("Chat {} consumes pending {} flow", msg.chat.id, mode.label());
        dialogue.exit().await?;
    }

    match mode {
        SessionMode::AwaitingBroadcast => {
            let targets = deps.store.snapshot().all_refs();
            let delivered = deps.delivery.broadcast(&targets, &message_payload(&msg)).await;
            log::info!(
                "Broadcast from chat {}: {}/{} target(s) via {}",
                msg.chat.id,
                delivered,
                targets.len(),
                deps.delivery.name()
            );

            let mut args = FluentArgs::new();
            args.set("count", delivered);
            send_markdown(&bot, msg.chat.id, i18n::t_args(&lang, "broadcast-done", &args), None).await?;
        }
        SessionMode::AwaitingMessage(target) => {
            let key = match deps.delivery.send(&target, &message_payload(&msg)).await {
                Ok(()) => "message-done",
                Err(e) => {
                    log::error!("Delivery to {} {} failed: {}", target.kind.singular(), target.id, e);
                    "message-failed"
                }
            };
            send_markdown(&bot, msg.chat.id, i18n::t(&lang, key), None).await?;
        }
        SessionMode::Idle => {
            if let Some(channel) = registration::forwarded_channel(&msg) {
                registration::register_forwarded_channel(&bot, &msg, channel, &deps, &lang).await?;
            } else {
                let first_name = msg.from.as_ref().map(|u| u.first_name.as_str()).unwrap_or_default();
                send_main_menu_as_new(&bot, msg.chat.id, &lang, first_name).await?;
            }
        }
    }

    Ok(())
}
