//! Automatic registration of channels and groups.
//!
//! A chat is registered when the bot becomes an administrator there, or when
//! a post forwarded from a channel arrives in a private chat. It is removed
//! when the bot leaves or is kicked.

use chancore::core::utils::{escape_markdown_v2, now_timestamp};
use chancore::{EntityKind, EntityRecord};
use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use teloxide::types::{Chat, ChatMemberKind, ChatMemberUpdated, MessageOrigin};
use unic_langid::LanguageIdentifier;

use crate::i18n;
use crate::telegram::handlers::{HandlerDeps, HandlerError};
use crate::telegram::markdown::send_markdown;

/// What a change of the bot's own membership means for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    Promoted,
    Removed,
    Unchanged,
}

/// The bot's standing in a chat, as far as registration cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStatus {
    Privileged,
    Present,
    Gone,
}

impl From<&ChatMemberKind> for BotStatus {
    fn from(kind: &ChatMemberKind) -> Self {
        if kind.is_left() || kind.is_banned() {
            BotStatus::Gone
        } else if kind.is_privileged() {
            BotStatus::Privileged
        } else {
            BotStatus::Present
        }
    }
}

pub fn membership_change(old: BotStatus, new: BotStatus) -> MembershipChange {
    match (old, new) {
        (_, BotStatus::Gone) => MembershipChange::Removed,
        (BotStatus::Privileged, BotStatus::Privileged) => MembershipChange::Unchanged,
        (_, BotStatus::Privileged) => MembershipChange::Promoted,
        _ => MembershipChange::Unchanged,
    }
}

/// Store map a chat belongs in. Private chats are never registered.
pub fn kind_for_chat(chat: &Chat) -> Option<EntityKind> {
    if chat.is_channel() {
        Some(EntityKind::Channel)
    } else if chat.is_group() || chat.is_supergroup() {
        Some(EntityKind::Group)
    } else {
        None
    }
}

/// Record stored for a newly registered chat.
pub fn build_record(title: Option<&str>, member_count: Option<u32>) -> EntityRecord {
    let mut record = EntityRecord::new()
        .with("added_date", now_timestamp())
        .with("status", "active");
    if let Some(title) = title {
        record.insert("title", title);
    }
    if let Some(count) = member_count {
        record.insert("member_count", count);
    }
    record
}

/// The source channel of a forwarded post, if any.
pub fn forwarded_channel(msg: &Message) -> Option<&Chat> {
    match msg.forward_origin()? {
        MessageOrigin::Channel { chat, .. } => Some(chat),
        _ => None,
    }
}

async fn member_count(bot: &Bot, chat: &Chat) -> Option<u32> {
    match bot.get_chat_member_count(chat.id).await {
        Ok(count) => Some(count),
        Err(e) => {
            log::debug!("Member count unavailable for {}: {}", chat.id, e);
            None
        }
    }
}

async fn register(bot: &Bot, chat: &Chat, kind: EntityKind, deps: &HandlerDeps) -> EntityRecord {
    let record = build_record(chat.title(), member_count(bot, chat).await);
    deps.store.add(kind, chat.id.to_string(), record.clone());
    log::info!("Registered {} {} ({:?})", kind.singular(), chat.id, chat.title());
    record
}

/// Reacts to `my_chat_member` updates. Store failures are logged by the store.
pub async fn handle_my_chat_member(bot: &Bot, update: &ChatMemberUpdated, deps: &HandlerDeps) {
    let Some(kind) = kind_for_chat(&update.chat) else {
        return;
    };

    let old = BotStatus::from(&update.old_chat_member.kind);
    let new = BotStatus::from(&update.new_chat_member.kind);
    match membership_change(old, new) {
        MembershipChange::Promoted => {
            register(bot, &update.chat, kind, deps).await;
        }
        MembershipChange::Removed => {
            if deps.store.remove(kind, &update.chat.id.to_string()) {
                log::info!("Bot removed from {} {}, unregistered", kind.singular(), update.chat.id);
            }
        }
        MembershipChange::Unchanged => {}
    }
}

/// Registers the channel a forwarded post came from and confirms it.
pub async fn register_forwarded_channel(
    bot: &Bot,
    msg: &Message,
    channel: &Chat,
    deps: &HandlerDeps,
    lang: &LanguageIdentifier,
) -> Result<(), HandlerError> {
    let record = register(bot, channel, EntityKind::Channel, deps).await;

    let mut args = FluentArgs::new();
    args.set("title", escape_markdown_v2(&record.title_or(&channel.id.to_string())));
    send_markdown(bot, msg.chat.id, i18n::t_args(lang, "channel-registered", &args), None).await?;
    Ok(())
}
