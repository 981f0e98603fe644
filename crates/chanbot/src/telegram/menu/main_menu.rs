use chancore::core::utils::escape_markdown_v2;
use chancore::EntityKind;
use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MessageId};
use unic_langid::LanguageIdentifier;

use crate::i18n;
use crate::telegram::markdown::{edit_markdown, send_markdown};
use crate::telegram::{cb, MenuAction};

/// Builds the main menu text and keyboard.
///
/// `first_visit` selects the long greeting used for /start and fresh messages;
/// returning from a submenu uses the short one.
pub fn build_main_menu(lang: &LanguageIdentifier, first_name: &str, first_visit: bool) -> (String, InlineKeyboardMarkup) {
    let mut args = FluentArgs::new();
    args.set("name", escape_markdown_v2(first_name));

    let key = if first_visit { "menu-welcome" } else { "menu-welcome-back" };
    let text = i18n::t_args(lang, key, &args);

    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![cb(
            i18n::t(lang, "menu-button-manage-channels"),
            MenuAction::Manage(EntityKind::Channel).to_data(),
        )],
        vec![cb(
            i18n::t(lang, "menu-button-manage-groups"),
            MenuAction::Manage(EntityKind::Group).to_data(),
        )],
        vec![
            cb(
                i18n::t(lang, "menu-button-add-channel"),
                MenuAction::AddInstructions(EntityKind::Channel).to_data(),
            ),
            cb(
                i18n::t(lang, "menu-button-add-group"),
                MenuAction::AddInstructions(EntityKind::Group).to_data(),
            ),
        ],
        vec![cb(i18n::t(lang, "menu-button-broadcast"), MenuAction::Broadcast.to_data())],
        vec![cb(i18n::t(lang, "menu-button-stats"), MenuAction::Stats.to_data())],
    ]);

    (text, keyboard)
}

/// Sends the main menu as a new message (for /start and idle messages).
pub async fn send_main_menu_as_new(
    bot: &Bot,
    chat_id: ChatId,
    lang: &LanguageIdentifier,
    first_name: &str,
) -> ResponseResult<()> {
    let (text, keyboard) = build_main_menu(lang, first_name, true);
    send_markdown(bot, chat_id, text, Some(keyboard)).await?;
    Ok(())
}

// Edit message to show main menu (for the back button)
pub async fn edit_main_menu(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    lang: &LanguageIdentifier,
    first_name: &str,
) -> ResponseResult<()> {
    let (text, keyboard) = build_main_menu(lang, first_name, false);
    edit_markdown(bot, chat_id, message_id, text, keyboard).await
}
