//! Channel and group views: lists, detail, per-entity stats, delete result,
//! add instructions, compose prompts and the global stats page.
//!
//! All builders are pure and return `(text, keyboard)`.

use std::collections::BTreeMap;

use chancore::core::utils::escape_markdown_v2;
use chancore::{EntityKind, EntityRecord, EntityRef};
use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use unic_langid::LanguageIdentifier;

use crate::i18n;
use crate::telegram::{cb, MenuAction};

fn back_row(lang: &LanguageIdentifier, to: MenuAction) -> Vec<InlineKeyboardButton> {
    vec![cb(i18n::t(lang, "button-back"), to.to_data())]
}

fn icon(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Channel => "📺",
        EntityKind::Group => "👥",
    }
}

/// Key for a per-kind text, e.g. `channel-detail` / `group-detail`.
fn kind_key(kind: EntityKind, suffix: &str) -> String {
    format!("{}-{}", kind.singular(), suffix)
}

/// Alert text for an id that is not (or no longer) registered.
pub fn not_found_alert(lang: &LanguageIdentifier, kind: EntityKind) -> String {
    i18n::t(lang, &kind_key(kind, "not-found"))
}

/// List of every registered entity of `kind`, one button each.
pub fn build_entity_list(
    lang: &LanguageIdentifier,
    kind: EntityKind,
    entities: &BTreeMap<String, EntityRecord>,
) -> (String, InlineKeyboardMarkup) {
    let key = match (kind, entities.is_empty()) {
        (EntityKind::Channel, true) => "channels-empty",
        (EntityKind::Channel, false) => "channels-list",
        (EntityKind::Group, true) => "groups-empty",
        (EntityKind::Group, false) => "groups-list",
    };

    let mut rows: Vec<Vec<InlineKeyboardButton>> = entities
        .iter()
        .map(|(id, record)| {
            let target = EntityRef::new(kind, id.clone());
            vec![cb(
                format!("{} {}", icon(kind), record.title_or(id)),
                MenuAction::Detail(target).to_data(),
            )]
        })
        .collect();
    rows.push(back_row(lang, MenuAction::BackToMain));

    (i18n::t(lang, key), InlineKeyboardMarkup::new(rows))
}

/// Action menu for one entity.
pub fn build_entity_detail(
    lang: &LanguageIdentifier,
    target: &EntityRef,
    record: &EntityRecord,
) -> (String, InlineKeyboardMarkup) {
    let mut args = FluentArgs::new();
    args.set("title", escape_markdown_v2(&record.title_or(&target.id)));
    let text = i18n::t_args(lang, &kind_key(target.kind, "detail"), &args);

    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![
            cb(
                i18n::t(lang, "entity-button-stats"),
                MenuAction::EntityStats(target.clone()).to_data(),
            ),
            cb(
                i18n::t(lang, "entity-button-send"),
                MenuAction::Send(target.clone()).to_data(),
            ),
        ],
        vec![cb(
            i18n::t(lang, &kind_key(target.kind, "button-delete")),
            MenuAction::Delete(target.clone()).to_data(),
        )],
        back_row(lang, MenuAction::Manage(target.kind)),
    ]);

    (text, keyboard)
}

/// Stored details of one entity. Missing fields render as "unknown",
/// a missing status as "active".
pub fn build_entity_stats(
    lang: &LanguageIdentifier,
    target: &EntityRef,
    record: &EntityRecord,
) -> (String, InlineKeyboardMarkup) {
    let unknown = i18n::t(lang, "value-unknown");
    let field = |key: &str, fallback: &str| escape_markdown_v2(&record.text_or(key, fallback));

    let mut args = FluentArgs::new();
    args.set("title", escape_markdown_v2(&record.title_or(&target.id)));
    args.set("id", escape_markdown_v2(&target.id));
    args.set("added", field("added_date", &unknown));
    args.set("members", field("member_count", &unknown));
    args.set("messages", field("message_count", &unknown));
    args.set("status", field("status", &i18n::t(lang, "status-active")));

    let text = i18n::t_args(lang, "entity-stats", &args);
    let keyboard = InlineKeyboardMarkup::new(vec![back_row(lang, MenuAction::Manage(target.kind))]);

    (text, keyboard)
}

/// Result of a delete button press.
pub fn build_delete_result(lang: &LanguageIdentifier, kind: EntityKind, deleted: bool) -> (String, InlineKeyboardMarkup) {
    let suffix = if deleted { "deleted" } else { "delete-failed" };
    let text = i18n::t(lang, &kind_key(kind, suffix));
    let keyboard = InlineKeyboardMarkup::new(vec![back_row(lang, MenuAction::Manage(kind))]);
    (text, keyboard)
}

/// How to get a channel or group registered.
pub fn build_add_instructions(lang: &LanguageIdentifier, kind: EntityKind) -> (String, InlineKeyboardMarkup) {
    let text = i18n::t(lang, &kind_key(kind, "add-instructions"));
    let keyboard = InlineKeyboardMarkup::new(vec![back_row(lang, MenuAction::BackToMain)]);
    (text, keyboard)
}

/// Prompt shown after "send message" on an entity. Cancel returns to its detail view.
pub fn build_send_prompt(
    lang: &LanguageIdentifier,
    target: &EntityRef,
    record: &EntityRecord,
) -> (String, InlineKeyboardMarkup) {
    let mut args = FluentArgs::new();
    args.set("title", escape_markdown_v2(&record.title_or(&target.id)));
    let text = i18n::t_args(lang, "send-prompt", &args);

    let keyboard = InlineKeyboardMarkup::new(vec![vec![cb(
        i18n::t(lang, "button-cancel"),
        MenuAction::Detail(target.clone()).to_data(),
    )]]);

    (text, keyboard)
}

pub fn build_broadcast_prompt(lang: &LanguageIdentifier) -> (String, InlineKeyboardMarkup) {
    let text = i18n::t(lang, "broadcast-prompt");
    let keyboard = InlineKeyboardMarkup::new(vec![back_row(lang, MenuAction::BackToMain)]);
    (text, keyboard)
}

/// Totals over both maps.
pub fn build_global_stats(lang: &LanguageIdentifier, channels: usize, groups: usize) -> (String, InlineKeyboardMarkup) {
    let mut args = FluentArgs::new();
    args.set("channels", channels);
    args.set("groups", groups);
    args.set("total", channels + groups);

    let text = i18n::t_args(lang, "stats-global", &args);
    let keyboard = InlineKeyboardMarkup::new(vec![back_row(lang, MenuAction::BackToMain)]);
    (text, keyboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::lang_from_code;
    use teloxide::types::InlineKeyboardButtonKind;

    fn data(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
        keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(d) => Some(d.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_list_has_only_back_button() {
        let en = lang_from_code("en");
        let (text, keyboard) = build_entity_list(&en, EntityKind::Group, &BTreeMap::new());

        assert!(text.contains("No groups registered yet"));
        assert_eq!(data(&keyboard), vec!["back_to_main"]);
    }

    #[test]
    fn test_list_uses_title_or_id() {
        let en = lang_from_code("en");
        let mut channels = BTreeMap::new();
        channels.insert("-1001".to_string(), EntityRecord::new().with("title", "News"));
        channels.insert("-1002".to_string(), EntityRecord::new());

        let (_, keyboard) = build_entity_list(&en, EntityKind::Channel, &channels);

        let labels: Vec<&str> = keyboard.inline_keyboard.iter().flatten().map(|b| b.text.as_str()).collect();
        assert_eq!(labels, vec!["📺 News", "📺 -1002", "🔙 Back"]);
        assert_eq!(data(&keyboard), vec!["channel_-1001", "channel_-1002", "back_to_main"]);
    }

    #[test]
    fn test_group_detail_uses_group_tokens() {
        let en = lang_from_code("en");
        let (_, keyboard) = build_entity_detail(&en, &EntityRef::group("-2001"), &EntityRecord::new());

        assert_eq!(
            data(&keyboard),
            vec![
                "action_stats_group_-2001",
                "action_send_group_-2001",
                "action_delete_group_-2001",
                "manage_groups"
            ]
        );
    }

    #[test]
    fn test_stats_defaults_for_missing_fields() {
        let en = lang_from_code("en");
        let record = EntityRecord::new().with("member_count", 120);

        let (text, keyboard) = build_entity_stats(&en, &EntityRef::channel("c1"), &record);

        assert!(text.contains("120"));
        assert!(text.contains("unknown"));
        assert!(text.contains("active"));
        assert_eq!(data(&keyboard), vec!["manage_channels"]);
    }

    #[test]
    fn test_delete_result_texts() {
        let en = lang_from_code("en");
        let (ok, _) = build_delete_result(&en, EntityKind::Channel, true);
        let (failed, keyboard) = build_delete_result(&en, EntityKind::Group, false);

        assert!(ok.contains("Channel deleted"));
        assert!(failed.contains("Failed to delete the group"));
        assert_eq!(data(&keyboard), vec!["manage_groups"]);
    }

    #[test]
    fn test_send_prompt_cancel_returns_to_detail() {
        let ar = lang_from_code("ar");
        let (_, keyboard) = build_send_prompt(&ar, &EntityRef::group("g1"), &EntityRecord::new());
        assert_eq!(data(&keyboard), vec!["group_g1"]);
    }

    #[test]
    fn test_global_stats_totals() {
        let en = lang_from_code("en");
        let (text, _) = build_global_stats(&en, 2, 3);
        assert!(text.contains('5'));
    }
}
