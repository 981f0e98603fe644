//! Callback data tokens carried by the inline keyboards.
//!
//! Wire format (prefix based):
//! - `manage_channels`, `manage_groups`, `add_channel`, `add_group`,
//!   `broadcast`, `stats`, `back_to_main`
//! - `channel_<id>`, `group_<id>` open the entity detail view
//! - `action_{stats,delete,send}_<id>` target a channel,
//!   `action_{stats,delete,send}_group_<id>` target a group

use chancore::{EntityKind, EntityRef};

const ACTION_STATS: &str = "action_stats_";
const ACTION_DELETE: &str = "action_delete_";
const ACTION_SEND: &str = "action_send_";
const GROUP_INFIX: &str = "group_";

/// A parsed menu button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Manage(EntityKind),
    AddInstructions(EntityKind),
    Broadcast,
    Stats,
    BackToMain,
    Detail(EntityRef),
    EntityStats(EntityRef),
    Delete(EntityRef),
    Send(EntityRef),
}

impl MenuAction {
    /// Parses callback data. Unknown or malformed tokens give `None`.
    pub fn parse(data: &str) -> Option<Self> {
        let action = match data {
            "manage_channels" => MenuAction::Manage(EntityKind::Channel),
            "manage_groups" => MenuAction::Manage(EntityKind::Group),
            "add_channel" => MenuAction::AddInstructions(EntityKind::Channel),
            "add_group" => MenuAction::AddInstructions(EntityKind::Group),
            "broadcast" => MenuAction::Broadcast,
            "stats" => MenuAction::Stats,
            "back_to_main" => MenuAction::BackToMain,
            _ => return Self::parse_targeted(data),
        };
        Some(action)
    }

    fn parse_targeted(data: &str) -> Option<Self> {
        if let Some(rest) = data.strip_prefix(ACTION_STATS) {
            return action_target(rest).map(MenuAction::EntityStats);
        }
        if let Some(rest) = data.strip_prefix(ACTION_DELETE) {
            return action_target(rest).map(MenuAction::Delete);
        }
        if let Some(rest) = data.strip_prefix(ACTION_SEND) {
            return action_target(rest).map(MenuAction::Send);
        }
        if let Some(id) = data.strip_prefix("channel_") {
            return non_empty(id).map(|id| MenuAction::Detail(EntityRef::channel(id)));
        }
        if let Some(id) = data.strip_prefix(GROUP_INFIX) {
            return non_empty(id).map(|id| MenuAction::Detail(EntityRef::group(id)));
        }
        None
    }

    /// Serializes back to callback data.
    pub fn to_data(&self) -> String {
        match self {
            MenuAction::Manage(kind) => format!("manage_{}", kind),
            MenuAction::AddInstructions(kind) => format!("add_{}", kind.singular()),
            MenuAction::Broadcast => "broadcast".to_string(),
            MenuAction::Stats => "stats".to_string(),
            MenuAction::BackToMain => "back_to_main".to_string(),
            MenuAction::Detail(target) => format!("{}_{}", target.kind.singular(), target.id),
            MenuAction::EntityStats(target) => action_data(ACTION_STATS, target),
            MenuAction::Delete(target) => action_data(ACTION_DELETE, target),
            MenuAction::Send(target) => action_data(ACTION_SEND, target),
        }
    }

    /// Short name for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Manage(_) => "manage",
            MenuAction::AddInstructions(_) => "add",
            MenuAction::Broadcast => "broadcast",
            MenuAction::Stats => "stats",
            MenuAction::BackToMain => "back_to_main",
            MenuAction::Detail(_) => "detail",
            MenuAction::EntityStats(_) => "entity_stats",
            MenuAction::Delete(_) => "delete",
            MenuAction::Send(_) => "send",
        }
    }
}

/// The `group_` infix selects the group map and is not part of the id.
fn action_target(rest: &str) -> Option<EntityRef> {
    match rest.strip_prefix(GROUP_INFIX) {
        Some(id) => non_empty(id).map(EntityRef::group),
        None => non_empty(rest).map(EntityRef::channel),
    }
}

fn action_data(prefix: &str, target: &EntityRef) -> String {
    match target.kind {
        EntityKind::Channel => format!("{}{}", prefix, target.id),
        EntityKind::Group => format!("{}{}{}", prefix, GROUP_INFIX, target.id),
    }
}

fn non_empty(id: &str) -> Option<&str> {
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_fixed_tokens() {
        assert_eq!(
            MenuAction::parse("manage_channels"),
            Some(MenuAction::Manage(EntityKind::Channel))
        );
        assert_eq!(MenuAction::parse("add_group"), Some(MenuAction::AddInstructions(EntityKind::Group)));
        assert_eq!(MenuAction::parse("back_to_main"), Some(MenuAction::BackToMain));
    }

    #[test]
    fn test_group_infix_is_stripped_from_action_ids() {
        assert_eq!(
            MenuAction::parse("action_delete_group_-100777"),
            Some(MenuAction::Delete(EntityRef::group("-100777")))
        );
        assert_eq!(
            MenuAction::parse("action_delete_-100777"),
            Some(MenuAction::Delete(EntityRef::channel("-100777")))
        );
    }

    #[test]
    fn test_unsupported_and_empty_tokens() {
        assert_eq!(MenuAction::parse("action_members_-100"), None);
        assert_eq!(MenuAction::parse("action_add_members_group_-100"), None);
        assert_eq!(MenuAction::parse("channel_"), None);
        assert_eq!(MenuAction::parse("action_send_group_"), None);
        assert_eq!(MenuAction::parse(""), None);
    }

    #[test]
    fn test_to_data_matches_wire_format() {
        assert_eq!(MenuAction::Manage(EntityKind::Group).to_data(), "manage_groups");
        assert_eq!(MenuAction::AddInstructions(EntityKind::Channel).to_data(), "add_channel");
        assert_eq!(MenuAction::Detail(EntityRef::group("g1")).to_data(), "group_g1");
        assert_eq!(MenuAction::Send(EntityRef::group("g1")).to_data(), "action_send_group_g1");
        assert_eq!(MenuAction::EntityStats(EntityRef::channel("c1")).to_data(), "action_stats_c1");
    }
}
