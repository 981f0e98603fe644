//! The persisted document and its entity records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display};

/// Which top-level mapping an entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize, Deserialize)]
pub enum EntityKind {
    #[strum(serialize = "channels")]
    #[serde(rename = "channels")]
    Channel,
    #[strum(serialize = "groups")]
    #[serde(rename = "groups")]
    Group,
}

impl EntityKind {
    /// Singular name, used as the callback token prefix (`channel_<id>`, `group_<id>`).
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Channel => "channel",
            EntityKind::Group => "group",
        }
    }
}

/// A channel or group addressed by kind and id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }

    pub fn channel(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Channel, id)
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Group, id)
    }
}

/// Free-form record stored for a channel or group.
///
/// Conventional fields are `title`, `added_date`, `member_count`,
/// `message_count` and `status`; none of them are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord(Map<String, Value>);

impl EntityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Field rendered as text: strings unquoted, other JSON values via their JSON form.
    /// `null` counts as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Title, falling back to the entity id when absent.
    pub fn title_or(&self, id: &str) -> String {
        self.text("title").unwrap_or_else(|| id.to_string())
    }

    /// Field text, or `fallback` when absent.
    pub fn text_or(&self, key: &str, fallback: &str) -> String {
        self.text(key).unwrap_or_else(|| fallback.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for EntityRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The whole persisted state: exactly three top-level mappings.
///
/// Missing keys deserialize to empty maps; unknown top-level keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub channels: BTreeMap<String, EntityRecord>,
    #[serde(default)]
    pub groups: BTreeMap<String, EntityRecord>,
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

impl Document {
    pub fn entities(&self, kind: EntityKind) -> &BTreeMap<String, EntityRecord> {
        match kind {
            EntityKind::Channel => &self.channels,
            EntityKind::Group => &self.groups,
        }
    }

    pub fn entities_mut(&mut self, kind: EntityKind) -> &mut BTreeMap<String, EntityRecord> {
        match kind {
            EntityKind::Channel => &mut self.channels,
            EntityKind::Group => &mut self.groups,
        }
    }

    /// Every registered entity, channels first.
    pub fn all_refs(&self) -> Vec<EntityRef> {
        self.channels
            .keys()
            .map(EntityRef::channel)
            .chain(self.groups.keys().map(EntityRef::group))
            .collect()
    }
}
