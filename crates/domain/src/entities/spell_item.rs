//! Items owned by an actor, as far as change tracking cares about them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{EntryId, ItemId};

/// A spell known by an actor.
///
/// `location` is the casting entry the spell is assigned to; `None` means the
/// spell is known but not assigned to any entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub location: Option<EntryId>,
}

impl SpellItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: None,
        }
    }

    pub fn located_in(mut self, entry: impl Into<EntryId>) -> Self {
        self.location = Some(entry.into());
        self
    }
}

/// The host's item type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    Spell,
    SpellcastingEntry,
    Condition,
    /// Any other tag, kept verbatim
    Other(String),
}

impl ItemKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "spell" => Self::Spell,
            "spellcastingEntry" => Self::SpellcastingEntry,
            "condition" => Self::Condition,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Spell => "spell",
            Self::SpellcastingEntry => "spellcastingEntry",
            Self::Condition => "condition",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_condition(&self) -> bool {
        matches!(self, Self::Condition)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl From<String> for ItemKind {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<ItemKind> for String {
    fn from(value: ItemKind) -> Self {
        value.as_tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip() {
        for tag in ["spell", "spellcastingEntry", "condition"] {
            assert_eq!(ItemKind::from_tag(tag).as_tag(), tag);
        }
    }

    #[test]
    fn unknown_tags_are_kept_verbatim() {
        let kind = ItemKind::from_tag("consumable");
        assert_eq!(kind, ItemKind::Other("consumable".to_string()));
        assert!(!kind.is_condition());
    }
}
