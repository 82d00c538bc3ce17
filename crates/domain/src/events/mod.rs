//! Change events
//!
//! Each variant is one semantic change observed on a player actor. Events
//! are built fresh by a diff pass, rendered once, then dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An item field whose value changes are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Quantity,
    Charges,
}

impl ItemField {
    pub const ALL: [ItemField; 2] = [ItemField::Quantity, ItemField::Charges];

    /// Slash-separated path of the field under the item's system data.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Quantity => "quantity",
            Self::Charges => "uses/value",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Quantity => "qty",
            Self::Charges => "charges",
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A semantic change on a tracked actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChangeEvent {
    /// The occupant of a surviving prepared-spell position changed.
    #[serde(rename_all = "camelCase")]
    PrepSlotChanged {
        actor: String,
        entry_name: String,
        rank: u32,
        /// One-based position within the slot
        slot: usize,
        spell_name: String,
    },
    /// A known spell was assigned to a casting entry.
    #[serde(rename_all = "camelCase")]
    SpellLearned {
        actor: String,
        spell_name: String,
        entry_name: Option<String>,
    },
    /// A spell was unassigned from its casting entry.
    #[serde(rename_all = "camelCase")]
    SpellRemoved {
        actor: String,
        spell_name: String,
        entry_name: Option<String>,
    },
    /// A spell moved between casting entries; `entry_name` is the new one.
    #[serde(rename_all = "camelCase")]
    SpellMoved {
        actor: String,
        spell_name: String,
        entry_name: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    CurrencyChanged {
        actor: String,
        denomination: String,
        delta: f64,
    },
    #[serde(rename_all = "camelCase")]
    ResourceChanged {
        actor: String,
        resource: String,
        old_value: f64,
        new_value: f64,
    },
    #[serde(rename_all = "camelCase")]
    ItemFieldChanged {
        actor: String,
        item_name: String,
        field: ItemField,
        old_value: f64,
        new_value: f64,
    },
    #[serde(rename_all = "camelCase")]
    ConditionGained { actor: String, condition: String },
    #[serde(rename_all = "camelCase")]
    ConditionRemoved { actor: String, condition: String },
}

impl ChangeEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PrepSlotChanged { .. } => "prep_slot_changed",
            Self::SpellLearned { .. } => "spell_learned",
            Self::SpellRemoved { .. } => "spell_removed",
            Self::SpellMoved { .. } => "spell_moved",
            Self::CurrencyChanged { .. } => "currency_changed",
            Self::ResourceChanged { .. } => "resource_changed",
            Self::ItemFieldChanged { .. } => "item_field_changed",
            Self::ConditionGained { .. } => "condition_gained",
            Self::ConditionRemoved { .. } => "condition_removed",
        }
    }

    /// Display name of the actor the change happened on.
    pub fn actor(&self) -> &str {
        match self {
            Self::PrepSlotChanged { actor, .. }
            | Self::SpellLearned { actor, .. }
            | Self::SpellRemoved { actor, .. }
            | Self::SpellMoved { actor, .. }
            | Self::CurrencyChanged { actor, .. }
            | Self::ResourceChanged { actor, .. }
            | Self::ItemFieldChanged { actor, .. }
            | Self::ConditionGained { actor, .. }
            | Self::ConditionRemoved { actor, .. } => actor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_fields_render_their_labels() {
        assert_eq!(ItemField::Quantity.to_string(), "qty");
        assert_eq!(ItemField::Charges.path(), "uses/value");
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = ChangeEvent::ConditionGained {
            actor: "Ezren".into(),
            condition: "Frightened".into(),
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "conditionGained");
        assert_eq!(event.event_type(), "condition_gained");
        assert_eq!(event.actor(), "Ezren");
    }
}
