//! Spellcasting sources and their prepared slots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{EntryId, ItemId};
use crate::value_objects::parse_slot_rank;

/// A spellcasting source on an actor (e.g. "Arcane Prepared Spells").
///
/// Slots are keyed by their storage label. Only `slot<N>` labels are spell
/// ranks; anything else in the map is carried but ignored by snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastingEntry {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,
}

impl CastingEntry {
    pub fn new(id: impl Into<EntryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slots: BTreeMap::new(),
        }
    }

    pub fn with_slot(mut self, label: impl Into<String>, slot: Slot) -> Self {
        self.slots.insert(label.into(), slot);
        self
    }

    /// Slots whose label parses as a spell rank, paired with that rank.
    pub fn ranked_slots(&self) -> impl Iterator<Item = (u32, &Slot)> {
        self.slots
            .iter()
            .filter_map(|(label, slot)| parse_slot_rank(label).map(|rank| (rank, slot)))
    }
}

/// A rank-tagged container of prepared spells.
///
/// Position within `prepared` is part of an occupant's identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub prepared: Vec<PreparedEntry>,
}

impl Slot {
    pub fn new(prepared: Vec<PreparedEntry>) -> Self {
        Self { prepared }
    }

    /// Build a slot from a list of occupants, `None` meaning an empty position.
    pub fn from_occupants<I, S>(occupants: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<ItemId>,
    {
        Self {
            prepared: occupants
                .into_iter()
                .map(|id| PreparedEntry { id: id.map(Into::into) })
                .collect(),
        }
    }
}

/// One position inside a slot; may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedEntry {
    #[serde(default)]
    pub id: Option<ItemId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_slots_skip_unrecognized_labels() {
        let entry = CastingEntry::new("e1", "Wizard")
            .with_slot("slot1", Slot::from_occupants([Some("s1")]))
            .with_slot("focus", Slot::default())
            .with_slot("slot3", Slot::default());

        let ranks: Vec<u32> = entry.ranked_slots().map(|(rank, _)| rank).collect();
        assert_eq!(ranks, vec![1, 3]);
    }

    #[test]
    fn from_occupants_keeps_empty_positions() {
        let slot = Slot::from_occupants([Some("s1"), None, Some("s2")]);
        assert_eq!(slot.prepared.len(), 3);
        assert_eq!(slot.prepared[1].id, None);
    }
}
