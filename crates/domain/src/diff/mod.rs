//! Differ: change events from (old, new) state pairs.
//!
//! Every function here is total. Missing or malformed inputs degrade to
//! zero values or placeholder names, never to an error, and diffing a value
//! against itself always yields nothing.

mod currency;
mod prepared;
mod scalar;
mod spellbook;

pub use currency::diff_currency;
pub use prepared::diff_prepared;
pub use scalar::{diff_item_field, diff_resource};
pub use spellbook::diff_spellbook;

use std::collections::HashMap;

use crate::entities::{CastingEntry, SpellItem};
use crate::ids::{EntryId, ItemId};

/// Display name used for a prepared position with no occupant.
pub const EMPTY_SLOT: &str = "Empty";

/// Resolves spell and casting-entry ids to display names for one actor.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    spells: HashMap<ItemId, String>,
    entries: HashMap<EntryId, String>,
}

impl NameIndex {
    pub fn from_actor(entries: &[CastingEntry], spells: &[SpellItem]) -> Self {
        Self {
            spells: spells
                .iter()
                .map(|spell| (spell.id.clone(), spell.name.clone()))
                .collect(),
            entries: entries
                .iter()
                .map(|entry| (entry.id.clone(), entry.name.clone()))
                .collect(),
        }
    }

    /// Spell display name, or a placeholder embedding the raw id.
    pub fn spell_name(&self, id: &ItemId) -> String {
        self.spells
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown spell ({})", id))
    }

    /// Casting-entry display name, or a placeholder embedding the raw id.
    pub fn entry_name(&self, id: &EntryId) -> String {
        self.entries
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown entry ({})", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolvable_ids_fall_back_to_placeholders() {
        let names = NameIndex::default();
        assert_eq!(names.spell_name(&ItemId::new("gone")), "Unknown spell (gone)");
        assert_eq!(names.entry_name(&EntryId::new("e9")), "Unknown entry (e9)");
    }

    #[test]
    fn names_resolve_from_actor_state() {
        let names = NameIndex::from_actor(
            &[CastingEntry::new("e1", "Wizard")],
            &[SpellItem::new("s1", "Fireball")],
        );
        assert_eq!(names.spell_name(&ItemId::new("s1")), "Fireball");
        assert_eq!(names.entry_name(&EntryId::new("e1")), "Wizard");
    }
}
