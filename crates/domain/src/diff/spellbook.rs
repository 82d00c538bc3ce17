//! Spellbook membership diff.
//!
//! Only spells present in both snapshots are compared. A spell seen for the
//! first time, or one that disappeared entirely, belongs to item lifecycle
//! tracking rather than to this diff.

use std::collections::HashMap;

use crate::events::ChangeEvent;
use crate::ids::{EntryId, ItemId};
use crate::snapshot::SpellbookSnapshot;

use super::NameIndex;

pub fn diff_spellbook(
    actor: &str,
    old: &SpellbookSnapshot,
    new: &SpellbookSnapshot,
    names: &NameIndex,
) -> Vec<ChangeEvent> {
    let previous: HashMap<&ItemId, Option<&EntryId>> = old
        .rows()
        .iter()
        .map(|row| (&row.spell_id, row.location.as_ref()))
        .collect();

    new.rows()
        .iter()
        .filter_map(|row| {
            let before = *previous.get(&row.spell_id)?;
            let after = row.location.as_ref();
            let spell_name = names.spell_name(&row.spell_id);
            let actor = actor.to_string();
            match (before, after) {
                (None, Some(entry)) => Some(ChangeEvent::SpellLearned {
                    actor,
                    spell_name,
                    entry_name: Some(names.entry_name(entry)),
                }),
                (Some(entry), None) => Some(ChangeEvent::SpellRemoved {
                    actor,
                    spell_name,
                    entry_name: Some(names.entry_name(entry)),
                }),
                (Some(from), Some(to)) if from != to => Some(ChangeEvent::SpellMoved {
                    actor,
                    spell_name,
                    entry_name: Some(names.entry_name(to)),
                }),
                _ => None,
            }
        })
        .collect()
}
