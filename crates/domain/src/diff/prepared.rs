//! Prepared-slot diff.
//!
//! Positions are matched by `(entry id, rank, slot index)`. Only positions
//! present in the new snapshot are considered: a position that vanished
//! (fewer slots after a level change, an entry removed) is topology, not a
//! preparation change.

use std::collections::HashMap;

use crate::events::ChangeEvent;
use crate::ids::{EntryId, ItemId};
use crate::snapshot::PreparedSnapshot;

use super::{NameIndex, EMPTY_SLOT};

pub fn diff_prepared(
    actor: &str,
    old: &PreparedSnapshot,
    new: &PreparedSnapshot,
    names: &NameIndex,
) -> Vec<ChangeEvent> {
    let previous: HashMap<(&EntryId, u32, usize), Option<&ItemId>> = old
        .rows()
        .iter()
        .map(|row| (row.key(), row.spell_id.as_ref()))
        .collect();

    new.rows()
        .iter()
        .filter_map(|row| {
            // A position absent from the old snapshot counts as empty.
            let before = previous.get(&row.key()).copied().flatten();
            let after = row.spell_id.as_ref();
            if before == after {
                return None;
            }
            Some(ChangeEvent::PrepSlotChanged {
                actor: actor.to_string(),
                entry_name: row.entry_name.clone(),
                rank: row.rank,
                slot: row.slot_index + 1,
                spell_name: after.map_or_else(|| EMPTY_SLOT.to_string(), |id| names.spell_name(id)),
            })
        })
        .collect()
}
