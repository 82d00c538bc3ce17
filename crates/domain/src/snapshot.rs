//! Canonical snapshots of an actor's spell state.
//!
//! A snapshot is a sorted, flat projection of nested actor data. Sorting
//! makes two builds over unchanged state serialize to identical text, which
//! is what lets the snapshot store compare records by key.

use serde::{Deserialize, Serialize};

use crate::entities::{CastingEntry, SpellItem};
use crate::ids::{EntryId, ItemId};
use crate::DomainError;

/// One prepared-spell position: `(entry, rank, slot index, occupant)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedRow {
    pub entry_id: EntryId,
    pub entry_name: String,
    pub rank: u32,
    /// Zero-based position within the slot
    pub slot_index: usize,
    pub spell_id: Option<ItemId>,
}

impl PreparedRow {
    /// Composite identity of the position, independent of its occupant.
    ///
    /// Entry names are display text and may repeat across entries, so the
    /// position is anchored on the entry id.
    pub fn key(&self) -> (&EntryId, u32, usize) {
        (&self.entry_id, self.rank, self.slot_index)
    }

    fn sort_key(&self) -> (&str, u32, usize, &EntryId) {
        (self.entry_name.as_str(), self.rank, self.slot_index, &self.entry_id)
    }
}

/// Every prepared-spell position on an actor, sorted by
/// `(entry name, rank, slot index)` with the entry id breaking ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreparedSnapshot(Vec<PreparedRow>);

impl PreparedSnapshot {
    /// Project the actor's casting entries into a prepared snapshot.
    ///
    /// Slots with labels other than `slot<N>` are skipped.
    pub fn build(entries: &[CastingEntry]) -> Self {
        let mut rows: Vec<PreparedRow> = entries
            .iter()
            .flat_map(|entry| {
                entry.ranked_slots().flat_map(move |(rank, slot)| {
                    slot.prepared
                        .iter()
                        .enumerate()
                        .map(move |(slot_index, prepared)| PreparedRow {
                            entry_id: entry.id.clone(),
                            entry_name: entry.name.clone(),
                            rank,
                            slot_index,
                            spell_id: prepared.id.clone(),
                        })
                })
            })
            .collect();
        rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Self(rows)
    }

    pub fn from_rows(mut rows: Vec<PreparedRow>) -> Self {
        rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Self(rows)
    }

    pub fn rows(&self) -> &[PreparedRow] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn canonical_key(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One known spell and the casting entry it is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellbookRow {
    pub spell_id: ItemId,
    pub location: Option<EntryId>,
}

/// Every spell item on an actor, sorted by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellbookSnapshot(Vec<SpellbookRow>);

impl SpellbookSnapshot {
    pub fn build(spells: &[SpellItem]) -> Self {
        Self::from_rows(
            spells
                .iter()
                .map(|spell| SpellbookRow {
                    spell_id: spell.id.clone(),
                    location: spell.location.clone(),
                })
                .collect(),
        )
    }

    pub fn from_rows(mut rows: Vec<SpellbookRow>) -> Self {
        rows.sort_by(|a, b| a.spell_id.cmp(&b.spell_id));
        Self(rows)
    }

    pub fn rows(&self) -> &[SpellbookRow] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn canonical_key(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The last-known pair of snapshots for one actor.
///
/// Keys are the canonical serializations; the typed snapshots ride along so
/// a diff never has to re-parse the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSnapshotRecord {
    prepared: PreparedSnapshot,
    spellbook: SpellbookSnapshot,
    prepared_key: String,
    book_key: String,
}

impl ActorSnapshotRecord {
    pub fn capture(
        prepared: PreparedSnapshot,
        spellbook: SpellbookSnapshot,
    ) -> Result<Self, DomainError> {
        let prepared_key = prepared.canonical_key()?;
        let book_key = spellbook.canonical_key()?;
        Ok(Self {
            prepared,
            spellbook,
            prepared_key,
            book_key,
        })
    }

    /// Build both snapshots from actor state and capture them.
    pub fn from_actor(entries: &[CastingEntry], spells: &[SpellItem]) -> Result<Self, DomainError> {
        Self::capture(PreparedSnapshot::build(entries), SpellbookSnapshot::build(spells))
    }

    pub fn prepared(&self) -> &PreparedSnapshot {
        &self.prepared
    }

    pub fn spellbook(&self) -> &SpellbookSnapshot {
        &self.spellbook
    }

    pub fn prepared_key(&self) -> &str {
        &self.prepared_key
    }

    pub fn book_key(&self) -> &str {
        &self.book_key
    }
}
