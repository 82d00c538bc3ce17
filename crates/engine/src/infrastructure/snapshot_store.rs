//! Last-known snapshot records, keyed by actor.
//!
//! Holds at most one record per actor. A missing record means the actor has
//! never been observed. Records are replaced whole, never merged.

use std::sync::Arc;

use dashmap::DashMap;
use gmwatch_domain::{ActorId, ActorSnapshotRecord};

/// Thread-safe store of the most recent snapshot pair per actor.
///
/// `replace` swaps the record under the actor's shard lock, so a
/// compare-then-replace is atomic per actor even if handlers ever run
/// concurrently.
#[derive(Default)]
pub struct SnapshotStore {
    records: DashMap<ActorId, Arc<ActorSnapshotRecord>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` for `actor`, returning the record it replaced.
    pub fn replace(
        &self,
        actor: ActorId,
        record: Arc<ActorSnapshotRecord>,
    ) -> Option<Arc<ActorSnapshotRecord>> {
        self.records.insert(actor, record)
    }

    pub fn get(&self, actor: &ActorId) -> Option<Arc<ActorSnapshotRecord>> {
        self.records.get(actor).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, actor: &ActorId) -> bool {
        self.records.contains_key(actor)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmwatch_domain::{CastingEntry, Slot, SpellItem};

    fn record(spell: &str) -> Arc<ActorSnapshotRecord> {
        let entries = [CastingEntry::new("e1", "Wizard")
            .with_slot("slot1", Slot::from_occupants([Some(spell)]))];
        let spells = [SpellItem::new(spell, "Spell")];
        Arc::new(ActorSnapshotRecord::from_actor(&entries, &spells).expect("record"))
    }

    #[test]
    fn first_replace_returns_none() {
        let store = SnapshotStore::new();
        assert!(store.replace(ActorId::new("a1"), record("s1")).is_none());
        assert!(store.contains(&ActorId::new("a1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_returns_previous_record() {
        let store = SnapshotStore::new();
        let first = record("s1");
        store.replace(ActorId::new("a1"), Arc::clone(&first));

        let previous = store.replace(ActorId::new("a1"), record("s2"));

        assert_eq!(previous.as_deref(), Some(first.as_ref()));
        assert_eq!(store.len(), 1);
        assert_ne!(
            store.get(&ActorId::new("a1")).map(|r| r.prepared_key().to_string()),
            Some(first.prepared_key().to_string())
        );
    }

    #[test]
    fn missing_actor_has_no_record() {
        let store = SnapshotStore::new();
        assert!(store.is_empty());
        assert!(store.get(&ActorId::new("nobody")).is_none());
    }
}
