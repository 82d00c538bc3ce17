//! Host surface backed by JSON documents.
//!
//! Actors and items are held in the same shape the host serializes them:
//!
//! ```json
//! {
//!   "_id": "a1", "name": "Ezren", "hasPlayerOwner": true,
//!   "system": { "currency": { "gp": 10 }, "resources": { "focus": { "value": 1 } } },
//!   "items": [
//!     { "_id": "e1", "name": "Arcane Prepared", "type": "spellcastingEntry",
//!       "system": { "slots": { "slot1": { "prepared": [{ "id": "s1" }] } } } },
//!     { "_id": "s1", "name": "Fear", "type": "spell",
//!       "system": { "location": { "value": "e1" } } }
//!   ]
//! }
//! ```
//!
//! Pre-mutation data is a separate `system` document; when absent the current
//! system data stands in for it.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use gmwatch_domain::{
    value_at, ActorId, CastingEntry, DomainError, EntryId, ItemId, ItemKind, PreparedEntry, Slot,
    SpellItem, UserId,
};
use serde_json::Value;

use crate::infrastructure::ports::{ActorDirectory, ActorSurface, ItemSurface, UserDirectory};

fn str_at<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    value_at(root, path).and_then(Value::as_str)
}

fn document_id(doc: &Value) -> Option<&str> {
    str_at(doc, "_id").filter(|id| !id.trim().is_empty())
}

/// An actor document plus its optional pre-mutation system data.
#[derive(Debug, Clone)]
pub struct DocumentActor {
    id: ActorId,
    doc: Value,
    source: Option<Value>,
}

impl DocumentActor {
    pub fn new(doc: Value) -> Result<Self, DomainError> {
        let id = ActorId::parse(str_at(&doc, "_id").unwrap_or_default())?;
        Ok(Self {
            id,
            doc,
            source: None,
        })
    }

    pub fn with_source(mut self, source_system: Value) -> Self {
        self.source = Some(source_system);
        self
    }

    fn items_of(&self, kind: ItemKind) -> impl Iterator<Item = &Value> {
        value_at(&self.doc, "items")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter(move |item| str_at(item, "type").map(ItemKind::from_tag).as_ref() == Some(&kind))
    }
}

impl ActorSurface for DocumentActor {
    fn id(&self) -> ActorId {
        self.id.clone()
    }

    fn name(&self) -> String {
        str_at(&self.doc, "name").unwrap_or("Unknown Actor").to_string()
    }

    fn has_player_owner(&self) -> bool {
        value_at(&self.doc, "hasPlayerOwner")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn casting_entries(&self) -> Vec<CastingEntry> {
        self.items_of(ItemKind::SpellcastingEntry)
            .filter_map(|item| {
                let id = document_id(item)?;
                let slots: BTreeMap<String, Slot> = value_at(item, "system/slots")
                    .and_then(Value::as_object)
                    .map(|slots| {
                        slots
                            .iter()
                            .map(|(label, slot)| (label.clone(), parse_slot(slot)))
                            .collect()
                    })
                    .unwrap_or_default();
                Some(CastingEntry {
                    id: EntryId::from(id),
                    name: str_at(item, "name").unwrap_or_default().to_string(),
                    slots,
                })
            })
            .collect()
    }

    fn spells(&self) -> Vec<SpellItem> {
        self.items_of(ItemKind::Spell)
            .filter_map(|item| {
                let id = document_id(item)?;
                let location = str_at(item, "system/location/value")
                    .filter(|entry| !entry.is_empty())
                    .map(EntryId::from);
                Some(SpellItem {
                    id: ItemId::from(id),
                    name: str_at(item, "name").unwrap_or_default().to_string(),
                    location,
                })
            })
            .collect()
    }

    fn source_value(&self, path: &str) -> Option<Value> {
        let system = match &self.source {
            Some(source) => source,
            None => value_at(&self.doc, "system")?,
        };
        value_at(system, path).cloned()
    }
}

/// Prepared occupants arrive either as an array or as an object keyed by
/// position (`{"0": {...}, "1": {...}}`).
fn parse_slot(slot: &Value) -> Slot {
    let prepared = match value_at(slot, "prepared") {
        Some(Value::Array(items)) => items.iter().map(parse_prepared).collect(),
        Some(Value::Object(positions)) => positions
            .iter()
            .filter_map(|(index, entry)| index.parse::<usize>().ok().map(|i| (i, entry)))
            .collect::<BTreeMap<usize, &Value>>()
            .into_values()
            .map(parse_prepared)
            .collect(),
        _ => Vec::new(),
    };
    Slot::new(prepared)
}

fn parse_prepared(entry: &Value) -> PreparedEntry {
    PreparedEntry {
        id: str_at(entry, "id")
            .filter(|id| !id.is_empty())
            .map(ItemId::from),
    }
}

/// An item document plus its owner and optional pre-mutation system data.
#[derive(Debug, Clone)]
pub struct DocumentItem {
    id: ItemId,
    doc: Value,
    owner: Option<ActorId>,
    source: Option<Value>,
}

impl DocumentItem {
    pub fn new(doc: Value) -> Result<Self, DomainError> {
        let id = ItemId::parse(str_at(&doc, "_id").unwrap_or_default())?;
        Ok(Self {
            id,
            doc,
            owner: None,
            source: None,
        })
    }

    pub fn owned_by(mut self, actor: ActorId) -> Self {
        self.owner = Some(actor);
        self
    }

    pub fn with_source(mut self, source_system: Value) -> Self {
        self.source = Some(source_system);
        self
    }
}

impl ItemSurface for DocumentItem {
    fn id(&self) -> ItemId {
        self.id.clone()
    }

    fn name(&self) -> String {
        str_at(&self.doc, "name").unwrap_or("Unknown Item").to_string()
    }

    fn kind(&self) -> ItemKind {
        ItemKind::from_tag(str_at(&self.doc, "type").unwrap_or_default())
    }

    fn owner_id(&self) -> Option<ActorId> {
        self.owner.clone()
    }

    fn source_value(&self, path: &str) -> Option<Value> {
        let system = match &self.source {
            Some(source) => source,
            None => value_at(&self.doc, "system")?,
        };
        value_at(system, path).cloned()
    }
}

/// In-memory actor directory.
#[derive(Default)]
pub struct DocumentHost {
    actors: DashMap<ActorId, Arc<DocumentActor>>,
}

impl DocumentHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an actor, returning the shared handle.
    pub fn upsert(&self, actor: DocumentActor) -> Arc<DocumentActor> {
        let actor = Arc::new(actor);
        self.actors.insert(actor.id(), Arc::clone(&actor));
        actor
    }

    pub fn remove(&self, id: &ActorId) -> Option<Arc<DocumentActor>> {
        self.actors.remove(id).map(|(_, actor)| actor)
    }
}

impl ActorDirectory for DocumentHost {
    fn actor(&self, id: &ActorId) -> Option<Arc<dyn ActorSurface>> {
        self.actors
            .get(id)
            .map(|entry| Arc::clone(entry.value()) as Arc<dyn ActorSurface>)
    }

    fn actors(&self) -> Vec<Arc<dyn ActorSurface>> {
        let mut actors: Vec<Arc<DocumentActor>> =
            self.actors.iter().map(|entry| Arc::clone(entry.value())).collect();
        actors.sort_by(|a, b| a.id.cmp(&b.id));
        actors
            .into_iter()
            .map(|actor| actor as Arc<dyn ActorSurface>)
            .collect()
    }
}

/// Fixed privilege table.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    observer_is_gm: bool,
    gms: HashSet<UserId>,
}

impl StaticUserDirectory {
    pub fn new(observer_is_gm: bool) -> Self {
        Self {
            observer_is_gm,
            gms: HashSet::new(),
        }
    }

    pub fn with_gm(mut self, user: impl Into<UserId>) -> Self {
        self.gms.insert(user.into());
        self
    }
}

impl UserDirectory for StaticUserDirectory {
    fn observer_is_gm(&self) -> bool {
        self.observer_is_gm
    }

    fn is_gm(&self, user_id: &UserId) -> bool {
        self.gms.contains(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ezren() -> Value {
        json!({
            "_id": "a1",
            "name": "Ezren",
            "hasPlayerOwner": true,
            "system": {
                "currency": { "gp": 10 },
                "resources": { "focus": { "value": 1, "max": 2 } }
            },
            "items": [
                {
                    "_id": "e1",
                    "name": "Arcane Prepared",
                    "type": "spellcastingEntry",
                    "system": {
                        "slots": {
                            "slot1": { "prepared": [{ "id": "s1" }, { "id": null }] },
                            "slot2": { "prepared": { "1": { "id": "s2" }, "0": { "id": "s1" } } }
                        }
                    }
                },
                { "_id": "s1", "name": "Fear", "type": "spell", "system": { "location": { "value": "e1" } } },
                { "_id": "s2", "name": "Web", "type": "spell", "system": { "location": { "value": "" } } },
                { "_id": "c1", "name": "Frightened", "type": "condition" }
            ]
        })
    }

    #[test]
    fn actor_requires_an_id() {
        assert!(DocumentActor::new(json!({ "name": "Nobody" })).is_err());
    }

    #[test]
    fn casting_entries_read_both_prepared_shapes() {
        let actor = DocumentActor::new(ezren()).expect("actor");
        let entries = actor.casting_entries();
        assert_eq!(entries.len(), 1);

        let slot1 = &entries[0].slots["slot1"];
        assert_eq!(slot1.prepared[0].id, Some(ItemId::new("s1")));
        assert_eq!(slot1.prepared[1].id, None);

        let slot2 = &entries[0].slots["slot2"];
        let ids: Vec<Option<&str>> = slot2
            .prepared
            .iter()
            .map(|p| p.id.as_ref().map(ItemId::as_str))
            .collect();
        assert_eq!(ids, vec![Some("s1"), Some("s2")]);
    }

    #[test]
    fn spells_treat_blank_location_as_unassigned() {
        let actor = DocumentActor::new(ezren()).expect("actor");
        let spells = actor.spells();
        assert_eq!(spells.len(), 2);
        assert_eq!(spells[0].location, Some(EntryId::new("e1")));
        assert_eq!(spells[1].location, None);
    }

    #[test]
    fn source_value_prefers_explicit_source() {
        let actor = DocumentActor::new(ezren()).expect("actor");
        assert_eq!(actor.source_value("currency/gp"), Some(json!(10)));

        let actor = actor.with_source(json!({ "currency": { "gp": 4 } }));
        assert_eq!(actor.source_value("currency/gp"), Some(json!(4)));
        assert_eq!(actor.source_value("resources/focus/value"), None);
    }

    #[test]
    fn item_reads_kind_and_owner() {
        let item = DocumentItem::new(json!({ "_id": "c1", "name": "Frightened", "type": "condition" }))
            .expect("item")
            .owned_by(ActorId::new("a1"));
        assert!(item.kind().is_condition());
        assert_eq!(item.owner_id(), Some(ActorId::new("a1")));
        assert_eq!(item.source_value("quantity"), None);
    }

    #[test]
    fn host_lists_actors_in_id_order() {
        let host = DocumentHost::new();
        host.upsert(DocumentActor::new(json!({ "_id": "b" })).expect("actor"));
        host.upsert(DocumentActor::new(json!({ "_id": "a" })).expect("actor"));

        let ids: Vec<ActorId> = host.actors().iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![ActorId::new("a"), ActorId::new("b")]);
        assert!(host.actor(&ActorId::new("a")).is_some());
        assert!(host.remove(&ActorId::new("a")).is_some());
        assert!(host.actor(&ActorId::new("a")).is_none());
    }

    #[test]
    fn static_directory_reports_gms() {
        let users = StaticUserDirectory::new(true).with_gm("gm");
        assert!(users.observer_is_gm());
        assert!(users.is_gm(&UserId::new("gm")));
        assert!(!users.is_gm(&UserId::new("player")));
    }
}
