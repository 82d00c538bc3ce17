//! Observation dispatcher.
//!
//! Entry points the host calls on each mutation notification. A handler
//! filters by privilege and ownership, refreshes the actor's snapshots,
//! diffs against the stored record, renders the resulting events and emits
//! them in order: prepared slots, spellbook, currency, resources, item
//! fields, then condition lifecycle.
//!
//! The actor's record is replaced on every observation of a tracked actor,
//! even when nothing reportable changed and even when the acting user's
//! changes are not reported, so a later diff never picks them up.

mod format;


pub use format::render;

use std::sync::Arc;

use gmwatch_domain::{
    diff_currency, diff_item_field, diff_prepared, diff_resource, diff_spellbook, merge_partial,
    value_at, ActorSnapshotRecord, ChangeEvent, ItemField, NameIndex, UserId,
};
use serde_json::{Map, Value};

use crate::infrastructure::config::WatchConfig;
use crate::infrastructure::ports::{
    ActorDirectory, ActorSurface, ChatSink, ItemSurface, UserDirectory,
};
use crate::infrastructure::snapshot_store::SnapshotStore;

/// Outcome of refreshing an actor's stored snapshots.
enum Refresh {
    /// No previous record existed; the fresh one is now the baseline.
    Seeded,
    /// A previous record existed; these events describe the difference.
    Diffed(Vec<ChangeEvent>),
    /// The snapshot could not be captured; the store was left untouched.
    Skipped,
}

/// Watches player actors and reports their changes to the GM.
pub struct ChangeWatcher {
    config: WatchConfig,
    actors: Arc<dyn ActorDirectory>,
    users: Arc<dyn UserDirectory>,
    sink: Arc<dyn ChatSink>,
    store: SnapshotStore,
}

impl ChangeWatcher {
    pub fn new(
        config: WatchConfig,
        actors: Arc<dyn ActorDirectory>,
        users: Arc<dyn UserDirectory>,
        sink: Arc<dyn ChatSink>,
    ) -> Self {
        Self {
            config,
            actors,
            users,
            sink,
            store: SnapshotStore::new(),
        }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Seed the store with every actor the host knows about.
    ///
    /// Emits nothing. Returns the number of actors seeded.
    pub fn on_ready(&self) -> usize {
        if !self.users.observer_is_gm() {
            tracing::debug!("Observer is not a GM, change watch stays inactive");
            return 0;
        }

        let seeded = self
            .actors
            .actors()
            .into_iter()
            .filter(|actor| self.seed(actor.as_ref()))
            .count();

        tracing::info!(seeded, "GM change watch active");
        seeded
    }

    /// Actor data changed: resources, currency, prepared slots, spellbook.
    pub fn on_actor_updated(
        &self,
        actor: &dyn ActorSurface,
        changes: &Value,
        user_id: &UserId,
    ) -> Vec<ChangeEvent> {
        if !self.observing() || !self.tracks(actor) {
            return Vec::new();
        }

        let reported = self.reports_actions_of(user_id);
        let mut events = match self.refresh(actor) {
            Refresh::Seeded => return Vec::new(),
            Refresh::Diffed(events) => events,
            Refresh::Skipped => Vec::new(),
        };
        if !reported {
            return Vec::new();
        }

        events.extend(self.actor_field_events(actor, &actor.name(), changes));
        self.publish(&events);
        events
    }

    /// Owned item changed: quantity, charges, and the owner's spell state.
    pub fn on_item_updated(
        &self,
        item: &dyn ItemSurface,
        changes: &Value,
        user_id: &UserId,
    ) -> Vec<ChangeEvent> {
        if !self.observing() {
            return Vec::new();
        }
        let Some(actor) = self.tracked_owner(item) else {
            return Vec::new();
        };

        let reported = self.reports_actions_of(user_id);
        let mut events = match self.refresh(actor.as_ref()) {
            Refresh::Seeded => return Vec::new(),
            Refresh::Diffed(events) => events,
            Refresh::Skipped => Vec::new(),
        };
        if !reported {
            return Vec::new();
        }

        events.extend(item_field_events(item, &actor.name(), changes));
        self.publish(&events);
        events
    }

    /// Item added to an actor. Conditions are reported as gained.
    pub fn on_item_created(&self, item: &dyn ItemSurface, user_id: &UserId) -> Vec<ChangeEvent> {
        self.on_item_lifecycle(item, user_id, |actor, condition| {
            ChangeEvent::ConditionGained { actor, condition }
        })
    }

    /// Item removed from an actor. Conditions are reported as removed.
    pub fn on_item_deleted(&self, item: &dyn ItemSurface, user_id: &UserId) -> Vec<ChangeEvent> {
        self.on_item_lifecycle(item, user_id, |actor, condition| {
            ChangeEvent::ConditionRemoved { actor, condition }
        })
    }

    fn on_item_lifecycle(
        &self,
        item: &dyn ItemSurface,
        user_id: &UserId,
        condition_event: impl FnOnce(String, String) -> ChangeEvent,
    ) -> Vec<ChangeEvent> {
        if !self.observing() {
            return Vec::new();
        }
        let Some(actor) = self.tracked_owner(item) else {
            return Vec::new();
        };

        let reported = self.reports_actions_of(user_id);
        let mut events = match self.refresh(actor.as_ref()) {
            Refresh::Diffed(events) => events,
            Refresh::Seeded | Refresh::Skipped => Vec::new(),
        };
        if !reported {
            return Vec::new();
        }

        if item.kind().is_condition() {
            events.push(condition_event(actor.name(), item.name()));
        }
        self.publish(&events);
        events
    }

    /// Only a GM client watches.
    fn observing(&self) -> bool {
        self.users.observer_is_gm()
    }

    /// GM-made changes are reported only if configured.
    fn reports_actions_of(&self, user_id: &UserId) -> bool {
        if !self.config.track_gm_actions && self.users.is_gm(user_id) {
            tracing::debug!(user_id = %user_id, "Not reporting change made by a GM");
            return false;
        }
        true
    }

    fn tracks(&self, actor: &dyn ActorSurface) -> bool {
        let tracked = actor.has_player_owner();
        if !tracked {
            tracing::debug!(actor_id = %actor.id(), "Ignoring actor without a player owner");
        }
        tracked
    }

    fn tracked_owner(&self, item: &dyn ItemSurface) -> Option<Arc<dyn ActorSurface>> {
        let Some(owner_id) = item.owner_id() else {
            tracing::debug!(item_id = %item.id(), "Ignoring item without an owner");
            return None;
        };
        let Some(actor) = self.actors.actor(&owner_id) else {
            tracing::warn!(
                item_id = %item.id(),
                actor_id = %owner_id,
                "Owning actor not found"
            );
            return None;
        };
        self.tracks(actor.as_ref()).then_some(actor)
    }

    fn seed(&self, actor: &dyn ActorSurface) -> bool {
        match ActorSnapshotRecord::from_actor(&actor.casting_entries(), &actor.spells()) {
            Ok(record) => {
                self.store.replace(actor.id(), Arc::new(record));
                true
            }
            Err(error) => {
                tracing::warn!(actor_id = %actor.id(), error = %error, "Failed to seed snapshot");
                false
            }
        }
    }

    fn refresh(&self, actor: &dyn ActorSurface) -> Refresh {
        let actor_id = actor.id();
        let entries = actor.casting_entries();
        let spells = actor.spells();

        let record = match ActorSnapshotRecord::from_actor(&entries, &spells) {
            Ok(record) => Arc::new(record),
            Err(error) => {
                tracing::warn!(actor_id = %actor_id, error = %error, "Failed to capture snapshot");
                return Refresh::Skipped;
            }
        };

        let Some(previous) = self.store.replace(actor_id.clone(), Arc::clone(&record)) else {
            tracing::debug!(actor_id = %actor_id, "First observation, snapshot seeded");
            return Refresh::Seeded;
        };

        let names = NameIndex::from_actor(&entries, &spells);
        let actor_name = actor.name();
        let mut events = Vec::new();
        if previous.prepared_key() != record.prepared_key() {
            events.extend(diff_prepared(
                &actor_name,
                previous.prepared(),
                record.prepared(),
                &names,
            ));
        }
        if previous.book_key() != record.book_key() {
            events.extend(diff_spellbook(
                &actor_name,
                previous.spellbook(),
                record.spellbook(),
                &names,
            ));
        }
        Refresh::Diffed(events)
    }

    fn actor_field_events(
        &self,
        actor: &dyn ActorSurface,
        actor_name: &str,
        changes: &Value,
    ) -> Vec<ChangeEvent> {
        let mut events = Vec::new();

        if let Some(partial) = value_at(changes, "system/currency").and_then(Value::as_object) {
            let old = match actor.source_value("currency") {
                Some(Value::Object(purse)) => purse,
                _ => Map::new(),
            };
            let mut new = old.clone();
            merge_partial(&mut new, partial);
            events.extend(diff_currency(actor_name, &old, &new));
        }

        for resource in &self.config.tracked_resources {
            let Some(new) = value_at(changes, &format!("system/{}", resource.path)) else {
                continue;
            };
            let old = actor.source_value(&resource.path);
            events.extend(diff_resource(actor_name, &resource.label, old.as_ref(), Some(new)));
        }

        events
    }

    fn publish(&self, events: &[ChangeEvent]) {
        for event in events {
            tracing::debug!(
                event_type = event.event_type(),
                actor = event.actor(),
                "Emitting change"
            );
            self.sink.emit(&render(event));
        }
    }
}

fn item_field_events(
    item: &dyn ItemSurface,
    actor_name: &str,
    changes: &Value,
) -> Vec<ChangeEvent> {
    let item_name = item.name();
    ItemField::ALL
        .into_iter()
        .filter_map(|field| {
            let new = value_at(changes, &format!("system/{}", field.path()))?;
            let old = item.source_value(field.path());
            diff_item_field(actor_name, &item_name, field, old.as_ref(), Some(new))
        })
        .collect()
}
