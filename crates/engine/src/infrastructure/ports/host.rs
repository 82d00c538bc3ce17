//! Read-side ports over the host platform's object model.
//!
//! Every nested lookup returns an `Option`: the host's data is partial and
//! the core never guesses about absent paths.

use std::sync::Arc;

use gmwatch_domain::{ActorId, CastingEntry, ItemId, ItemKind, SpellItem, UserId};
use serde_json::Value;

// =============================================================================
// Actor / Item Surfaces
// =============================================================================

/// What the core reads from an actor.
#[cfg_attr(test, mockall::automock)]
pub trait ActorSurface: Send + Sync {
    fn id(&self) -> ActorId;
    fn name(&self) -> String;
    /// Whether any player (non-GM user) owns this actor.
    fn has_player_owner(&self) -> bool;
    fn casting_entries(&self) -> Vec<CastingEntry>;
    fn spells(&self) -> Vec<SpellItem>;
    /// Pre-mutation system data at a slash-separated path.
    fn source_value(&self, path: &str) -> Option<Value>;
}

/// What the core reads from an item.
#[cfg_attr(test, mockall::automock)]
pub trait ItemSurface: Send + Sync {
    fn id(&self) -> ItemId;
    fn name(&self) -> String;
    fn kind(&self) -> ItemKind;
    /// The owning actor, if the item is embedded in one.
    fn owner_id(&self) -> Option<ActorId>;
    /// Pre-mutation system data at a slash-separated path.
    fn source_value(&self, path: &str) -> Option<Value>;
}

// =============================================================================
// Directories
// =============================================================================

/// Lookup of actors known to the host.
#[cfg_attr(test, mockall::automock)]
pub trait ActorDirectory: Send + Sync {
    fn actor(&self, id: &ActorId) -> Option<Arc<dyn ActorSurface>>;
    fn actors(&self) -> Vec<Arc<dyn ActorSurface>>;
}

/// Privilege lookups for the observing client and acting users.
#[cfg_attr(test, mockall::automock)]
pub trait UserDirectory: Send + Sync {
    /// Whether the client running the watcher is a GM.
    fn observer_is_gm(&self) -> bool;
    fn is_gm(&self, user_id: &UserId) -> bool;
}
