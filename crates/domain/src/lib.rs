//! GM Watch domain: snapshots, diffing and change events for player actors.
//!
//! Everything in this crate is pure and synchronous. The host platform is
//! reached only through the engine crate's ports.

pub mod diff;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod snapshot;
pub mod value_objects;

pub use diff::{
    diff_currency, diff_item_field, diff_prepared, diff_resource, diff_spellbook, NameIndex,
    EMPTY_SLOT,
};
pub use entities::{CastingEntry, ItemKind, PreparedEntry, Slot, SpellItem};
pub use error::DomainError;
pub use events::{ChangeEvent, ItemField};
pub use ids::{ActorId, EntryId, ItemId, UserId};
pub use snapshot::{
    ActorSnapshotRecord, PreparedRow, PreparedSnapshot, SpellbookRow, SpellbookSnapshot,
};
pub use value_objects::{
    format_number, merge_partial, normalize, normalize_opt, parse_slot_rank, value_at,
};
