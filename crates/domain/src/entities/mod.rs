//! Read-side entities: what the core needs to know about an actor's
//! spellcasting and items.

mod casting_entry;
mod spell_item;

pub use casting_entry::{CastingEntry, PreparedEntry, Slot};
pub use spell_item::{ItemKind, SpellItem};
