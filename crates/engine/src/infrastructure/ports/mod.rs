//! Port traits for the host platform boundary.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Reading actors and items (the host's object model)
//! - Resolving user privilege
//! - Posting rendered lines to the GM

mod host;
mod sink;

// =============================================================================
// Host Read Ports
// =============================================================================
pub use host::{ActorDirectory, ActorSurface, ItemSurface, UserDirectory};

// =============================================================================
// Output Ports
// =============================================================================
pub use sink::ChatSink;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use host::{MockActorDirectory, MockActorSurface, MockItemSurface, MockUserDirectory};

#[cfg(test)]
pub use sink::MockChatSink;
