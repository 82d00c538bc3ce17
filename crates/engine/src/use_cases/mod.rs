//! Use cases.
//!
//! - `watch` - the observation dispatcher and change-event formatter

pub mod watch;
