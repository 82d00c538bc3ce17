//! GM Watch engine.
//!
//! Hooks a GM client into the host's mutation notifications and posts a
//! chat line for every reportable change a player makes to their actor.
//!
//! ## Structure
//!
//! - `use_cases/` - The change watcher (dispatch, diff, format, emit)
//! - `infrastructure/` - Ports, host adapters, chat sinks, snapshot store, config

pub mod infrastructure;
pub mod use_cases;

pub use infrastructure::chat::{ChannelChatSink, ChatLine, TracingChatSink};
pub use infrastructure::config::{ConfigError, TrackedResource, WatchConfig};
pub use infrastructure::logging::try_init_logging;
pub use use_cases::watch::{render, ChangeWatcher};
