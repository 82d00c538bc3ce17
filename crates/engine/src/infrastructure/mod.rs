//! Infrastructure: ports, host adapters, sinks, the snapshot store and
//! configuration.

pub mod chat;
pub mod config;
pub mod document_host;
pub mod logging;
pub mod ports;
pub mod snapshot_store;
