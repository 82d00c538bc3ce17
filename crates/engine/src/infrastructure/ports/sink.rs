//! Output port for rendered log lines.

/// Posts one line to the GM-only audience.
///
/// Fire-and-forget: the core calls `emit` once per event and never looks
/// at the outcome.
#[cfg_attr(test, mockall::automock)]
pub trait ChatSink: Send + Sync {
    fn emit(&self, line: &str);
}
