//! Chat sink adapters.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::infrastructure::config::WatchConfig;
use crate::infrastructure::ports::ChatSink;

/// A rendered line addressed to the GM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatLine {
    pub speaker: String,
    pub content: String,
}

/// Forwards lines over an unbounded channel to whatever task posts them to
/// the host's chat.
///
/// Sending never blocks. If the receiving side is gone the line is dropped.
pub struct ChannelChatSink {
    speaker: String,
    tx: mpsc::UnboundedSender<ChatLine>,
}

impl ChannelChatSink {
    pub fn new(speaker: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<ChatLine>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                speaker: speaker.into(),
                tx,
            },
            rx,
        )
    }

    /// Channel sink speaking as the configured alias.
    pub fn from_config(config: &WatchConfig) -> (Self, mpsc::UnboundedReceiver<ChatLine>) {
        Self::new(config.speaker_alias.clone())
    }
}

impl ChatSink for ChannelChatSink {
    fn emit(&self, line: &str) {
        let message = ChatLine {
            speaker: self.speaker.clone(),
            content: line.to_string(),
        };
        if self.tx.send(message).is_err() {
            tracing::debug!(speaker = %self.speaker, "Chat receiver closed, dropping line");
        }
    }
}

/// Writes lines to the tracing log instead of a chat channel.
pub struct TracingChatSink {
    speaker: String,
}

impl TracingChatSink {
    pub fn new(speaker: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
        }
    }

    pub fn from_config(config: &WatchConfig) -> Self {
        Self::new(config.speaker_alias.clone())
    }
}

impl ChatSink for TracingChatSink {
    fn emit(&self, line: &str) {
        tracing::info!(speaker = %self.speaker, "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ENV_SPEAKER_ALIAS;

    #[tokio::test]
    async fn channel_sink_forwards_lines_in_order() {
        let (sink, mut rx) = ChannelChatSink::new("GM Surveillance");
        sink.emit("first");
        sink.emit("second");

        let first = rx.recv().await.expect("first line");
        let second = rx.recv().await.expect("second line");
        assert_eq!(first.speaker, "GM Surveillance");
        assert_eq!(first.content, "first");
        assert_eq!(second.content, "second");
    }

    #[tokio::test]
    async fn configured_alias_is_the_speaker() {
        let config =
            WatchConfig::from_lookup(|key| (key == ENV_SPEAKER_ALIAS).then(|| "Spymaster".into()))
                .expect("valid config");
        let (sink, mut rx) = ChannelChatSink::from_config(&config);
        sink.emit("<b>Ezren</b> Money: +5 gp");

        let line = rx.recv().await.expect("line");
        assert_eq!(line.speaker, "Spymaster");
        assert_eq!(line.content, "<b>Ezren</b> Money: +5 gp");
    }

    #[tokio::test]
    async fn channel_sink_survives_closed_receiver() {
        let (sink, rx) = ChannelChatSink::new("GM Surveillance");
        drop(rx);
        sink.emit("nobody listening");
    }

    #[test]
    fn tracing_sink_accepts_lines() {
        TracingChatSink::from_config(&WatchConfig::default())
            .emit("<b>Ezren</b> gained → Frightened");
    }
}
