//! Card delivery.

use async_trait::async_trait;
use herald_core::{Card, ChannelId};
use herald_error::{HeraldResult, JsonError, TransportError, TransportErrorKind};
use parking_lot::Mutex;
use serde::Serialize;
use std::io::Write;

/// Delivers rendered cards to channels.
#[async_trait]
pub trait CardTransport: Send + Sync {
    /// Send one card to one channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the send. Callers do not
    /// retry; a failure ends the current dispatch.
    async fn send_card(&self, channel: ChannelId, card: &Card) -> HeraldResult<()>;
}

#[derive(Serialize)]
struct JsonDelivery<'a> {
    channel: ChannelId,
    card: &'a Card,
}

/// Writes each card as one JSON line instead of sending it.
///
/// Used for previews and dry runs.
///
/// # Examples
///
/// ```
/// use herald_audit::{CardTransport, JsonTransport};
/// use herald_core::{Card, ChannelId, Colour};
///
/// # #[tokio::main]
/// # async fn main() {
/// let transport = JsonTransport::new(Vec::new());
/// transport
///     .send_card(ChannelId(7), &Card::new("hello", Colour::default()))
///     .await
///     .unwrap();
/// # }
/// ```
pub struct JsonTransport {
    out: Mutex<Box<dyn Write + Send>>,
}

impl JsonTransport {
    /// Write to any sink.
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    /// Write to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

#[async_trait]
impl CardTransport for JsonTransport {
    #[tracing::instrument(skip(self, card), fields(channel_id = %channel, title = %card.title()))]
    async fn send_card(&self, channel: ChannelId, card: &Card) -> HeraldResult<()> {
        let line = serde_json::to_string(&JsonDelivery { channel, card }).map_err(JsonError::from)?;

        let mut out = self.out.lock();
        writeln!(out, "{}", line).map_err(|e| {
            TransportError::new(TransportErrorKind::SendFailed(format!(
                "Failed to write card: {}",
                e
            )))
        })?;
        tracing::debug!("Wrote card as JSON");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::Colour;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_json_transport_writes_one_line_per_card() {
        let buffer = SharedBuffer::default();
        let transport = JsonTransport::new(buffer.clone());

        let mut card = Card::new("first", Colour::from_rgb(1, 2, 3));
        card.add_field("k", "v");
        transport.send_card(ChannelId(7), &card).await.unwrap();
        transport
            .send_card(ChannelId(8), &Card::new("second", Colour::default()))
            .await
            .unwrap();

        let written = String::from_utf8(buffer.0.lock().clone()).unwrap();
        let lines: Vec<serde_json::Value> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["channel"], 7);
        assert_eq!(lines[0]["card"]["title"], "first");
        assert_eq!(lines[0]["card"]["fields"][0]["name"], "k");
        assert!(lines[1]["card"].get("footer").is_none());
    }
}
