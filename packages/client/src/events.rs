//! Server-sent event stream of cache invalidations.

use futures::StreamExt;
use pagecraft_model::{CacheInvalidation, CACHE_INVALIDATE_EVENT};
use tokio::sync::broadcast;

use crate::error::ClientError;
use crate::{error_message, LayoutClient};

/// One dispatched server-sent event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
}

/// Incremental `text/event-stream` parser.
///
/// Chunks may split lines (or UTF-8 sequences) anywhere; only complete lines
/// are decoded. Comment lines such as keep-alive pings are skipped.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
    /// Bytes of `buffer` already searched for a line break
    scanned: usize,
    event: Option<String>,
    data: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every event it completed
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);
        let buffer = std::mem::take(&mut self.buffer);
        let mut events = Vec::new();

        let mut start = 0;
        let mut cursor = self.scanned;
        while let Some(offset) = buffer[cursor..].iter().position(|&b| b == b'\n') {
            let end = cursor + offset;
            let line = String::from_utf8_lossy(&buffer[start..end]);
            self.handle_line(line.trim_end_matches('\r'), &mut events);
            start = end + 1;
            cursor = start;
        }

        self.buffer = buffer;
        self.buffer.drain(..start);
        self.scanned = self.buffer.len();
        events
    }

    fn handle_line(&mut self, line: &str, events: &mut Vec<SseEvent>) {
        if line.is_empty() {
            events.extend(self.dispatch());
            return;
        }
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = self.data.join("\n");
        self.data.clear();
        Some(SseEvent { event, data })
    }
}

impl LayoutClient {
    /// Forward every `layout-cache-invalidate` event into `sender` until the
    /// server closes the stream.
    ///
    /// Calls `GET /api/events`.
    pub async fn watch_invalidations(
        &self,
        sender: broadcast::Sender<CacheInvalidation>,
    ) -> Result<(), ClientError> {
        let response = self.get("/api/events").send().await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(ClientError::ServerError {
                status,
                message: error_message(response).await,
            });
        }

        let mut stream = response.bytes_stream();
        let mut parser = SseParser::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            for event in parser.push(&chunk) {
                if event.event.as_deref() != Some(CACHE_INVALIDATE_EVENT) {
                    continue;
                }
                match serde_json::from_str::<CacheInvalidation>(&event.data) {
                    Ok(signal) => {
                        tracing::debug!(layout = %signal.layout_id, "layout cache invalidated");
                        let _ = sender.send(signal);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, data = %event.data, "ignoring malformed invalidation");
                    }
                }
            }
        }

        Ok(())
    }
}
