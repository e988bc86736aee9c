//! Cancellable, pull-based streaming of LLM text.
//!
//! A producer task pushes chunks into a bounded channel; the consumer pulls
//! with [`ChunkStream::next`] and may cancel at any time through the
//! stream's [`CancellationToken`]. Cancelling stops the producer at its
//! next await point.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{LlmError, LlmResult};

/// Channel capacity between producer and consumer.
pub const CHUNK_BUFFER: usize = 32;

/// Consumer side of a streamed LLM response.
#[derive(Debug)]
pub struct ChunkStream {
    rx: mpsc::Receiver<LlmResult<String>>,
    cancel: CancellationToken,
}

/// Producer side handed to the task that reads the response.
#[derive(Debug, Clone)]
pub struct ChunkSender {
    tx: mpsc::Sender<LlmResult<String>>,
    cancel: CancellationToken,
}

impl ChunkSender {
    /// Sends a chunk. Returns false once the consumer is gone or cancelled.
    pub async fn send(&self, chunk: LlmResult<String>) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            sent = self.tx.send(chunk) => sent.is_ok(),
        }
    }

    /// The token shared with the consumer.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl ChunkStream {
    /// Creates a connected producer/consumer pair.
    pub fn channel(cancel: CancellationToken) -> (ChunkSender, ChunkStream) {
        let (tx, rx) = mpsc::channel(CHUNK_BUFFER);
        (
            ChunkSender {
                tx,
                cancel: cancel.clone(),
            },
            ChunkStream { rx, cancel },
        )
    }

    /// A stream that yields `text` as a single chunk.
    pub fn from_text(text: String, cancel: CancellationToken) -> Self {
        let (tx, rx) = mpsc::channel(1);
        // Capacity 1 and a fresh receiver: this send cannot fail.
        let _ = tx.try_send(Ok(text));
        ChunkStream { rx, cancel }
    }

    /// Pulls the next chunk. `None` when the producer is done or the stream
    /// was cancelled.
    pub async fn next(&mut self) -> Option<LlmResult<String>> {
        if self.cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            chunk = self.rx.recv() => chunk,
            _ = self.cancel.cancelled() => None,
        }
    }

    /// Stops the producer.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Drains the stream into one string, passing each chunk to `observer`.
    ///
    /// Fails on the first error chunk, or with [`LlmError::Cancelled`] if the
    /// token fires before the producer finishes.
    pub async fn collect_with(mut self, mut observer: impl FnMut(&str)) -> LlmResult<String> {
        let mut text = String::new();
        while let Some(chunk) = self.next().await {
            let chunk = chunk?;
            observer(&chunk);
            text.push_str(&chunk);
        }
        if self.cancel.is_cancelled() {
            return Err(LlmError::Cancelled);
        }
        Ok(text)
    }
}

impl Drop for ChunkStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Incremental decoder for `text/event-stream` bodies.
///
/// Bytes may arrive split anywhere; complete `data:` payloads are returned
/// as soon as their terminating blank line is seen.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds bytes and returns every completed event's data payload.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));
        let mut events = Vec::new();
        while let Some((end, sep_len)) = find_event_end(&self.buffer) {
            let raw: String = self.buffer.drain(..end + sep_len).collect();
            if let Some(data) = event_data(&raw[..end]) {
                events.push(data);
            }
        }
        events
    }

    /// Returns the data of a trailing event with no final blank line.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        event_data(rest.trim_end())
    }
}

fn find_event_end(buffer: &str) -> Option<(usize, usize)> {
    let lf = buffer.find("\n\n").map(|i| (i, 2));
    let crlf = buffer.find("\r\n\r\n").map(|i| (i, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn event_data(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.strip_prefix(' ').unwrap_or(data))
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
