// src/sync/stream.rs

//! Long-lived change event stream connection.
//!
//! Opens a single GET connection to the notification endpoint and yields
//! newline-delimited JSON frames. Blank lines, `:` heartbeat comments,
//! and an optional `data:` prefix are tolerated and stripped. The
//! connection closes when the stream is dropped, on every exit path; no
//! automatic reconnect happens here (reconnect policy is the caller's
//! concern).

use std::pin::Pin;

use futures::{Stream, StreamExt};
use url::Url;

use crate::error::{AppError, Result};

/// Connection lifecycle of one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Open,
    Closed,
}

type ChunkStream = Pin<Box<dyn Stream<Item = std::result::Result<Vec<u8>, reqwest::Error>> + Send>>;

/// A live notification stream.
pub struct EventStream {
    chunks: ChunkStream,
    buffer: Vec<u8>,
    state: StreamState,
}

impl EventStream {
    /// Connect to the stream endpoint.
    ///
    /// Fails on transport errors or a non-success response status.
    pub async fn connect(client: &reqwest::Client, url: &Url) -> Result<Self> {
        let response = client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::api(
                status.as_u16(),
                format!("stream endpoint refused: {url}"),
            ));
        }

        log::debug!("Notification stream open: {url}");
        let chunks = response.bytes_stream().map(|chunk| chunk.map(|b| b.to_vec()));
        Ok(Self {
            chunks: Box::pin(chunks),
            buffer: Vec::new(),
            state: StreamState::Open,
        })
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == StreamState::Open
    }

    /// Read the next event frame payload.
    ///
    /// Returns `None` on orderly end of stream and `Some(Err(_))` on a
    /// transport failure; both transition the stream to `Closed` and no
    /// further frames are yielded.
    pub async fn next_frame(&mut self) -> Option<Result<String>> {
        if self.state == StreamState::Closed {
            return None;
        }
        loop {
            while let Some(line) = drain_line(&mut self.buffer) {
                if let Some(payload) = frame_payload(&line) {
                    return Some(Ok(payload.to_string()));
                }
            }

            match self.chunks.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    self.state = StreamState::Closed;
                    return Some(Err(AppError::stream(e)));
                }
                None => {
                    self.state = StreamState::Closed;
                    // A final frame may lack the trailing newline.
                    if !self.buffer.is_empty() {
                        let tail = String::from_utf8_lossy(&self.buffer).into_owned();
                        self.buffer.clear();
                        if let Some(payload) = frame_payload(&tail) {
                            return Some(Ok(payload.to_string()));
                        }
                    }
                    return None;
                }
            }
        }
    }
}

/// Pop one `\n`-terminated line off the front of the buffer.
fn drain_line(buffer: &mut Vec<u8>) -> Option<String> {
    let pos = buffer.iter().position(|&b| b == b'\n')?;
    let raw: Vec<u8> = buffer.drain(..=pos).collect();
    let mut line = String::from_utf8_lossy(&raw).into_owned();
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Some(line)
}

/// Extract the JSON payload from one frame line.
///
/// Blank lines and `:` comments yield `None`; a `data:` prefix is
/// stripped when present.
fn frame_payload(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    let payload = line
        .strip_prefix("data:")
        .map(str::trim_start)
        .unwrap_or(line);
    if payload.is_empty() { None } else { Some(payload) }
}
