//! # Frame reader for the event channel.
//!
//! [`FrameReader`] pulls one complete frame per call: a header line, then
//! exactly the number of body bytes the header's `len` field declares.
//! Nothing is buffered across calls — each call yields one whole frame or
//! a fault.
//!
//! End-of-stream at a frame boundary is the expected way for this watcher
//! to stop (the supervisor closed the channel) and is reported as
//! `Ok(None)`. End-of-stream *inside* a frame is a truncation fault.

use std::collections::HashMap;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::ProtocolError;
use crate::events::EventFrame;

/// Extracts and validates the declared body length from a parsed header.
fn declared_len(header: &HashMap<String, String>) -> Result<usize, ProtocolError> {
    let raw = header.get("len").ok_or(ProtocolError::MissingKey {
        key: "len",
        section: "header",
    })?;
    raw.parse().map_err(|_| ProtocolError::InvalidLength {
        value: raw.clone(),
    })
}

/// Reads event frames from the supervisor's notification channel.
///
/// Generic over any buffered async reader so tests can feed byte slices
/// instead of the real stdin.
pub struct FrameReader<R> {
    input: R,
}

impl<R: AsyncBufRead + Unpin> FrameReader<R> {
    /// Wraps the given input stream.
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Blocks until one complete frame is available.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` — a whole frame was read
    /// - `Ok(None)` — the channel closed cleanly at a frame boundary
    /// - `Err(_)` — malformed header, bad `len`, truncated body, or I/O
    ///   failure
    pub async fn next_frame(&mut self) -> Result<Option<EventFrame>, ProtocolError> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }

        let header = EventFrame::parse_header(line.trim_end())?;
        let len = declared_len(&header)?;

        let mut body = vec![0u8; len];
        // A short read here means the supervisor died mid-frame; that is a
        // truncation fault, not a clean close.
        self.input.read_exact(&mut body).await?;
        let body = String::from_utf8(body)?;

        Ok(Some(EventFrame { header, body }))
    }
}
