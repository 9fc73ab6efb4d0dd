//! Line framing for the Postboard protocol.
//!
//! A frame is one `\n`-terminated line of printable ASCII. Control bytes
//! (including `\r`) and non-ASCII bytes are discarded before they reach the
//! buffer, so every position in it is a valid `str` boundary.
//!
//! The line buffer is bounded. If a line outgrows it, the partial line is
//! dropped, a single [`FrameError::BufferOverflow`] is reported and every byte
//! up to the next terminator is discarded.

use heapless::Vec;

use crate::messages::{self, Message, LATEST_PREFIX, PLAINTEXT_PREFIX};

/// Frame terminator
pub const LINE_TERMINATOR: u8 = b'\n';

/// Maximum line length in bytes (terminator excluded)
pub const MAX_LINE_LEN: usize = 4096;

/// Errors that can occur while decoding lines
///
/// These never reach the producer; they exist for logging and tests. Every
/// error means the line was dropped and prior state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Line had a known prefix but an unusable payload
    MalformedFrame,
    /// Line exceeded [`MAX_LINE_LEN`] and was discarded
    BufferOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Collecting printable bytes
    Accumulating,
    /// Dropping bytes until the next terminator (after overflow)
    Discarding,
    /// Buffer holds the line returned by the previous call
    Complete,
}

/// Incremental line decoder
///
/// Feed it one byte at a time; it yields a [`Message`] when a terminator
/// completes a recognised line. The returned message borrows the decoder, so
/// it must be consumed before the next byte is fed.
#[derive(Debug, Clone)]
pub struct LineDecoder {
    buffer: Vec<u8, MAX_LINE_LEN>,
    state: DecodeState,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    /// Create a new decoder
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: DecodeState::Accumulating,
        }
    }

    /// Drop any partial line
    fn reset(&mut self) {
        self.buffer.clear();
        self.state = DecodeState::Accumulating;
    }

    /// Number of bytes of the current partial line
    #[cfg(test)]
    fn pending(&self) -> usize {
        match self.state {
            DecodeState::Accumulating => self.buffer.len(),
            DecodeState::Discarding | DecodeState::Complete => 0,
        }
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Ok(Some(message))` when a line completes with a recognised
    /// prefix, `Ok(None)` when more bytes are needed or the line was ignored,
    /// or `Err` when the line was dropped.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Message<'_>>, FrameError> {
        if self.state == DecodeState::Complete {
            self.reset();
        }

        if byte == LINE_TERMINATOR {
            if self.state == DecodeState::Discarding {
                // Tail of an oversized line; overflow was already reported
                self.reset();
                return Ok(None);
            }
            self.state = DecodeState::Complete;
            return self.classify();
        }

        if self.state == DecodeState::Discarding || !is_printable(byte) {
            return Ok(None);
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.state = DecodeState::Discarding;
            return Err(FrameError::BufferOverflow);
        }
        Ok(None)
    }

    /// Feed multiple bytes to the decoder
    ///
    /// `on_frame` is called for every completed message and every dropped
    /// line, in stream order.
    pub fn feed_bytes<F>(&mut self, bytes: &[u8], mut on_frame: F)
    where
        F: FnMut(Result<Message<'_>, FrameError>),
    {
        for &byte in bytes {
            match self.feed(byte) {
                Ok(Some(message)) => on_frame(Ok(message)),
                Ok(None) => {}
                Err(e) => on_frame(Err(e)),
            }
        }
    }

    /// Interpret the completed line held in the buffer
    fn classify(&mut self) -> Result<Option<Message<'_>>, FrameError> {
        let (start, end) = trim_range(&self.buffer);
        let line = &mut self.buffer[start..end];

        if line.starts_with(LATEST_PREFIX) {
            let payload = as_str(&line[LATEST_PREFIX.len()..])?;
            let summary = messages::parse_summary(payload)?;
            Ok(Some(Message::Summary(summary)))
        } else if line.starts_with(PLAINTEXT_PREFIX) {
            let payload = &mut line[PLAINTEXT_PREFIX.len()..];
            let len = messages::substitute_breaks(payload);
            let body = as_str(&payload[..len])?;
            Ok(Some(Message::FullText(body)))
        } else {
            // Empty lines and unknown prefixes are ignored
            Ok(None)
        }
    }
}

/// Printable ASCII, space included
fn is_printable(byte: u8) -> bool {
    (0x20..0x7F).contains(&byte)
}

/// Range of `bytes` without leading and trailing whitespace
fn trim_range(bytes: &[u8]) -> (usize, usize) {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |pos| pos + 1);
    (start, end)
}

fn as_str(bytes: &[u8]) -> Result<&str, FrameError> {
    core::str::from_utf8(bytes).map_err(|_| FrameError::MalformedFrame)
}
