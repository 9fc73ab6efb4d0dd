//! Message types for the Postboard protocol
//!
//! Messages borrow from the decoder's line buffer. The consumer copies what it
//! wants to keep before feeding the next byte.

use crate::line::FrameError;

/// Prefix of a post summary line
pub const LATEST_PREFIX: &[u8] = b"LATEST:";

/// Prefix of a full-text line
pub const PLAINTEXT_PREFIX: &[u8] = b"PLAINTEXT:";

/// Separator between summary fields
pub const FIELD_DELIMITER: u8 = b'|';

/// Marker the producer sends in place of a line break
pub const BREAK_MARKER: &[u8] = b" [NL] ";

/// Paragraph-break character stored in place of [`BREAK_MARKER`]
pub const PARAGRAPH_BREAK: u8 = b'\n';

/// A post summary borrowed from a decoded line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Summary<'a> {
    pub subreddit: &'a str,
    pub title: &'a str,
    pub author: &'a str,
    /// Score, may be negative
    pub score: i32,
}

/// Messages from the producer to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message<'a> {
    /// Latest post summary
    Summary(Summary<'a>),
    /// Full post body with paragraph breaks already substituted
    FullText(&'a str),
}

/// Parse the payload of a `LATEST:` line
///
/// Fields are split at the first three delimiters; anything after the third
/// delimiter (including further delimiters) is the score text.
pub fn parse_summary(payload: &str) -> Result<Summary<'_>, FrameError> {
    let bytes = payload.as_bytes();
    let d1 = find_delimiter(bytes, 0).ok_or(FrameError::MalformedFrame)?;
    let d2 = find_delimiter(bytes, d1 + 1).ok_or(FrameError::MalformedFrame)?;
    let d3 = find_delimiter(bytes, d2 + 1).ok_or(FrameError::MalformedFrame)?;

    Ok(Summary {
        subreddit: &payload[..d1],
        title: &payload[d1 + 1..d2],
        author: &payload[d2 + 1..d3],
        score: parse_score(&payload[d3 + 1..]),
    })
}

fn find_delimiter(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == FIELD_DELIMITER)
        .map(|pos| pos + from)
}

/// Parse a score the lenient way the producer's counterpart always has
///
/// Leading whitespace and an optional sign are accepted, then as many digits
/// as follow. Text without leading digits yields 0. Out-of-range values
/// saturate.
pub fn parse_score(text: &str) -> i32 {
    let mut bytes = text.trim_start().bytes().peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let mut value: i32 = 0;
    for b in bytes {
        if !b.is_ascii_digit() {
            break;
        }
        let digit = (b - b'0') as i32;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Replace every [`BREAK_MARKER`] in `buf` with [`PARAGRAPH_BREAK`], in place
///
/// Matches are taken left to right without overlap. Returns the new length;
/// bytes past it are left over from the original content.
pub fn substitute_breaks(buf: &mut [u8]) -> usize {
    let mut read = 0;
    let mut write = 0;

    while read < buf.len() {
        if buf[read..].starts_with(BREAK_MARKER) {
            buf[write] = PARAGRAPH_BREAK;
            read += BREAK_MARKER.len();
        } else {
            buf[write] = buf[read];
            read += 1;
        }
        write += 1;
    }
    write
}
