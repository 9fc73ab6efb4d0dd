//! Postboard Serial Protocol
//!
//! This crate defines the UART protocol between Postboard (the display) and
//! the host-side producer that fetches posts. The protocol is plain ASCII,
//! one message per line, so it can be driven from a terminal while debugging.
//!
//! # Protocol Overview
//!
//! Producer → display:
//! ```text
//! LATEST:<subreddit>|<title>|<author>|<score>\n
//! PLAINTEXT:<body, " [NL] " marks a paragraph break>\n
//! ```
//!
//! Display → producer:
//! ```text
//! REQUEST_LATEST\r\n
//! REQUEST_PLAINTEXT\r\n
//! ```
//!
//! There is no acknowledgement or sequencing. A response is whatever line
//! arrives next; the display applies it regardless of which request caused it.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod line;
pub mod messages;
pub mod requests;

pub use line::{FrameError, LineDecoder, LINE_TERMINATOR, MAX_LINE_LEN};
pub use messages::{Message, Summary, PARAGRAPH_BREAK};
pub use requests::Request;
