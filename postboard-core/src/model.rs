//! Post model
//!
//! Latest summary and full text as last received from the producer. Both are
//! replaced wholesale by each message; nothing else writes to them.

use heapless::String;
use postboard_protocol::{Message, MAX_LINE_LEN};

use crate::layout::floor_char_boundary;

/// Maximum stored subreddit name length
pub const MAX_SUBREDDIT_LEN: usize = 32;

/// Maximum stored title length
pub const MAX_TITLE_LEN: usize = 320;

/// Maximum stored author name length
pub const MAX_AUTHOR_LEN: usize = 32;

/// Maximum stored body length (one protocol line)
pub const MAX_BODY_LEN: usize = MAX_LINE_LEN;

/// Summary of the latest post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PostSummary {
    pub subreddit: String<MAX_SUBREDDIT_LEN>,
    pub title: String<MAX_TITLE_LEN>,
    pub author: String<MAX_AUTHOR_LEN>,
    /// Score, negative when downvoted
    pub score: i32,
}

/// What a message changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Update {
    Summary,
    FullText,
}

/// Latest post data
#[derive(Debug, Clone, Default)]
pub struct PostModel {
    summary: PostSummary,
    body: String<MAX_BODY_LEN>,
}

impl PostModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a decoded message
    ///
    /// Fields longer than their storage are truncated.
    pub fn apply(&mut self, message: Message<'_>) -> Update {
        match message {
            Message::Summary(summary) => {
                copy_truncated(&mut self.summary.subreddit, summary.subreddit);
                copy_truncated(&mut self.summary.title, summary.title);
                copy_truncated(&mut self.summary.author, summary.author);
                self.summary.score = summary.score;
                Update::Summary
            }
            Message::FullText(body) => {
                copy_truncated(&mut self.body, body);
                Update::FullText
            }
        }
    }

    /// Latest summary
    pub fn summary(&self) -> &PostSummary {
        &self.summary
    }

    /// Latest full text, paragraph breaks as `'\n'`
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Text for the full-text view; the title stands in until a body arrives
    pub fn display_text(&self) -> &str {
        if self.body.is_empty() {
            &self.summary.title
        } else {
            &self.body
        }
    }
}

fn copy_truncated<const N: usize>(dst: &mut String<N>, src: &str) {
    dst.clear();
    let end = floor_char_boundary(src, N);
    // Cannot fail: `end <= N`
    let _ = dst.push_str(&src[..end]);
}
