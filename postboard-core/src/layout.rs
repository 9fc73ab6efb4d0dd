//! Text layout for the full-text view
//!
//! Two independent calculations live here:
//!
//! - [`estimate_height`] is a closed-form guess of the content height used to
//!   bound scrolling. It counts characters, not wrapped lines.
//! - [`wrap`] / [`layout`] run the greedy word wrap that decides what is
//!   actually drawn.
//!
//! The two can disagree (long words, paragraph breaks landing mid-window),
//! so the scroll bound may stop slightly short of or past the real end of the
//! text.

use heapless::Vec;

use postboard_protocol::PARAGRAPH_BREAK;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Padding above and below the text block
pub const CONTENT_PADDING: i32 = 8;

/// Extra vertical space after a paragraph break
pub const PARAGRAPH_GAP: i32 = 20;

/// Maximum lines materialised by [`layout`]
pub const MAX_LAYOUT_LINES: usize = 32;

/// Text size profile, calibrated for a fixed-width font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SizeProfile {
    /// 25 characters per line, 18 units per line
    #[default]
    Large,
    /// 50 characters per line, 12 units per line
    Small,
}

impl SizeProfile {
    /// Characters that fit on one line
    pub const fn chars_per_line(self) -> usize {
        match self {
            SizeProfile::Large => 25,
            SizeProfile::Small => 50,
        }
    }

    /// Vertical advance per line
    pub const fn line_height(self) -> i32 {
        match self {
            SizeProfile::Large => 18,
            SizeProfile::Small => 12,
        }
    }
}

/// One wrapped line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line<'a> {
    /// Line text, surrounding whitespace trimmed
    pub text: &'a str,
    /// Vertical offset from the top of the content (first line at 0)
    pub y: i32,
    /// The line ended on a paragraph break
    pub paragraph_break: bool,
}

/// Lines that fall inside a viewport
pub type LayoutResult<'a> = Vec<Line<'a>, MAX_LAYOUT_LINES>;

/// Estimate the total content height of `text`
///
/// One line per `chars_per_line` characters (plus one), two extra lines per
/// paragraph break, plus padding above and below.
pub fn estimate_height(text: &str, profile: SizeProfile) -> i32 {
    let breaks = text.bytes().filter(|&b| b == PARAGRAPH_BREAK).count();
    let lines = text.len() / profile.chars_per_line() + 1 + 2 * breaks;
    lines as i32 * profile.line_height() + 2 * CONTENT_PADDING
}

/// Word-wrap `text` from the start
pub fn wrap(text: &str, profile: SizeProfile) -> Wrap<'_> {
    Wrap {
        text,
        profile,
        pos: 0,
        y: 0,
    }
}

/// Lay out `text` and keep the lines whose offset is in `[top, bottom)`
///
/// Lines above the viewport are still wrapped so offsets stay correct.
pub fn layout(text: &str, profile: SizeProfile, top: i32, bottom: i32) -> LayoutResult<'_> {
    let mut lines = LayoutResult::new();
    for line in wrap(text, profile) {
        if line.y >= bottom {
            break;
        }
        if line.y >= top && lines.push(line).is_err() {
            break;
        }
    }
    lines
}

/// Greedy word-wrap iterator, see [`wrap`]
#[derive(Debug, Clone)]
pub struct Wrap<'a> {
    text: &'a str,
    profile: SizeProfile,
    pos: usize,
    y: i32,
}

impl<'a> Iterator for Wrap<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        let text = self.text;
        let bytes = text.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }

        let limit = floor_char_boundary(text, self.pos + self.profile.chars_per_line());
        let end = if limit >= bytes.len() {
            bytes.len()
        } else {
            // Nearest break character to the limit wins; none means the
            // token is longer than a line and gets cut at the limit
            (self.pos + 1..=limit)
                .rev()
                .find(|&i| is_break(bytes[i]))
                .unwrap_or(limit)
        };

        let paragraph_break = bytes.get(end) == Some(&PARAGRAPH_BREAK);
        let line = Line {
            text: text[self.pos..end].trim(),
            y: self.y,
            paragraph_break,
        };

        if paragraph_break {
            self.y += PARAGRAPH_GAP;
        }
        self.y += self.profile.line_height();
        // The break character itself is never drawn
        self.pos = end + text[end..].chars().next().map_or(1, char::len_utf8);

        Some(line)
    }
}

fn is_break(byte: u8) -> bool {
    byte == b' ' || byte == PARAGRAPH_BREAK
}

/// Largest char boundary of `s` not past `index`
pub(crate) fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut index = index;
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::string::String;
    use std::vec::Vec as StdVec;

    fn all_lines(text: &str, profile: SizeProfile) -> StdVec<Line<'_>> {
        wrap(text, profile).collect()
    }

    #[test]
    fn test_estimate_height() {
        assert_eq!(estimate_height("", SizeProfile::Large), 18 + 16);
        let fifty = "a".repeat(50);
        assert_eq!(estimate_height(&fifty, SizeProfile::Large), 3 * 18 + 16);
        assert_eq!(estimate_height(&fifty, SizeProfile::Small), 2 * 12 + 16);
        assert_eq!(estimate_height("Hello\nWorld", SizeProfile::Large), 3 * 18 + 16);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = all_lines("  hello world ", SizeProfile::Large);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "hello world");
        assert_eq!(lines[0].y, 0);
        assert!(!lines[0].paragraph_break);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(all_lines("", SizeProfile::Large).is_empty());
    }

    #[test]
    fn test_wrap_breaks_at_space_on_boundary() {
        let lines = all_lines("The quick brown fox jumps over the lazy dog", SizeProfile::Large);
        let texts: StdVec<&str> = lines.iter().map(|l| l.text).collect();
        assert_eq!(texts, ["The quick brown fox jumps", "over the lazy dog"]);
        assert_eq!(lines[1].y, 18);
    }

    #[test]
    fn test_wrap_nearest_space_wins() {
        let lines = all_lines("aaaa bbbbbbbbbb ccccccccccccc dd", SizeProfile::Large);
        let texts: StdVec<&str> = lines.iter().map(|l| l.text).collect();
        assert_eq!(texts, ["aaaa bbbbbbbbbb", "ccccccccccccc dd"]);
    }

    #[test]
    fn test_wrap_forces_break_in_long_token() {
        let text = "a".repeat(30);
        let lines = all_lines(&text, SizeProfile::Large);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text.len(), 25);
        // Character at the forced break is consumed like a break character
        assert_eq!(lines[1].text, "aaaa");
    }

    #[test]
    fn test_wrap_paragraph_break_adds_gap() {
        let lines = all_lines("aaaa bbbb cccc dddd eeee\nffff", SizeProfile::Large);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "aaaa bbbb cccc dddd eeee");
        assert!(lines[0].paragraph_break);
        assert_eq!(lines[1].text, "ffff");
        assert_eq!(lines[1].y, 18 + PARAGRAPH_GAP);
    }

    #[test]
    fn test_wrap_short_text_keeps_inner_break() {
        // Text that fits on one line is not scanned for breaks
        let lines = all_lines("Hello\nWorld", SizeProfile::Large);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hello\nWorld");
    }

    #[test]
    fn test_wrap_small_profile() {
        let text = "word ".repeat(20);
        let lines = all_lines(&text, SizeProfile::Small);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].y, 12);
        assert!(lines.iter().all(|l| l.text.len() <= 50));
    }

    #[test]
    fn test_wrap_multibyte_text_does_not_panic() {
        let text = "é".repeat(40);
        let lines = all_lines(&text, SizeProfile::Large);
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| l.text.len() <= 25));
    }

    #[test]
    fn test_layout_viewport_filter() {
        let text = "word ".repeat(40);
        let all = all_lines(&text, SizeProfile::Large);
        assert!(all.len() > 5);

        let visible = layout(&text, SizeProfile::Large, 36, 72);
        let offsets: StdVec<i32> = visible.iter().map(|l| l.y).collect();
        assert_eq!(offsets, [36, 54]);
        assert_eq!(visible[0].text, all[2].text);
    }

    #[test]
    fn test_layout_caps_materialised_lines() {
        let text = "word ".repeat(400);
        let visible = layout(&text, SizeProfile::Large, 0, i32::MAX);
        assert_eq!(visible.len(), MAX_LAYOUT_LINES);
    }

    fn words_strategy(max_word: usize) -> impl Strategy<Value = StdVec<String>> {
        prop::collection::vec(
            prop::string::string_regex(&std::format!("[a-z]{{1,{}}}", max_word)).unwrap(),
            0..40,
        )
    }

    proptest! {
        #[test]
        fn test_lines_never_exceed_width(text in "[a-z \n]{0,300}") {
            for profile in [SizeProfile::Large, SizeProfile::Small] {
                for line in wrap(&text, profile) {
                    prop_assert!(line.text.len() <= profile.chars_per_line());
                }
            }
        }

        #[test]
        fn test_words_that_fit_are_never_split(words in words_strategy(25)) {
            let text = words.join(" ");
            let produced: StdVec<&str> = wrap(&text, SizeProfile::Large)
                .flat_map(|line| line.text.split(' '))
                .filter(|w| !w.is_empty())
                .collect();
            let expected: StdVec<&str> = words.iter().map(String::as_str).collect();
            prop_assert_eq!(produced, expected);
        }

        #[test]
        fn test_offsets_increase(text in "[a-z \n]{0,300}") {
            let lines = all_lines(&text, SizeProfile::Large);
            for pair in lines.windows(2) {
                prop_assert!(pair[1].y > pair[0].y);
            }
        }
    }
}
