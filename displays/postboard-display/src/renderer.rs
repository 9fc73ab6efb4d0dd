//! Screen rendering
//!
//! Draws the three screens of the viewer. Every screen is a full redraw:
//! clear, header band, content, footer.

use core::fmt::Write;

use heapless::String;
use postboard_core::{FullTextScreen, PostSummary, Screen, ScrollHint, SizeProfile, ViewConfig};

use crate::backend::{Color, DisplayBackend, DisplayError, TextSize};

/// Left edge and top of the header text
const HEADER_TEXT_X: i32 = 10;
const HEADER_TEXT_Y: i32 = 8;

/// Characters per title line on the summary screen
const TITLE_CHARS: usize = 25;

/// Vertical advance per title line
const TITLE_LINE_HEIGHT: i32 = 16;

/// Extra space between the first title line and the header padding
const TITLE_TOP_GAP: i32 = 5;

/// Gap between the title block and the author line
const AUTHOR_GAP: i32 = 10;

/// Advance from the author line to the score line
const SCORE_ADVANCE: i32 = 18;

/// Distance of the summary hint from the bottom edge
const SUMMARY_HINT_RISE: i32 = 15;

/// Distance of the scroll hint from the bottom edge
const SCROLL_HINT_RISE: i32 = 12;

/// Screen renderer
#[derive(Debug, Clone)]
pub struct Renderer {
    config: ViewConfig,
}

impl Renderer {
    pub const fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    /// Render the startup screen shown until the first summary arrives
    pub fn render_welcome<B: DisplayBackend>(&self, display: &mut B) -> Result<(), DisplayError> {
        display.clear(Color::Black)?;
        self.draw_header_band(display)?;
        display.draw_text(
            HEADER_TEXT_X,
            HEADER_TEXT_Y,
            "Reddit Display",
            TextSize::Large,
            Color::White,
            Color::Orange,
        )?;
        display.draw_text(
            HEADER_TEXT_X,
            60,
            "Connecting...",
            TextSize::Small,
            Color::White,
            Color::Black,
        )?;
        display.draw_text(
            HEADER_TEXT_X,
            80,
            "Waiting for posts",
            TextSize::Small,
            Color::Gray,
            Color::Black,
        )?;
        display.flush()
    }

    /// Render a screen description
    pub fn render<B: DisplayBackend>(
        &self,
        display: &mut B,
        screen: &Screen<'_>,
    ) -> Result<(), DisplayError> {
        match screen {
            Screen::Summary(summary) => self.render_summary(display, summary)?,
            Screen::FullText(full) => self.render_full_text(display, full)?,
        }
        display.flush()
    }

    fn render_summary<B: DisplayBackend>(
        &self,
        display: &mut B,
        summary: &PostSummary,
    ) -> Result<(), DisplayError> {
        let config = &self.config;
        display.clear(Color::Black)?;
        self.draw_header(display, &summary.subreddit)?;

        // Title in fixed-width chunks, no word wrap
        let mut y = config.content_top() + TITLE_TOP_GAP;
        for chunk in char_chunks(&summary.title, TITLE_CHARS) {
            if y < config.screen_height {
                display.draw_text(
                    config.padding,
                    y,
                    chunk,
                    TextSize::Large,
                    Color::White,
                    Color::Black,
                )?;
            }
            y += TITLE_LINE_HEIGHT;
        }
        y += AUTHOR_GAP;

        let mut author: String<40> = String::new();
        let _ = write!(author, "u/{}", summary.author);
        display.draw_text(
            config.padding,
            y,
            &author,
            TextSize::Small,
            Color::Gray,
            Color::Black,
        )?;
        y += SCORE_ADVANCE;

        let (score, color) = format_score(summary.score);
        display.draw_text(config.padding, y, &score, TextSize::Small, color, Color::Black)?;

        display.draw_text(
            config.padding,
            config.screen_height - SUMMARY_HINT_RISE,
            "BOOT: read full text",
            TextSize::Small,
            Color::Gray,
            Color::Black,
        )
    }

    fn render_full_text<B: DisplayBackend>(
        &self,
        display: &mut B,
        full: &FullTextScreen<'_>,
    ) -> Result<(), DisplayError> {
        let config = &self.config;
        display.clear(Color::Black)?;
        self.draw_header(display, full.subreddit)?;

        for line in &full.lines {
            display.draw_text(
                config.padding,
                config.screen_y(full.offset, line.y),
                line.text,
                TextSize::from(config.text_size),
                Color::White,
                Color::Black,
            )?;
        }

        let Some(hint) = full.hint else {
            return Ok(());
        };

        let (width, _) = display.dimensions();
        let footer_top = config.screen_height - config.footer_height;
        display.fill_rect(
            0,
            footer_top,
            width,
            config.footer_height as u32,
            Color::Black,
        )?;

        let mut text: String<24> = String::new();
        match hint {
            ScrollHint::Scroll { percent } => {
                let _ = write!(text, "BOOT: scroll ({}%)", percent);
            }
            ScrollHint::Back => {
                let _ = text.push_str("BOOT: back to posts");
            }
        }
        display.draw_text(
            config.padding,
            config.screen_height - SCROLL_HINT_RISE,
            &text,
            TextSize::Small,
            Color::Gray,
            Color::Black,
        )
    }

    fn draw_header<B: DisplayBackend>(
        &self,
        display: &mut B,
        subreddit: &str,
    ) -> Result<(), DisplayError> {
        self.draw_header_band(display)?;
        let mut text: String<40> = String::new();
        let _ = write!(text, "r/{}", subreddit);
        display.draw_text(
            self.config.padding,
            HEADER_TEXT_Y,
            &text,
            TextSize::Large,
            Color::White,
            Color::Orange,
        )
    }

    fn draw_header_band<B: DisplayBackend>(&self, display: &mut B) -> Result<(), DisplayError> {
        let (width, _) = display.dimensions();
        display.fill_rect(
            0,
            0,
            width,
            self.config.header_height as u32,
            Color::Orange,
        )
    }
}

impl From<SizeProfile> for TextSize {
    fn from(profile: SizeProfile) -> Self {
        match profile {
            SizeProfile::Large => TextSize::Large,
            SizeProfile::Small => TextSize::Small,
        }
    }
}

/// Score line and its colour; negative scores show their magnitude
fn format_score(score: i32) -> (String<20>, Color) {
    let mut text = String::new();
    if score >= 0 {
        let _ = write!(text, "^ {} pts", score);
        (text, Color::Orange)
    } else {
        let _ = write!(text, "v {} pts", score.unsigned_abs());
        (text, Color::Purple)
    }
}

/// Split `text` into slices of at most `n` characters
fn char_chunks(text: &str, n: usize) -> impl Iterator<Item = &str> {
    let mut rest = text;
    core::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest.char_indices().nth(n).map_or(rest.len(), |(i, _)| i);
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}
