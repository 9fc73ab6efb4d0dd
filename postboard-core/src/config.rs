//! View configuration
//!
//! Geometry of the panel and the timing constants of the view. The firmware
//! builds its `ViewConfig` at compile time from `postboard.toml`; host code
//! and tests use [`ViewConfig::DEFAULT`].

use crate::layout::{SizeProfile, CONTENT_PADDING, MAX_LAYOUT_LINES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Auto-refresh interval of the summary view
pub const REFRESH_INTERVAL_MS: u32 = 30_000;

/// Minimum time between accepted button presses
pub const DEBOUNCE_MS: u32 = 50;

/// Scroll distance per button press
pub const SCROLL_STEP: i32 = 3;

/// View geometry and timing
///
/// All vertical values are in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ViewConfig {
    /// Panel width
    pub screen_width: i32,
    /// Panel height
    pub screen_height: i32,
    /// Height of the coloured header band
    pub header_height: i32,
    /// Horizontal and vertical text padding
    pub padding: i32,
    /// Height of the footer used for hints; excluded from the scroll area
    pub footer_height: i32,
    /// Lines starting this close to the bottom edge are not drawn
    pub bottom_margin: i32,
    /// Summary auto-refresh interval
    pub refresh_interval_ms: u32,
    /// Button debounce window
    pub debounce_ms: u32,
    /// Scroll distance per press
    pub scroll_step: i32,
    /// Text size of the full-text view
    pub text_size: SizeProfile,
}

impl ViewConfig {
    /// 320x240 landscape panel
    pub const DEFAULT: Self = Self {
        screen_width: 320,
        screen_height: 240,
        header_height: 35,
        padding: CONTENT_PADDING,
        footer_height: 15,
        bottom_margin: 20,
        refresh_interval_ms: REFRESH_INTERVAL_MS,
        debounce_ms: DEBOUNCE_MS,
        scroll_step: SCROLL_STEP,
        text_size: SizeProfile::Large,
    };

    /// Screen row where the first content line is drawn at offset 0
    pub const fn content_top(&self) -> i32 {
        self.header_height + self.padding
    }

    /// Height the full text can scroll through
    pub const fn visible_height(&self) -> i32 {
        self.screen_height - self.header_height - self.footer_height
    }

    /// Screen row of a content line at `y` when scrolled by `offset`
    pub const fn screen_y(&self, offset: i32, y: i32) -> i32 {
        self.content_top() - offset + y
    }

    /// Content-space range `[top, bottom)` that lands on screen
    ///
    /// A line is drawn when its screen row is below the header and at least
    /// `bottom_margin` above the bottom edge.
    pub const fn viewport(&self, offset: i32) -> (i32, i32) {
        let top = self.header_height - self.content_top() + offset;
        let bottom = self.screen_height - self.bottom_margin - self.content_top() + offset;
        (top, bottom)
    }

    /// Upper bound on the wrapped lines a viewport can hold
    ///
    /// Lines are at least one line height apart, so a viewport of height
    /// `h` holds at most `h / line_height + 1` of them.
    pub const fn max_visible_lines(&self) -> usize {
        let height = self.screen_height - self.bottom_margin - self.header_height;
        if height <= 0 {
            return 0;
        }
        (height / self.text_size.line_height()) as usize + 1
    }

    /// Check that [`layout`](crate::layout::layout) can hold every line
    /// the viewport shows
    pub const fn fits_layout(&self) -> bool {
        self.max_visible_lines() <= MAX_LAYOUT_LINES
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let config = ViewConfig::default();
        assert_eq!(config.content_top(), 43);
        assert_eq!(config.visible_height(), 190);
    }

    #[test]
    fn test_viewport_tracks_offset() {
        let config = ViewConfig::default();
        assert_eq!(config.viewport(0), (-8, 177));
        assert_eq!(config.viewport(30), (22, 207));
    }

    #[test]
    fn test_default_fits_layout() {
        let config = ViewConfig::default();
        assert_eq!(config.max_visible_lines(), 11);
        assert!(config.fits_layout());

        let small = ViewConfig {
            text_size: SizeProfile::Small,
            ..ViewConfig::DEFAULT
        };
        assert_eq!(small.max_visible_lines(), 16);
        assert!(small.fits_layout());
    }

    #[test]
    fn test_tall_small_panel_exceeds_layout_capacity() {
        let config = ViewConfig {
            screen_height: 1024,
            text_size: SizeProfile::Small,
            ..ViewConfig::DEFAULT
        };
        assert_eq!(config.max_visible_lines(), 81);
        assert!(!config.fits_layout());

        let largest = ViewConfig {
            screen_height: 436,
            ..config
        };
        assert_eq!(largest.max_visible_lines(), MAX_LAYOUT_LINES);
        assert!(largest.fits_layout());
        let one_more = ViewConfig {
            screen_height: 448,
            ..config
        };
        assert!(!one_more.fits_layout());
    }

    #[test]
    fn test_viewport_matches_screen_rows() {
        let config = ViewConfig::default();
        let offset = 12;
        let (top, bottom) = config.viewport(offset);
        assert_eq!(config.screen_y(offset, top), config.header_height);
        assert_eq!(
            config.screen_y(offset, bottom),
            config.screen_height - config.bottom_margin
        );
    }
}
