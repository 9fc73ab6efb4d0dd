//! Display backend trait
//!
//! Defines the drawing surface the renderer needs from a panel.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
}

/// Palette of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Header band, upvoted scores
    Orange,
    Black,
    White,
    /// Author, hints, secondary text
    Gray,
    /// Downvoted scores
    Purple,
}

impl Color {
    /// RGB565 value of the colour
    pub const fn rgb565(self) -> u16 {
        match self {
            Color::Orange => 0xFA20,
            Color::Black => 0x0000,
            Color::White => 0xFFFF,
            Color::Gray => 0x8410,
            Color::Purple => 0x8010,
        }
    }
}

/// Text sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// Hints, author and score
    Small,
    /// Headers, titles and body text
    Large,
}

/// Display backend trait
///
/// Coordinates are pixels with the origin at the top left. Text is
/// positioned by the top edge of its glyph cell. Drawing outside the panel
/// is clipped, not an error.
pub trait DisplayBackend {
    /// Fill the whole display
    fn clear(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Draw a single line of text with an opaque background
    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        size: TextSize,
        fg: Color,
        bg: Color,
    ) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// Displays without a frame buffer can make this a no-op.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions in pixels (width, height)
    fn dimensions(&self) -> (u32, u32);
}
