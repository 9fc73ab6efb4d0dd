//! TFT display backend
//!
//! Implements `DisplayBackend` for any `embedded-graphics` RGB565 draw target.
//! The firmware uses it on a `mipidsi` ILI9341 panel, which draws straight
//! to the controller RAM, so `flush` has nothing to do.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use postboard_display::{Color, DisplayBackend, DisplayError, TextSize};

/// Font for a text size; glyph cells fit the 18/12 px line advances
fn font(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        TextSize::Large => &FONT_9X15,
        TextSize::Small => &FONT_6X10,
    }
}

fn rgb565(color: Color) -> Rgb565 {
    Rgb565::from(RawU16::new(color.rgb565()))
}

/// Display backend over an RGB565 draw target
pub struct TftBackend<D> {
    target: D,
}

impl<D> TftBackend<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }
}

impl<D> DisplayBackend for TftBackend<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        self.target
            .clear(rgb565(color))
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), DisplayError> {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(rgb565(color)))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        size: TextSize,
        fg: Color,
        bg: Color,
    ) -> Result<(), DisplayError> {
        let style = MonoTextStyleBuilder::new()
            .font(font(size))
            .text_color(rgb565(fg))
            .background_color(rgb565(bg))
            .build();

        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        let size = self.target.size();
        (size.width, size.height)
    }
}
