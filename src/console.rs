//! Scrolling text console
//!
//! [`Console`] prints monospaced text with a cursor, wrapping at the right
//! edge and scrolling the panel contents up with the controller's copy
//! command when the cursor runs off the bottom. Nothing is buffered on the
//! host side.
//!
//! ```rust,no_run
//! use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
//! use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
//! use ssd1331::{Console, Display, DisplayInterface};
//!
//! fn log_line<I: DisplayInterface, D: embedded_hal::delay::DelayNs>(
//!     display: &mut Display<I, D>,
//! ) -> Result<(), ssd1331::Error<I>> {
//!     let mut console = Console::new(MonoTextStyle::new(&FONT_6X10, Rgb565::GREEN));
//!     console.write_str(display, "boot ok\n")?;
//!     console.write_str(display, "link up\n")
//! }
//! ```

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal::delay::DelayNs;
use log::trace;

use crate::color::Color;
use crate::display::{Display, DisplayResult};
use crate::interface::DisplayInterface;

/// Cursor-based text output on a [`Display`]
#[derive(Clone, Copy, Debug)]
pub struct Console<'a> {
    style: MonoTextStyle<'a, Rgb565>,
    cursor: Point,
    scroll: bool,
    wrap: bool,
}

impl<'a> Console<'a> {
    /// Create a console at the top-left corner with scrolling and wrapping on
    pub fn new(style: MonoTextStyle<'a, Rgb565>) -> Self {
        Self {
            style,
            cursor: Point::zero(),
            scroll: true,
            wrap: true,
        }
    }

    /// Enable or disable scrolling at the bottom edge
    pub fn set_scroll(&mut self, scroll: bool) {
        self.scroll = scroll;
    }

    /// Enable or disable wrapping at the right edge
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Top-left corner of the next glyph
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, cursor: Point) {
        self.cursor = cursor;
    }

    /// Height of one text line in pixels
    pub fn line_height(&self) -> i32 {
        self.style.font.character_size.height as i32
    }

    fn advance(&self) -> i32 {
        (self.style.font.character_size.width + self.style.font.character_spacing) as i32
    }

    /// Clear the panel and move the cursor home
    pub fn clear<I, D>(&mut self, display: &mut Display<I, D>) -> DisplayResult<I>
    where
        I: DisplayInterface,
        D: DelayNs,
    {
        self.cursor = Point::zero();
        display.fill_screen(Color::BLACK)
    }

    /// Print one character
    ///
    /// `'\n'` starts a new line and `'\r'` is ignored.
    pub fn write_char<I, D>(&mut self, display: &mut Display<I, D>, c: char) -> DisplayResult<I>
    where
        I: DisplayInterface,
        D: DelayNs,
    {
        display.session(|display| self.put_char(display, c))
    }

    /// Print a string in one write session
    pub fn write_str<I, D>(&mut self, display: &mut Display<I, D>, s: &str) -> DisplayResult<I>
    where
        I: DisplayInterface,
        D: DelayNs,
    {
        display.session(|display| s.chars().try_for_each(|c| self.put_char(display, c)))
    }

    fn put_char<I, D>(&mut self, display: &mut Display<I, D>, c: char) -> DisplayResult<I>
    where
        I: DisplayInterface,
        D: DelayNs,
    {
        match c {
            '\n' => {
                self.new_line();
                return Ok(());
            }
            '\r' => return Ok(()),
            _ => {}
        }

        let width = i32::from(display.width());
        if self.wrap && self.cursor.x + self.advance() > width {
            self.new_line();
        }
        self.scroll_into_view(display)?;

        let mut buf = [0u8; 4];
        let glyph = c.encode_utf8(&mut buf);
        Text::with_baseline(glyph, self.cursor, self.style, Baseline::Top).draw(display)?;
        self.cursor.x += self.advance();
        Ok(())
    }

    fn new_line(&mut self) {
        self.cursor.x = 0;
        self.cursor.y += self.line_height();
    }

    fn scroll_into_view<I, D>(&mut self, display: &mut Display<I, D>) -> DisplayResult<I>
    where
        I: DisplayInterface,
        D: DelayNs,
    {
        let line_height = self.line_height();
        let height = i32::from(display.height());
        if !self.scroll || self.cursor.y + line_height < height {
            return Ok(());
        }
        // A cursor far below the edge needs several lines at once
        let lines = (self.cursor.y + line_height - height) / line_height + 1;
        let shift = lines * line_height;
        trace!("ssd1331: console scrolling {shift} rows");
        display.scroll_up(shift)?;
        self.cursor.y -= shift;
        Ok(())
    }
}
