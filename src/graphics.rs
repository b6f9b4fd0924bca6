//! Graphics support via embedded-graphics
//!
//! [`Display`] implements [`DrawTarget`] with [`Rgb565`] colors, so every
//! embedded-graphics primitive, font and image can be drawn straight to the
//! panel. There is no framebuffer: each pixel goes over the wire as it is drawn.
//!
//! The defaults of [`DrawTarget`] push one pixel at a time. These methods are
//! overridden to use cheaper paths:
//!
//! | Method | Path |
//! |--------|------|
//! | `fill_solid` | accelerated rectangle fill ([`Display::fill_rect`]) |
//! | `clear` | accelerated full-screen fill ([`Display::fill_screen`]) |
//! | `fill_contiguous` | one address window plus streamed pixel data ([`Display::write_pixels`]) |
//!
//! All of them share one write session per call.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use ssd1331::{Builder, Display, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let interface = Interface::new(MockSpi, MockPin, MockPin);
//! let mut display = Display::new(interface, MockDelay, config);
//! let _ = display.init();
//!
//! let _ = display.clear(Rgb565::BLACK);
//!
//! let _ = Rectangle::new(Point::new(4, 4), Size::new(40, 20))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(60, 20), 30)
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb565::YELLOW, 1))
//!     .draw(&mut display);
//!
//! let style = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
//! let _ = Text::new("Hello", Point::new(4, 50), style).draw(&mut display);
//! ```

use embedded_graphics_core::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PointsIter, Rectangle},
};
use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

impl<I, D> DrawTarget for Display<I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.session(|display| {
            for Pixel(point, color) in pixels {
                display.set_pixel(point.x, point.y, color.into())?;
            }
            Ok(())
        })
    }

    fn fill_contiguous<C>(&mut self, area: &Rectangle, colors: C) -> Result<(), Self::Error>
    where
        C: IntoIterator<Item = Self::Color>,
    {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }

        if drawable_area == *area {
            return self.write_pixels(
                area.top_left.x,
                area.top_left.y,
                area.size.width as i32,
                area.size.height as i32,
                colors.into_iter().map(Color::from),
            );
        }

        // Partly off-screen: per pixel, letting set_pixel drop the overhang
        self.draw_iter(
            area.points()
                .zip(colors)
                .map(|(point, color)| Pixel(point, color)),
        )
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }

        let Point { x, y } = drawable_area.top_left;
        self.fill_rect(
            x,
            y,
            drawable_area.size.width as i32,
            drawable_area.size.height as i32,
            color.into(),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color.into())
    }
}

impl<I, D> OriginDimensions for Display<I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rotation;
    use crate::mock::{self, Event};
    use embedded_graphics::primitives::{Line, Primitive, PrimitiveStyle};

    fn ready_display() -> mock::MockDisplay {
        let mut display = mock::display();
        display.init().unwrap();
        mock::clear(&mut display);
        display
    }

    #[test]
    fn test_size_follows_rotation() {
        let mut display = ready_display();
        assert_eq!(display.size(), Size::new(96, 64));

        display.set_rotation(Rotation::Rotate270).unwrap();
        assert_eq!(display.size(), Size::new(64, 96));
    }

    #[test]
    fn test_clear_uses_clear_command() {
        let mut display = ready_display();
        display.clear(Rgb565::BLACK).unwrap();

        assert_eq!(
            display.interface_mut().command_bytes(),
            [0x25, 0x00, 0x00, 0x5F, 0x3F]
        );
    }

    #[test]
    fn test_filled_rectangle_uses_accelerated_fill() {
        let mut display = ready_display();
        Rectangle::new(Point::new(90, 60), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut display)
            .unwrap();

        assert_eq!(
            display.interface_mut().command_bytes(),
            [0x26, 0x01, 0x22, 90, 60, 95, 63, 0x3E, 0, 0, 0x3E, 0, 0]
        );
        assert!(display.interface_mut().data_bytes().is_empty());
    }

    #[test]
    fn test_fill_solid_off_screen_sends_nothing() {
        let mut display = ready_display();
        display
            .fill_solid(
                &Rectangle::new(Point::new(-20, -20), Size::new(10, 10)),
                Rgb565::WHITE,
            )
            .unwrap();
        assert!(display.interface_mut().events.is_empty());
    }

    #[test]
    fn test_fill_contiguous_inside_streams_once() {
        let mut display = ready_display();
        let area = Rectangle::new(Point::new(2, 3), Size::new(4, 2));
        display
            .fill_contiguous(&area, core::iter::repeat(Rgb565::GREEN))
            .unwrap();

        let interface = display.interface_mut();
        assert_eq!(interface.command_bytes(), [0x15, 2, 5, 0x75, 3, 4]);
        assert_eq!(interface.data_bytes().len(), 16);
        assert_eq!(interface.count(&Event::Acquire), 1);
    }

    #[test]
    fn test_fill_contiguous_partly_outside_drops_overhang() {
        let mut display = ready_display();
        let area = Rectangle::new(Point::new(94, 0), Size::new(4, 1));
        display
            .fill_contiguous(&area, core::iter::repeat(Rgb565::WHITE))
            .unwrap();

        let interface = display.interface_mut();
        // Two of the four pixels are on screen
        assert_eq!(interface.data_bytes(), [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(
            interface.command_bytes(),
            [0x15, 94, 94, 0x75, 0, 0, 0x15, 95, 95, 0x75, 0, 0]
        );
        assert_eq!(interface.count(&Event::Acquire), 1);
    }

    #[test]
    fn test_stroked_line_draws_pixels_in_one_session() {
        let mut display = ready_display();
        Line::new(Point::new(0, 0), Point::new(3, 0))
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::BLUE, 1))
            .draw(&mut display)
            .unwrap();

        let interface = display.interface_mut();
        assert_eq!(interface.data_bytes().len(), 8);
        assert_eq!(interface.count(&Event::Acquire), 1);
        assert_eq!(interface.count(&Event::Release), 1);
    }
}
