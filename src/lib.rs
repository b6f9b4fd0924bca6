//! SSD1331 Color OLED Driver
//!
//! A driver for the SSD1331 controller found on 96x64 16-bit color OLED
//! modules. Instead of pushing every pixel, shapes are drawn with the
//! controller's built-in line, rectangle, clear and copy commands.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support, over an `SpiDevice` or a raw `SpiBus`
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Hardware-accelerated lines, rectangles and fills
//! - Rotation and RGB/BGR panel support
//! - Block copy, scrolling and a text console (with `extras` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1331::{Builder, Color, Display, Interface, Rotation};
//!
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
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst);
//! let config = match Builder::new().rotation(Rotation::Rotate0).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, delay, config);
//! let _ = display.init();
//! let _ = display.fill_screen(Color::BLACK);
//! let _ = display.fill_rect(10, 10, 40, 20, Color::RED);
//! let _ = display.draw_line(0, 63, 95, 0, Color::WHITE);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Viewport clipping of drawing requests
pub mod clip;
/// 16-bit colors and their wire encodings
pub mod color;
/// SSD1331 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Rotation and color order mapping
pub mod orientation;
/// Busy delays for accelerated commands
pub mod timing;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

/// Scrolling text console (requires `extras` feature)
#[cfg(feature = "extras")]
pub mod console;

#[cfg(test)]
mod mock;

pub use color::Color;
pub use config::{
    Builder, ColorOrder, Config, Dimensions, MAX_COLS, MAX_MASTER_CURRENT, MAX_ROWS, Rotation,
};
pub use display::{Display, DisplayResult};
pub use error::{BuilderError, Error};
pub use interface::{BusInterface, DisplayInterface, Interface, InterfaceError};
pub use orientation::Viewport;

#[cfg(feature = "extras")]
pub use console::Console;
