//! 16-bit colors and their wire encodings
//!
//! The SSD1331 works in 65k-color RGB565. Two encodings reach the wire:
//!
//! | Use | Bytes |
//! |-----|-------|
//! | Pixel data (DC high) | raw value, big-endian |
//! | Accelerated drawing commands | three 6-bit channels |
//!
//! For the accelerated commands the controller expects each channel on a
//! 6-bit scale, so the 5-bit red and blue fields are shifted left by one and
//! green passes through:
//!
//! ```
//! use ssd1331::Color;
//!
//! assert_eq!(Color::WHITE.channel_bytes(), [0x3E, 0x3F, 0x3E]);
//! assert_eq!(Color::RED.channel_bytes(), [0x3E, 0x00, 0x00]);
//! assert_eq!(Color::RED.to_be_bytes(), [0xF8, 0x00]);
//! ```

/// An RGB565 color as understood by the SSD1331
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(u16);

impl Color {
    /// All channels off
    pub const BLACK: Self = Self(0x0000);
    /// All channels at full scale
    pub const WHITE: Self = Self(0xFFFF);
    /// Full red
    pub const RED: Self = Self(0xF800);
    /// Full green
    pub const GREEN: Self = Self(0x07E0);
    /// Full blue
    pub const BLUE: Self = Self(0x001F);
    /// Red and green
    pub const YELLOW: Self = Self(0xFFE0);
    /// Green and blue
    pub const CYAN: Self = Self(0x07FF);
    /// Red and blue
    pub const MAGENTA: Self = Self(0xF81F);

    /// Wrap a raw 5-6-5 value
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Build a color from 5-bit red, 6-bit green and 5-bit blue channels
    ///
    /// Out-of-range channel values are masked to their field width.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        let r = (red as u16 & 0x1F) << 11;
        let g = (green as u16 & 0x3F) << 5;
        let b = blue as u16 & 0x1F;
        Self(r | g | b)
    }

    /// Raw 5-6-5 value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Whether every channel is zero
    ///
    /// Black fills use the controller's clear command instead of a drawn rectangle.
    pub const fn is_black(self) -> bool {
        self.0 == 0
    }

    /// Channel bytes for the line and rectangle commands
    ///
    /// Returns `[red, green, blue]`, each on a 6-bit scale.
    pub const fn channel_bytes(self) -> [u8; 3] {
        let c = self.0;
        [
            ((c >> 10) & 0x3E) as u8,
            ((c >> 5) & 0x3F) as u8,
            ((c << 1) & 0x3E) as u8,
        ]
    }

    /// Pixel data bytes for a RAM write
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::pixelcolor::IntoStorage;
        Self(color.into_storage())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::Rgb565 {
    fn from(color: Color) -> Self {
        use embedded_graphics_core::pixelcolor::raw::RawU16;
        Self::from(RawU16::new(color.0))
    }
}
