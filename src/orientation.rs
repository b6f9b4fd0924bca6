//! Orientation mapping
//!
//! The SSD1331 handles rotation itself: a single remap control byte selects
//! the address increment direction, column and COM scan direction, and the
//! color channel order. The driver only has to:
//!
//! - report swapped width and height for 90 and 270 degree rotations,
//! - write coordinate pairs in swapped order for those rotations,
//! - send the remap byte when the rotation changes.
//!
//! ## Remap Byte
//!
//! The byte is the color-order bits OR the rotation bits:
//!
//! | Part | Value |
//! |------|-------|
//! | RGB order | `0b0110_0000` |
//! | BGR order | `0b0110_0100` |
//! | Rotate 0 | `0b0001_0010` |
//! | Rotate 90 | `0b0000_0011` |
//! | Rotate 180 | `0b0000_0000` |
//! | Rotate 270 | `0b0001_0001` |
//!
//! ## Example
//!
//! ```
//! use ssd1331::orientation::Viewport;
//! use ssd1331::{ColorOrder, Dimensions, Rotation};
//!
//! let mut viewport = Viewport::new(Dimensions::FULL, ColorOrder::Rgb);
//! assert_eq!((viewport.width(), viewport.height()), (96, 64));
//! assert_eq!(viewport.remap_byte(), 0x72);
//!
//! viewport.set_rotation(Rotation::Rotate90);
//! assert_eq!((viewport.width(), viewport.height()), (64, 96));
//! assert_eq!(viewport.remap_byte(), 0x63);
//! ```

use crate::clip::{Area, Bounds};
use crate::command::{Command, DevicePoint};
use crate::config::{ColorOrder, Dimensions, Rotation};

/// Remap bits selecting RGB channel order (65k color depth, COM split)
pub const REMAP_RGB_BITS: u8 = 0b0110_0000;

/// Remap bits selecting BGR channel order (65k color depth, COM split)
pub const REMAP_BGR_BITS: u8 = 0b0110_0100;

/// Remap bits for each rotation, indexed by [`Rotation::index`]
pub const REMAP_ROTATION_BITS: [u8; 4] = [0b0001_0010, 0b0000_0011, 0b0000_0000, 0b0001_0001];

/// Logical drawing surface: panel size, rotation and color order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    base: Dimensions,
    rotation: Rotation,
    color_order: ColorOrder,
}

impl Viewport {
    /// Create an unrotated viewport over a panel
    pub const fn new(base: Dimensions, color_order: ColorOrder) -> Self {
        Self {
            base,
            rotation: Rotation::Rotate0,
            color_order,
        }
    }

    /// Change the rotation
    ///
    /// Only updates the mapping; the caller sends [`Self::remap_command`].
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Current rotation
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Color channel order
    pub const fn color_order(&self) -> ColorOrder {
        self.color_order
    }

    /// Panel dimensions in native orientation
    pub const fn base(&self) -> Dimensions {
        self.base
    }

    /// Whether coordinate pairs are written in swapped order
    pub const fn swap_axes(&self) -> bool {
        self.rotation.swaps_axes()
    }

    /// Logical width in pixels
    pub const fn width(&self) -> u16 {
        if self.swap_axes() {
            self.base.rows
        } else {
            self.base.cols
        }
    }

    /// Logical height in pixels
    pub const fn height(&self) -> u16 {
        if self.swap_axes() {
            self.base.cols
        } else {
            self.base.rows
        }
    }

    /// Clip bounds of the logical surface
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.width(), self.height())
    }

    /// Remap control byte for the current rotation and color order
    pub const fn remap_byte(&self) -> u8 {
        let color_bits = match self.color_order {
            ColorOrder::Rgb => REMAP_RGB_BITS,
            ColorOrder::Bgr => REMAP_BGR_BITS,
        };
        color_bits | REMAP_ROTATION_BITS[self.rotation.index() as usize]
    }

    /// Command that applies the current rotation and color order
    pub const fn remap_command(&self) -> Command {
        Command::Remap(self.remap_byte())
    }

    /// Map a logical coordinate to register order
    pub const fn device_point(&self, x: u8, y: u8) -> DevicePoint {
        if self.swap_axes() {
            DevicePoint::new(y, x)
        } else {
            DevicePoint::new(x, y)
        }
    }

    /// Address window commands covering `area`
    ///
    /// The logical column range goes first. Without rotation it lands in the
    /// column register; when axes are swapped it lands in the row register.
    pub const fn address_window(&self, area: &Area) -> [Command; 2] {
        let columns = (area.x0, area.last_x());
        let rows = (area.y0, area.last_y());
        if self.swap_axes() {
            [
                Command::RowAddress {
                    start: columns.0,
                    end: columns.1,
                },
                Command::ColumnAddress {
                    start: rows.0,
                    end: rows.1,
                },
            ]
        } else {
            [
                Command::ColumnAddress {
                    start: columns.0,
                    end: columns.1,
                },
                Command::RowAddress {
                    start: rows.0,
                    end: rows.1,
                },
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::Rotate0,
        Rotation::Rotate90,
        Rotation::Rotate180,
        Rotation::Rotate270,
    ];

    fn viewport(rotation: Rotation, order: ColorOrder) -> Viewport {
        let mut viewport = Viewport::new(Dimensions::FULL, order);
        viewport.set_rotation(rotation);
        viewport
    }

    #[test]
    fn test_dimensions_swap_on_odd_rotation() {
        for rotation in ROTATIONS {
            let v = viewport(rotation, ColorOrder::Rgb);
            if rotation.index() % 2 == 0 {
                assert_eq!((v.width(), v.height()), (96, 64));
            } else {
                assert_eq!((v.width(), v.height()), (64, 96));
            }
        }
    }

    #[test]
    fn test_remap_bytes_rgb() {
        let bytes = ROTATIONS.map(|r| viewport(r, ColorOrder::Rgb).remap_byte());
        assert_eq!(bytes, [0x72, 0x63, 0x60, 0x71]);
    }

    #[test]
    fn test_remap_bytes_bgr() {
        let bytes = ROTATIONS.map(|r| viewport(r, ColorOrder::Bgr).remap_byte());
        assert_eq!(bytes, [0x76, 0x67, 0x64, 0x75]);
    }

    #[test]
    fn test_set_rotation_is_idempotent() {
        let mut once = Viewport::new(Dimensions::FULL, ColorOrder::Rgb);
        once.set_rotation(Rotation::Rotate270);
        let mut twice = once;
        twice.set_rotation(Rotation::Rotate270);
        assert_eq!(once, twice);
        assert_eq!(once.remap_byte(), twice.remap_byte());
    }

    #[test]
    fn test_device_point_swaps() {
        assert_eq!(
            viewport(Rotation::Rotate0, ColorOrder::Rgb).device_point(3, 7),
            DevicePoint::new(3, 7)
        );
        assert_eq!(
            viewport(Rotation::Rotate90, ColorOrder::Rgb).device_point(3, 7),
            DevicePoint::new(7, 3)
        );
        assert_eq!(
            viewport(Rotation::Rotate180, ColorOrder::Rgb).device_point(3, 7),
            DevicePoint::new(3, 7)
        );
        assert_eq!(
            viewport(Rotation::Rotate270, ColorOrder::Rgb).device_point(3, 7),
            DevicePoint::new(7, 3)
        );
    }

    #[test]
    fn test_address_window_order() {
        let area = Area {
            x0: 0,
            y0: 0,
            x1: 96,
            y1: 64,
        };
        assert_eq!(
            viewport(Rotation::Rotate0, ColorOrder::Rgb).address_window(&area),
            [
                Command::ColumnAddress { start: 0, end: 95 },
                Command::RowAddress { start: 0, end: 63 },
            ]
        );
        assert_eq!(
            viewport(Rotation::Rotate90, ColorOrder::Rgb).address_window(&area),
            [
                Command::RowAddress { start: 0, end: 95 },
                Command::ColumnAddress { start: 0, end: 63 },
            ]
        );
    }

    #[test]
    fn test_bounds_follow_rotation() {
        assert_eq!(
            viewport(Rotation::Rotate90, ColorOrder::Rgb).bounds(),
            Bounds::new(64, 96)
        );
    }
}
