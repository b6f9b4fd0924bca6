//! Busy delays for the controller's accelerated drawing commands
//!
//! Rectangle fills and block copies run inside the controller after the
//! command bytes have been accepted. Sending another command before the
//! controller finishes corrupts the operation in flight, and the SSD1331 has
//! no busy line to poll. The driver instead waits for a time proportional to
//! the number of pixels the command touches.
//!
//! A full-screen operation covers 96 x 64 = 6144 pixels and needs a little
//! over a millisecond; a quarter of a microsecond per pixel gives 1536 us.

use crate::clip::Area;

/// Busy delay in microseconds for an operation touching `width` x `height` pixels
///
/// ```
/// use ssd1331::timing::busy_delay_us;
///
/// assert_eq!(busy_delay_us(96, 64), 1536);
/// assert_eq!(busy_delay_us(1, 3), 0);
/// ```
pub const fn busy_delay_us(width: u32, height: u32) -> u32 {
    width.saturating_mul(height) >> 2
}

/// Busy delay in microseconds for a committed area
pub const fn area_delay_us(area: &Area) -> u32 {
    area.pixel_count() >> 2
}
