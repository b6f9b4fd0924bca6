//! Clipping of drawing requests against the viewport
//!
//! Every drawing request arrives in logical `i32` coordinates and may lie
//! partly or entirely outside the viewport. The functions here either shrink
//! the request to geometry the controller can accept, or reject it by
//! returning `None`. A rejected request must not reach the wire at all.
//!
//! Each request type has its own policy:
//!
//! | Request | Policy |
//! |---------|--------|
//! | Pixel | reject if outside |
//! | Fill | clamp to the viewport, reject if nothing is left |
//! | Line | reject if either endpoint is outside (no partial clipping) |
//! | Outline | reject if the top-left corner is outside, clamp the far corner |
//! | Block copy | shrink until source and destination both fit |
//!
//! ## Example
//!
//! ```
//! use ssd1331::clip::{clip_fill, clip_line, Bounds};
//!
//! let bounds = Bounds::new(96, 64);
//!
//! let area = clip_fill(bounds, -10, 60, 20, 20).unwrap();
//! assert_eq!((area.x0, area.y0, area.x1, area.y1), (0, 60, 10, 64));
//!
//! assert!(clip_line(bounds, -1, 0, 10, 10).is_none());
//! ```

/// Exclusive upper bounds of the logical drawing surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// Logical width in pixels
    pub width: i32,
    /// Logical height in pixels
    pub height: i32,
}

impl Bounds {
    /// Create bounds for a `width` x `height` surface
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
        }
    }

    /// Whether `(x, y)` lies on the surface
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }
}

/// A committed rectangle, half-open on the far edges
///
/// Covers columns `x0..x1` and rows `y0..y1`. Never empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Area {
    /// First column
    pub x0: u8,
    /// First row
    pub y0: u8,
    /// One past the last column
    pub x1: u8,
    /// One past the last row
    pub y1: u8,
}

impl Area {
    /// Width in pixels
    pub const fn width(&self) -> u8 {
        self.x1 - self.x0
    }

    /// Height in pixels
    pub const fn height(&self) -> u8 {
        self.y1 - self.y0
    }

    /// Last covered column
    pub const fn last_x(&self) -> u8 {
        self.x1 - 1
    }

    /// Last covered row
    pub const fn last_y(&self) -> u8 {
        self.y1 - 1
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }

    /// Whether the area is a single pixel wide or tall
    pub const fn is_strip(&self) -> bool {
        self.width() == 1 || self.height() == 1
    }
}

/// A committed line with both endpoints on the surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Start column
    pub x0: u8,
    /// Start row
    pub y0: u8,
    /// End column
    pub x1: u8,
    /// End row
    pub y1: u8,
}

/// A committed block copy
///
/// Both `source` and the equally sized rectangle at `(dest_x, dest_y)` lie
/// entirely on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockCopy {
    /// Region read by the controller
    pub source: Area,
    /// Destination column
    pub dest_x: u8,
    /// Destination row
    pub dest_y: u8,
}

/// Clip a single pixel
pub fn clip_pixel(bounds: Bounds, x: i32, y: i32) -> Option<(u8, u8)> {
    bounds.contains(x, y).then_some((x as u8, y as u8))
}

/// Clip a filled rectangle
///
/// The rectangle is clamped to the surface. Returns `None` if it lies
/// entirely outside or nothing remains after clamping (including negative
/// sizes).
#[allow(clippy::many_single_char_names)]
pub fn clip_fill(bounds: Bounds, x: i32, y: i32, w: i32, h: i32) -> Option<Area> {
    let x1 = x.saturating_add(w);
    let y1 = y.saturating_add(h);

    if x1 <= 0 || x >= bounds.width || y1 <= 0 || y >= bounds.height {
        return None;
    }

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x1.min(bounds.width);
    let y1 = y1.min(bounds.height);

    if x1 - 1 < x0 || y1 - 1 < y0 {
        return None;
    }

    Some(Area {
        x0: x0 as u8,
        y0: y0 as u8,
        x1: x1 as u8,
        y1: y1 as u8,
    })
}

/// Clip a line
///
/// All or nothing: if either endpoint lies off the surface the whole line is
/// rejected. Lines are never shortened to the surface edge.
pub fn clip_line(bounds: Bounds, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<Segment> {
    if !bounds.contains(x0, y0) || !bounds.contains(x1, y1) {
        return None;
    }
    Some(Segment {
        x0: x0 as u8,
        y0: y0 as u8,
        x1: x1 as u8,
        y1: y1 as u8,
    })
}

/// Clip a rectangle outline
///
/// The top-left corner must be on the surface and the size positive. The far
/// corner is clamped to the surface edge on both axes, so an oversized
/// outline loses its right and bottom edges.
#[allow(clippy::many_single_char_names)]
pub fn clip_outline(bounds: Bounds, x: i32, y: i32, w: i32, h: i32) -> Option<Area> {
    if !bounds.contains(x, y) || w <= 0 || h <= 0 {
        return None;
    }
    Some(Area {
        x0: x as u8,
        y0: y as u8,
        x1: x.saturating_add(w).min(bounds.width) as u8,
        y1: y.saturating_add(h).min(bounds.height) as u8,
    })
}

/// Clip a block copy so that source and destination both stay on the surface
///
/// The two rectangles share one size, so any overhang on either side shrinks
/// both. When the start of either rectangle is negative, both starts move
/// forward together and the size shrinks by the same amount.
#[allow(clippy::many_single_char_names)]
pub fn clip_copy(
    bounds: Bounds,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    dest_x: i32,
    dest_y: i32,
) -> Option<BlockCopy> {
    let (x, dest_x, w) = clip_copy_axis(x, dest_x, w, bounds.width)?;
    let (y, dest_y, h) = clip_copy_axis(y, dest_y, h, bounds.height)?;

    Some(BlockCopy {
        source: Area {
            x0: x as u8,
            y0: y as u8,
            x1: (x + w) as u8,
            y1: (y + h) as u8,
        },
        dest_x: dest_x as u8,
        dest_y: dest_y as u8,
    })
}

/// One axis of [`clip_copy`]: returns the adjusted `(source, dest, length)`
///
/// Works in `i64` so that no starting point or length can wrap.
fn clip_copy_axis(source: i32, dest: i32, length: i32, limit: i32) -> Option<(i32, i32, i32)> {
    let mut source = i64::from(source);
    let mut dest = i64::from(dest);
    let mut length = i64::from(length);
    let limit = i64::from(limit);

    let underflow = -source.min(dest);
    if underflow > 0 {
        source += underflow;
        dest += underflow;
        length -= underflow;
    }

    let overflow = source.max(dest) + length - limit;
    if overflow > 0 {
        length -= overflow;
    }

    // Positive length leaves both starts and ends inside 0..=limit
    (length > 0).then_some((source as i32, dest as i32, length as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(96, 64);

    fn area(x0: u8, y0: u8, x1: u8, y1: u8) -> Area {
        Area { x0, y0, x1, y1 }
    }

    #[test]
    fn test_pixel() {
        assert_eq!(clip_pixel(BOUNDS, 0, 0), Some((0, 0)));
        assert_eq!(clip_pixel(BOUNDS, 95, 63), Some((95, 63)));
        assert_eq!(clip_pixel(BOUNDS, 96, 0), None);
        assert_eq!(clip_pixel(BOUNDS, 0, 64), None);
        assert_eq!(clip_pixel(BOUNDS, -1, 5), None);
    }

    #[test]
    fn test_fill_inside_is_unchanged() {
        assert_eq!(clip_fill(BOUNDS, 10, 20, 5, 6), Some(area(10, 20, 15, 26)));
        assert_eq!(clip_fill(BOUNDS, 0, 0, 96, 64), Some(area(0, 0, 96, 64)));
    }

    #[test]
    fn test_fill_clamps_each_edge() {
        assert_eq!(clip_fill(BOUNDS, -5, -5, 10, 10), Some(area(0, 0, 5, 5)));
        assert_eq!(clip_fill(BOUNDS, 90, 60, 10, 10), Some(area(90, 60, 96, 64)));
        assert_eq!(
            clip_fill(BOUNDS, -100, -100, 1000, 1000),
            Some(area(0, 0, 96, 64))
        );
    }

    #[test]
    fn test_fill_entirely_outside() {
        assert_eq!(clip_fill(BOUNDS, -10, 0, 10, 10), None);
        assert_eq!(clip_fill(BOUNDS, 96, 0, 10, 10), None);
        assert_eq!(clip_fill(BOUNDS, 0, -10, 10, 10), None);
        assert_eq!(clip_fill(BOUNDS, 0, 64, 10, 10), None);
    }

    #[test]
    fn test_fill_degenerate() {
        assert_eq!(clip_fill(BOUNDS, 10, 10, 0, 10), None);
        assert_eq!(clip_fill(BOUNDS, 10, 10, 10, 0), None);
        assert_eq!(clip_fill(BOUNDS, 10, 10, -4, 10), None);
        assert_eq!(clip_fill(BOUNDS, 10, 10, 10, -4), None);
    }

    #[test]
    fn test_fill_extreme_values_do_not_overflow() {
        assert_eq!(
            clip_fill(BOUNDS, i32::MIN, i32::MIN, i32::MAX, i32::MAX),
            None
        );
        assert_eq!(
            clip_fill(BOUNDS, 0, 0, i32::MAX, i32::MAX),
            Some(area(0, 0, 96, 64))
        );
    }

    #[test]
    fn test_line_inside() {
        assert_eq!(
            clip_line(BOUNDS, 0, 0, 95, 63),
            Some(Segment {
                x0: 0,
                y0: 0,
                x1: 95,
                y1: 63
            })
        );
    }

    #[test]
    fn test_line_any_endpoint_outside_discards() {
        assert_eq!(clip_line(BOUNDS, -1, 0, 10, 10), None);
        assert_eq!(clip_line(BOUNDS, 0, -1, 10, 10), None);
        assert_eq!(clip_line(BOUNDS, 0, 0, 96, 10), None);
        assert_eq!(clip_line(BOUNDS, 0, 0, 10, 64), None);
        // Mostly visible lines are still dropped
        assert_eq!(clip_line(BOUNDS, 0, 10, 200, 10), None);
    }

    #[test]
    fn test_outline_requires_visible_origin() {
        assert_eq!(clip_outline(BOUNDS, -1, 0, 10, 10), None);
        assert_eq!(clip_outline(BOUNDS, 0, 64, 10, 10), None);
        assert_eq!(clip_outline(BOUNDS, 5, 5, 0, 10), None);
        assert_eq!(clip_outline(BOUNDS, 5, 5, 10, -1), None);
    }

    #[test]
    fn test_outline_clamps_far_corner_on_both_axes() {
        assert_eq!(clip_outline(BOUNDS, 5, 5, 10, 10), Some(area(5, 5, 15, 15)));
        assert_eq!(clip_outline(BOUNDS, 90, 5, 10, 10), Some(area(90, 5, 96, 15)));
        assert_eq!(clip_outline(BOUNDS, 5, 60, 10, 10), Some(area(5, 60, 15, 64)));
        // Exactly reaching the edge is kept as is
        assert_eq!(clip_outline(BOUNDS, 0, 0, 96, 64), Some(area(0, 0, 96, 64)));
    }

    #[test]
    fn test_copy_scroll_up() {
        let copy = clip_copy(BOUNDS, 0, 0, 96, 64, 0, -8).unwrap();
        assert_eq!(copy.source, area(0, 8, 96, 64));
        assert_eq!(copy.source.height(), 56);
        assert_eq!((copy.dest_x, copy.dest_y), (0, 0));
    }

    #[test]
    fn test_copy_scroll_down() {
        let copy = clip_copy(BOUNDS, 0, 0, 96, 64, 0, 8).unwrap();
        assert_eq!(copy.source, area(0, 0, 96, 56));
        assert_eq!((copy.dest_x, copy.dest_y), (0, 8));
    }

    #[test]
    fn test_copy_shift_left_and_right() {
        let left = clip_copy(BOUNDS, 0, 0, 96, 64, -10, 0).unwrap();
        assert_eq!(left.source, area(10, 0, 96, 64));
        assert_eq!(left.dest_x, 0);

        let right = clip_copy(BOUNDS, 0, 0, 96, 64, 10, 0).unwrap();
        assert_eq!(right.source, area(0, 0, 86, 64));
        assert_eq!(right.dest_x, 10);
    }

    #[test]
    fn test_copy_both_rectangles_stay_inside() {
        for (x, y, w, h, dx, dy) in [
            (-20, -20, 50, 50, 60, 30),
            (80, 50, 40, 40, -5, -5),
            (10, 10, 200, 200, 20, 0),
        ] {
            if let Some(copy) = clip_copy(BOUNDS, x, y, w, h, dx, dy) {
                let w = i32::from(copy.source.width());
                let h = i32::from(copy.source.height());
                assert!(i32::from(copy.source.x1) <= 96);
                assert!(i32::from(copy.source.y1) <= 64);
                assert!(i32::from(copy.dest_x) + w <= 96);
                assert!(i32::from(copy.dest_y) + h <= 64);
            }
        }
    }

    #[test]
    fn test_copy_discards_when_nothing_fits() {
        assert_eq!(clip_copy(BOUNDS, 0, 0, 96, 64, 96, 0), None);
        assert_eq!(clip_copy(BOUNDS, 0, 0, 96, 64, 0, -64), None);
        assert_eq!(clip_copy(BOUNDS, 0, 0, 0, 10, 5, 5), None);
        assert_eq!(clip_copy(BOUNDS, 100, 0, 10, 10, 0, 0), None);
    }

    #[test]
    fn test_copy_huge_size_shrinks_to_destination() {
        let copy = clip_copy(BOUNDS, 0, 0, i32::MAX, 10, 5, 0).unwrap();
        assert_eq!(copy.source, area(0, 0, 91, 10));
        assert_eq!(copy.dest_x, 5);

        let copy = clip_copy(BOUNDS, 0, 0, 10, i32::MAX, 0, 7).unwrap();
        assert_eq!(copy.source, area(0, 0, 10, 57));
        assert_eq!(copy.dest_y, 7);

        let copy = clip_copy(BOUNDS, i32::MIN, 0, i32::MAX, 10, 0, 0);
        assert_eq!(copy, None);
    }

    #[test]
    fn test_area_helpers() {
        let a = area(2, 3, 7, 4);
        assert_eq!(a.width(), 5);
        assert_eq!(a.height(), 1);
        assert_eq!(a.last_x(), 6);
        assert_eq!(a.last_y(), 3);
        assert_eq!(a.pixel_count(), 5);
        assert!(a.is_strip());
        assert!(!area(0, 0, 2, 2).is_strip());
    }
}
