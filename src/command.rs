//! SSD1331 command definitions
//!
//! This module defines the command bytes understood by the SSD1331 OLED
//! controller, the [`Command`] value type that encodes a command with its
//! operands, and the [`FillStrategy`] that picks the cheapest command for a
//! filled rectangle.
//!
//! ## Command Structure
//!
//! Unlike most controllers, the SSD1331 takes command operands in command
//! mode too. Every command is sent as:
//! 1. Set DC low (command mode)
//! 2. Send opcode and operand bytes
//! 3. Set DC high (data mode)
//!
//! Only pixel data for a RAM write is sent with DC high.
//!
//! ## Example
//!
//! ```
//! use ssd1331::command::{Command, DevicePoint, DRAW_LINE};
//! use ssd1331::Color;
//!
//! let line = Command::DrawLine {
//!     start: DevicePoint::new(0, 0),
//!     end: DevicePoint::new(95, 63),
//!     color: Color::WHITE,
//! };
//! assert_eq!(
//!     line.encode().as_slice(),
//!     &[DRAW_LINE, 0, 0, 95, 63, 0x3E, 0x3F, 0x3E]
//! );
//! ```

use heapless::Vec;

use crate::clip::Area;
use crate::color::Color;

// Addressing commands

/// Set column address command (0x15)
///
/// Sets the column window for RAM writes.
/// Requires 2 bytes: [start, end]
pub const SET_COLUMN: u8 = 0x15;

/// Set row address command (0x75)
///
/// Sets the row window for RAM writes.
/// Requires 2 bytes: [start, end]
pub const SET_ROW: u8 = 0x75;

// Graphic acceleration commands

/// Draw line command (0x21)
///
/// Requires 7 bytes: [col0, row0, col1, row1, red, green, blue]
pub const DRAW_LINE: u8 = 0x21;

/// Draw rectangle command (0x22)
///
/// Draws the outline, and fills the inside when fill mode is enabled.
/// Requires 10 bytes: [col0, row0, col1, row1, border RGB, fill RGB]
pub const DRAW_RECT: u8 = 0x22;

/// Copy command (0x23)
///
/// Copies a window of display RAM to another position.
/// Requires 6 bytes: [col0, row0, col1, row1, dest col, dest row]
pub const COPY: u8 = 0x23;

/// Clear window command (0x25)
///
/// Sets every pixel of a window to zero.
/// Requires 4 bytes: [col0, row0, col1, row1]
pub const CLEAR: u8 = 0x25;

/// Fill mode command (0x26)
///
/// Requires 1 byte, see [`FillMode`].
pub const FILL: u8 = 0x26;

// Panel configuration commands

/// Contrast for color A command (0x81)
pub const CONTRAST_A: u8 = 0x81;

/// Contrast for color B command (0x82)
pub const CONTRAST_B: u8 = 0x82;

/// Contrast for color C command (0x83)
pub const CONTRAST_C: u8 = 0x83;

/// Master current control command (0x87)
///
/// Requires 1 byte: attenuation 0x00..=0x0F
pub const MASTER_CURRENT: u8 = 0x87;

/// Second precharge speed for color A command (0x8A)
pub const PRECHARGE_A: u8 = 0x8A;

/// Second precharge speed for color B command (0x8B)
pub const PRECHARGE_B: u8 = 0x8B;

/// Second precharge speed for color C command (0x8C)
pub const PRECHARGE_C: u8 = 0x8C;

/// Remap and color depth command (0xA0)
///
/// Requires 1 byte combining address increment direction, column and COM
/// remapping, color order and color depth.
/// See [`crate::orientation`].
pub const SET_REMAP: u8 = 0xA0;

/// Display start line command (0xA1)
pub const START_LINE: u8 = 0xA1;

/// Display offset command (0xA2)
pub const DISPLAY_OFFSET: u8 = 0xA2;

/// Normal display mode command (0xA4)
pub const NORMAL_DISPLAY: u8 = 0xA4;

/// Inverse display mode command (0xA7)
pub const INVERT_DISPLAY: u8 = 0xA7;

/// Multiplex ratio command (0xA8)
///
/// Requires 1 byte: number of rows - 1
pub const SET_MULTIPLEX: u8 = 0xA8;

/// Master configuration command (0xAD)
pub const SET_MASTER: u8 = 0xAD;

/// Display off (sleep) command (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on command (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

/// Power save mode command (0xB0)
pub const POWER_MODE: u8 = 0xB0;

/// Phase 1 and 2 period adjustment command (0xB1)
pub const PRECHARGE: u8 = 0xB1;

/// Clock divider and oscillator frequency command (0xB3)
pub const CLOCK_DIV: u8 = 0xB3;

/// Precharge level command (0xBB)
pub const PRECHARGE_LEVEL: u8 = 0xBB;

/// VCOMH level command (0xBE)
pub const VCOMH: u8 = 0xBE;

/// Longest encoded command: draw rectangle
pub const MAX_COMMAND_LEN: usize = 11;

/// Encoded bytes of a single command
pub type Frame = Vec<u8, MAX_COMMAND_LEN>;

/// Operand of the [`FILL`] command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum FillMode {
    /// Rectangles are drawn as outlines, copies are plain
    #[default]
    Outline = 0x00,
    /// Rectangles are filled with the fill color
    Solid = 0x01,
    /// Copies invert the colors of the copied pixels
    ReverseCopy = 0x10,
}

/// A coordinate pair in the order the controller's registers take it
///
/// When the viewport is rotated by 90 or 270 degrees the logical row lands in
/// `col` and the logical column in `row`. See [`crate::orientation::Viewport::device_point`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DevicePoint {
    /// Value sent first
    pub col: u8,
    /// Value sent second
    pub row: u8,
}

impl DevicePoint {
    /// Create a device point
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }
}

/// A single controller command with its operands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Column window, inclusive
    ColumnAddress {
        /// First column
        start: u8,
        /// Last column
        end: u8,
    },
    /// Row window, inclusive
    RowAddress {
        /// First row
        start: u8,
        /// Last row
        end: u8,
    },
    /// Remap control byte
    Remap(u8),
    /// First RAM row shown on the top line
    StartLine(u8),
    /// Vertical display offset
    DisplayOffset(u8),
    /// Inverse (true) or normal (false) display mode
    Invert(bool),
    /// Multiplex ratio
    Multiplex(u8),
    /// Panel on (true) or off (false)
    DisplayOn(bool),
    /// Master configuration byte
    MasterConfig(u8),
    /// Power save mode byte
    PowerMode(u8),
    /// Phase 1 and 2 periods
    PhasePeriod(u8),
    /// Clock divider and oscillator frequency
    ClockDiv(u8),
    /// Second precharge speed for colors A, B and C
    SecondPrecharge([u8; 3]),
    /// Precharge voltage level
    PrechargeLevel(u8),
    /// VCOMH voltage level
    Vcomh(u8),
    /// Master current attenuation
    MasterCurrent(u8),
    /// Contrast for colors A, B and C
    Contrast([u8; 3]),
    /// Fill mode for subsequent rectangles and copies
    Fill(FillMode),
    /// Draw a line between two inclusive endpoints
    DrawLine {
        /// First endpoint
        start: DevicePoint,
        /// Second endpoint
        end: DevicePoint,
        /// Line color
        color: Color,
    },
    /// Draw a rectangle between two inclusive corners
    DrawRect {
        /// Top-left corner
        start: DevicePoint,
        /// Bottom-right corner
        end: DevicePoint,
        /// Outline color
        border: Color,
        /// Fill color, used when fill mode is [`FillMode::Solid`]
        fill: Color,
    },
    /// Copy a window between two inclusive corners to `dest`
    Copy {
        /// Top-left corner of the source
        start: DevicePoint,
        /// Bottom-right corner of the source
        end: DevicePoint,
        /// Top-left corner of the destination
        dest: DevicePoint,
    },
    /// Clear a window between two inclusive corners
    Clear {
        /// Top-left corner
        start: DevicePoint,
        /// Bottom-right corner
        end: DevicePoint,
    },
}

impl Command {
    /// Encode the opcode and operand bytes
    pub fn encode(&self) -> Frame {
        match *self {
            Self::ColumnAddress { start, end } => frame(&[SET_COLUMN, start, end]),
            Self::RowAddress { start, end } => frame(&[SET_ROW, start, end]),
            Self::Remap(value) => frame(&[SET_REMAP, value]),
            Self::StartLine(line) => frame(&[START_LINE, line]),
            Self::DisplayOffset(offset) => frame(&[DISPLAY_OFFSET, offset]),
            Self::Invert(true) => frame(&[INVERT_DISPLAY]),
            Self::Invert(false) => frame(&[NORMAL_DISPLAY]),
            Self::Multiplex(ratio) => frame(&[SET_MULTIPLEX, ratio]),
            Self::DisplayOn(true) => frame(&[DISPLAY_ON]),
            Self::DisplayOn(false) => frame(&[DISPLAY_OFF]),
            Self::MasterConfig(value) => frame(&[SET_MASTER, value]),
            Self::PowerMode(value) => frame(&[POWER_MODE, value]),
            Self::PhasePeriod(value) => frame(&[PRECHARGE, value]),
            Self::ClockDiv(value) => frame(&[CLOCK_DIV, value]),
            Self::SecondPrecharge([a, b, c]) => {
                frame(&[PRECHARGE_A, a, PRECHARGE_B, b, PRECHARGE_C, c])
            }
            Self::PrechargeLevel(value) => frame(&[PRECHARGE_LEVEL, value]),
            Self::Vcomh(value) => frame(&[VCOMH, value]),
            Self::MasterCurrent(value) => frame(&[MASTER_CURRENT, value]),
            Self::Contrast([a, b, c]) => frame(&[CONTRAST_A, a, CONTRAST_B, b, CONTRAST_C, c]),
            Self::Fill(mode) => frame(&[FILL, mode as u8]),
            Self::DrawLine { start, end, color } => {
                let [r, g, b] = color.channel_bytes();
                frame(&[DRAW_LINE, start.col, start.row, end.col, end.row, r, g, b])
            }
            Self::DrawRect {
                start,
                end,
                border,
                fill,
            } => {
                let [br, bg, bb] = border.channel_bytes();
                let [fr, fg, fb] = fill.channel_bytes();
                frame(&[
                    DRAW_RECT, start.col, start.row, end.col, end.row, br, bg, bb, fr, fg, fb,
                ])
            }
            Self::Copy { start, end, dest } => frame(&[
                COPY, start.col, start.row, end.col, end.row, dest.col, dest.row,
            ]),
            Self::Clear { start, end } => frame(&[CLEAR, start.col, start.row, end.col, end.row]),
        }
    }
}

fn frame(bytes: &[u8]) -> Frame {
    // MAX_COMMAND_LEN covers the longest command, so this never truncates
    Frame::from_slice(bytes).unwrap_or_default()
}

/// Commands emitted for one filled rectangle
pub type FillCommands = Vec<Command, 2>;

/// The cheapest command sequence that paints a filled rectangle
///
/// | Strategy | Condition | Bytes on the wire |
/// |----------|-----------|-------------------|
/// | [`Clear`](Self::Clear) | color is black | 5 |
/// | [`Line`](Self::Line) | area is one pixel wide or tall | 8 |
/// | [`Rect`](Self::Rect) | otherwise | 13 |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillStrategy {
    /// Clear window
    Clear,
    /// Draw a line along the strip
    Line,
    /// Enable fill mode and draw a rectangle
    Rect,
}

impl FillStrategy {
    /// Pick the strategy for a committed area
    pub const fn select(area: &Area, color: Color) -> Self {
        if color.is_black() {
            Self::Clear
        } else if area.is_strip() {
            Self::Line
        } else {
            Self::Rect
        }
    }

    /// Commands for the area spanning the inclusive corners `start` and `end`
    pub fn commands(self, start: DevicePoint, end: DevicePoint, color: Color) -> FillCommands {
        let mut commands = FillCommands::new();
        let sequence = match self {
            Self::Clear => [Some(Command::Clear { start, end }), None],
            Self::Line => [Some(Command::DrawLine { start, end, color }), None],
            Self::Rect => [
                Some(Command::Fill(FillMode::Solid)),
                Some(Command::DrawRect {
                    start,
                    end,
                    border: color,
                    fill: color,
                }),
            ],
        };
        // At most two commands, matching the capacity
        commands.extend(sequence.into_iter().flatten());
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: DevicePoint = DevicePoint::new(0, 0);
    const CORNER: DevicePoint = DevicePoint::new(95, 63);

    #[test]
    fn test_address_commands() {
        let col = Command::ColumnAddress { start: 0, end: 95 };
        let row = Command::RowAddress { start: 0, end: 63 };
        assert_eq!(col.encode().as_slice(), &[0x15, 0x00, 0x5F]);
        assert_eq!(row.encode().as_slice(), &[0x75, 0x00, 0x3F]);
    }

    #[test]
    fn test_mode_commands() {
        assert_eq!(Command::DisplayOn(true).encode().as_slice(), &[0xAF]);
        assert_eq!(Command::DisplayOn(false).encode().as_slice(), &[0xAE]);
        assert_eq!(Command::Invert(true).encode().as_slice(), &[0xA7]);
        assert_eq!(Command::Invert(false).encode().as_slice(), &[0xA4]);
        assert_eq!(Command::Remap(0x72).encode().as_slice(), &[0xA0, 0x72]);
        assert_eq!(
            Command::Fill(FillMode::ReverseCopy).encode().as_slice(),
            &[0x26, 0x10]
        );
    }

    #[test]
    fn test_register_triplets() {
        assert_eq!(
            Command::Contrast([0x91, 0x50, 0x7D]).encode().as_slice(),
            &[0x81, 0x91, 0x82, 0x50, 0x83, 0x7D]
        );
        assert_eq!(
            Command::SecondPrecharge([0x64, 0x78, 0x64]).encode().as_slice(),
            &[0x8A, 0x64, 0x8B, 0x78, 0x8C, 0x64]
        );
    }

    #[test]
    fn test_draw_rect_is_longest() {
        let rect = Command::DrawRect {
            start: ORIGIN,
            end: CORNER,
            border: Color::RED,
            fill: Color::BLUE,
        };
        assert_eq!(
            rect.encode().as_slice(),
            &[0x22, 0, 0, 95, 63, 0x3E, 0, 0, 0, 0, 0x3E]
        );
        assert_eq!(rect.encode().len(), MAX_COMMAND_LEN);
    }

    #[test]
    fn test_copy_and_clear() {
        let copy = Command::Copy {
            start: DevicePoint::new(0, 8),
            end: CORNER,
            dest: ORIGIN,
        };
        assert_eq!(copy.encode().as_slice(), &[0x23, 0, 8, 95, 63, 0, 0]);

        let clear = Command::Clear {
            start: ORIGIN,
            end: CORNER,
        };
        assert_eq!(clear.encode().as_slice(), &[0x25, 0, 0, 95, 63]);
    }

    #[test]
    fn test_strategy_selection() {
        let block = Area {
            x0: 0,
            y0: 0,
            x1: 10,
            y1: 10,
        };
        let column = Area {
            x0: 4,
            y0: 0,
            x1: 5,
            y1: 10,
        };
        let row = Area {
            x0: 0,
            y0: 4,
            x1: 10,
            y1: 5,
        };

        assert_eq!(FillStrategy::select(&block, Color::BLACK), FillStrategy::Clear);
        assert_eq!(FillStrategy::select(&column, Color::BLACK), FillStrategy::Clear);
        assert_eq!(FillStrategy::select(&column, Color::RED), FillStrategy::Line);
        assert_eq!(FillStrategy::select(&row, Color::RED), FillStrategy::Line);
        assert_eq!(FillStrategy::select(&block, Color::RED), FillStrategy::Rect);
    }

    #[test]
    fn test_strategy_wire_sizes() {
        let size = |strategy: FillStrategy| -> usize {
            strategy
                .commands(ORIGIN, CORNER, Color::WHITE)
                .iter()
                .map(|command| command.encode().len())
                .sum()
        };
        assert_eq!(size(FillStrategy::Clear), 5);
        assert_eq!(size(FillStrategy::Line), 8);
        assert_eq!(size(FillStrategy::Rect), 13);
    }

    #[test]
    fn test_rect_strategy_paints_border_and_fill_alike() {
        let commands = FillStrategy::Rect.commands(ORIGIN, CORNER, Color::GREEN);
        assert_eq!(commands[0], Command::Fill(FillMode::Solid));
        assert_eq!(
            commands[1],
            Command::DrawRect {
                start: ORIGIN,
                end: CORNER,
                border: Color::GREEN,
                fill: Color::GREEN,
            }
        );
    }
}
