//! Core display operations
//!
//! [`Display`] turns drawing requests into SSD1331 commands. Every request
//! goes through the same pipeline:
//!
//! 1. clip against the viewport ([`crate::clip`]), dropping it if nothing is left
//! 2. map logical coordinates to register order ([`crate::orientation`])
//! 3. encode and send the commands inside one command-mode transaction
//! 4. wait for the controller if the command keeps it busy ([`crate::timing`])
//!
//! Dropped requests never touch the transport.
//!
//! ## Write Sessions
//!
//! Each drawing operation runs inside a write session. Sessions nest: wrap a
//! batch of operations in [`Display::session`] (or a manual
//! [`begin_write`](Display::begin_write) / [`end_write`](Display::end_write)
//! pair) and the transport is acquired once for the whole batch.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use log::{debug, trace, warn};

use crate::clip::{self, Area};
use crate::color::Color;
use crate::command::{Command, FillMode, FillStrategy};
use crate::config::{Config, MAX_MASTER_CURRENT, Rotation};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::orientation::Viewport;
use crate::timing;

/// Result of a display operation
pub type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Bytes batched before a command-mode write reaches the transport
const COMMAND_BUF_LEN: usize = 32;

/// Pixels encoded per data write in [`Display::write_pixels`]
const PIXEL_CHUNK: usize = 32;

/// Driver for an SSD1331 panel
///
/// Owns the transport and the delay provider. For `embedded-graphics`
/// support enable the `graphics` feature, which implements `DrawTarget`
/// for this type.
pub struct Display<I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    /// Hardware interface
    interface: I,
    /// Delay provider for reset and busy waits
    delay: D,
    /// Display configuration
    config: Config,
    /// Rotation and color order currently in effect
    viewport: Viewport,
    /// Open write sessions
    session_depth: usize,
    /// Encoded commands waiting for the transport
    command_buf: Vec<u8, COMMAND_BUF_LEN>,
}

impl<I, D> Display<I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(interface: I, delay: D, config: Config) -> Self {
        let viewport = Viewport::new(config.dimensions, config.color_order);
        Self {
            interface,
            delay,
            config,
            viewport,
            session_depth: 0,
            command_buf: Vec::new(),
        }
    }

    /// Hardware reset followed by the init sequence
    ///
    /// Applies the configured rotation and switches the panel on.
    pub fn init(&mut self) -> DisplayResult<I> {
        debug!(
            "ssd1331: init {}x{} panel, rotation {:?}, {:?} order",
            self.config.dimensions.cols,
            self.config.dimensions.rows,
            self.config.rotation,
            self.config.color_order
        );
        self.interface.reset(&mut self.delay);
        self.viewport.set_rotation(self.config.rotation);

        let config = &self.config;
        let sequence = [
            Command::DisplayOn(false),
            self.viewport.remap_command(),
            Command::StartLine(0),
            Command::DisplayOffset(0),
            Command::Invert(false),
            Command::Multiplex(config.multiplex_ratio()),
            Command::MasterConfig(config.master_config),
            Command::PowerMode(config.power_mode),
            Command::PhasePeriod(config.phase_period),
            Command::ClockDiv(config.clock_div),
            Command::SecondPrecharge(config.second_precharge),
            Command::PrechargeLevel(config.precharge_level),
            Command::Vcomh(config.vcomh),
            Command::MasterCurrent(config.master_current),
            Command::Contrast(config.contrast),
            Command::DisplayOn(true),
        ];
        self.session(|display| display.send_commands(&sequence))
    }

    /// Consume the driver and return the interface and delay
    pub fn release(self) -> (I, D) {
        (self.interface, self.delay)
    }

    /// Open a write session
    ///
    /// Only the outermost call acquires the transport.
    pub fn begin_write(&mut self) -> DisplayResult<I> {
        if self.session_depth == 0 {
            self.interface.acquire().map_err(Error::Interface)?;
        }
        self.session_depth = match self.session_depth.checked_add(1) {
            Some(depth) => depth,
            None => {
                warn!("ssd1331: write session depth saturated");
                usize::MAX
            }
        };
        Ok(())
    }

    /// Close a write session
    ///
    /// Only the outermost call releases the transport. Calling this without a
    /// matching [`begin_write`](Self::begin_write) does nothing.
    pub fn end_write(&mut self) -> DisplayResult<I> {
        match self.session_depth {
            0 => {
                warn!("ssd1331: end_write without a matching begin_write");
                Ok(())
            }
            1 => {
                self.session_depth = 0;
                self.interface.release().map_err(Error::Interface)
            }
            _ => {
                self.session_depth -= 1;
                Ok(())
            }
        }
    }

    /// Run `f` inside one write session
    ///
    /// The session is closed even if `f` fails. The first error wins.
    ///
    /// ```rust,no_run
    /// # use ssd1331::{Color, Display, DisplayInterface};
    /// # fn demo<I: DisplayInterface, D: embedded_hal::delay::DelayNs>(
    /// #     display: &mut Display<I, D>,
    /// # ) -> Result<(), ssd1331::Error<I>> {
    /// display.session(|display| {
    ///     display.fill_rect(0, 0, 48, 32, Color::RED)?;
    ///     display.fill_rect(48, 32, 48, 32, Color::BLUE)
    /// })
    /// # }
    /// ```
    pub fn session<T, F>(&mut self, f: F) -> Result<T, Error<I>>
    where
        F: FnOnce(&mut Self) -> Result<T, Error<I>>,
    {
        self.begin_write()?;
        let result = f(self);
        let ended = self.end_write();
        let value = result?;
        ended?;
        Ok(value)
    }

    /// Set the RAM address window for a following pixel data write
    ///
    /// The window is clipped to the viewport; an empty window sends nothing.
    #[allow(clippy::many_single_char_names)]
    pub fn set_addr_window(&mut self, x: i32, y: i32, w: i32, h: i32) -> DisplayResult<I> {
        let Some(area) = clip::clip_fill(self.viewport.bounds(), x, y, w, h) else {
            trace!("ssd1331: address window ({x}, {y}) {w}x{h} is empty, skipped");
            return Ok(());
        };
        self.session(|display| display.send_address_window(&area))
    }

    /// Write one pixel through the address window and pixel data
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> DisplayResult<I> {
        let Some((x, y)) = clip::clip_pixel(self.viewport.bounds(), x, y) else {
            trace!("ssd1331: pixel ({x}, {y}) outside viewport, skipped");
            return Ok(());
        };
        let area = Area {
            x0: x,
            y0: y,
            x1: x + 1,
            y1: y + 1,
        };
        self.session(|display| {
            display.send_address_window(&area)?;
            display.write_data(&color.to_be_bytes())
        })
    }

    /// Stream pixels into the `w` x `h` rectangle at `(x, y)`
    ///
    /// Colors fill the rectangle row by row. The rectangle must lie entirely
    /// on the viewport, otherwise nothing is sent. Extra colors are ignored;
    /// a short iterator leaves the rest of the rectangle unchanged.
    #[allow(clippy::many_single_char_names)]
    pub fn write_pixels<C>(&mut self, x: i32, y: i32, w: i32, h: i32, colors: C) -> DisplayResult<I>
    where
        C: IntoIterator<Item = Color>,
    {
        let area = clip::clip_fill(self.viewport.bounds(), x, y, w, h).filter(|area| {
            i32::from(area.x0) == x
                && i32::from(area.y0) == y
                && i32::from(area.width()) == w
                && i32::from(area.height()) == h
        });
        let Some(area) = area else {
            trace!("ssd1331: pixel block ({x}, {y}) {w}x{h} not inside viewport, skipped");
            return Ok(());
        };

        self.session(|display| {
            display.send_address_window(&area)?;
            let mut colors = colors.into_iter().take(area.pixel_count() as usize);
            let mut chunk = [0u8; PIXEL_CHUNK * 2];
            loop {
                let mut len = 0;
                for (slot, color) in chunk.chunks_exact_mut(2).zip(colors.by_ref()) {
                    slot.copy_from_slice(&color.to_be_bytes());
                    len += 2;
                }
                if len == 0 {
                    return Ok(());
                }
                display.write_data(&chunk[..len])?;
            }
        })
    }

    /// Draw a line with the controller's line command
    ///
    /// Both endpoints are inclusive. The line is dropped entirely if either
    /// endpoint lies outside the viewport.
    pub fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    ) -> DisplayResult<I> {
        let Some(segment) = clip::clip_line(self.viewport.bounds(), x0, y0, x1, y1) else {
            trace!("ssd1331: line ({x0}, {y0}) -> ({x1}, {y1}) leaves viewport, skipped");
            return Ok(());
        };
        let command = Command::DrawLine {
            start: self.viewport.device_point(segment.x0, segment.y0),
            end: self.viewport.device_point(segment.x1, segment.y1),
            color,
        };
        self.session(|display| display.send_commands(&[command]))
    }

    /// Horizontal line from `(x, y)` to `(x + w, y)`
    pub fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, color: Color) -> DisplayResult<I> {
        self.draw_line(x, y, x.saturating_add(w), y, color)
    }

    /// Vertical line from `(x, y)` to `(x, y + h)`
    pub fn draw_fast_vline(&mut self, x: i32, y: i32, h: i32, color: Color) -> DisplayResult<I> {
        self.draw_line(x, y, x, y.saturating_add(h), color)
    }

    /// Draw a rectangle outline
    ///
    /// The top-left corner must be on the viewport. An outline reaching past
    /// the right or bottom edge loses that edge.
    #[allow(clippy::many_single_char_names)]
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) -> DisplayResult<I> {
        let Some(area) = clip::clip_outline(self.viewport.bounds(), x, y, w, h) else {
            trace!("ssd1331: outline ({x}, {y}) {w}x{h} not drawable, skipped");
            return Ok(());
        };
        let commands = [
            Command::Fill(FillMode::Outline),
            Command::DrawRect {
                start: self.viewport.device_point(area.x0, area.y0),
                end: self.viewport.device_point(area.last_x(), area.last_y()),
                border: color,
                fill: color,
            },
        ];
        self.session(|display| display.send_commands(&commands))
    }

    /// Fill a rectangle with one color
    ///
    /// The rectangle is clamped to the viewport. Black uses the clear
    /// command, a one pixel strip uses the line command, anything else the
    /// filled rectangle command. Waits for the controller afterwards.
    #[allow(clippy::many_single_char_names)]
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) -> DisplayResult<I> {
        let Some(area) = clip::clip_fill(self.viewport.bounds(), x, y, w, h) else {
            trace!("ssd1331: fill ({x}, {y}) {w}x{h} outside viewport, skipped");
            return Ok(());
        };
        let strategy = FillStrategy::select(&area, color);
        let commands = strategy.commands(
            self.viewport.device_point(area.x0, area.y0),
            self.viewport.device_point(area.last_x(), area.last_y()),
            color,
        );
        self.session(|display| {
            display.send_commands(&commands)?;
            display.busy_wait(&area);
            Ok(())
        })
    }

    /// Fill the whole viewport with one color
    pub fn fill_screen(&mut self, color: Color) -> DisplayResult<I> {
        let bounds = self.viewport.bounds();
        self.fill_rect(0, 0, bounds.width, bounds.height, color)
    }

    /// Switch the panel on or off
    ///
    /// Display RAM is kept while the panel is off.
    pub fn enable_display(&mut self, enable: bool) -> DisplayResult<I> {
        debug!("ssd1331: display {}", if enable { "on" } else { "off" });
        self.session(|display| display.send_commands(&[Command::DisplayOn(enable)]))
    }

    /// Show the panel inverted or normal
    pub fn invert_display(&mut self, invert: bool) -> DisplayResult<I> {
        debug!("ssd1331: invert {invert}");
        self.session(|display| display.send_commands(&[Command::Invert(invert)]))
    }

    /// Change the rotation and send the remap byte
    ///
    /// Accepts a [`Rotation`] or a raw `u8`, of which only the low two bits
    /// count. Display RAM is not redrawn.
    pub fn set_rotation<R: Into<Rotation>>(&mut self, rotation: R) -> DisplayResult<I> {
        let rotation = rotation.into();
        self.viewport.set_rotation(rotation);
        debug!(
            "ssd1331: rotation {:?}, {}x{}, remap {:#04x}",
            rotation,
            self.viewport.width(),
            self.viewport.height(),
            self.viewport.remap_byte()
        );
        let command = self.viewport.remap_command();
        self.session(|display| display.send_commands(&[command]))
    }

    /// Set the contrast of color channels A, B and C
    pub fn set_contrast(&mut self, a: u8, b: u8, c: u8) -> DisplayResult<I> {
        self.config.contrast = [a, b, c];
        self.session(|display| display.send_commands(&[Command::Contrast([a, b, c])]))
    }

    /// Set the master current attenuation
    ///
    /// Values above [`MAX_MASTER_CURRENT`] are clamped.
    pub fn set_master_current(&mut self, level: u8) -> DisplayResult<I> {
        let level = level.min(MAX_MASTER_CURRENT);
        self.config.master_current = level;
        self.session(|display| display.send_commands(&[Command::MasterCurrent(level)]))
    }

    /// Copy a block of display RAM to `(dx, dy)`
    ///
    /// Source and destination are shrunk together until both fit on the
    /// viewport. With `invert` set the copied pixels are color-inverted.
    /// Waits for the controller afterwards.
    #[cfg(feature = "extras")]
    #[allow(clippy::many_single_char_names)]
    pub fn copy_bits(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        dx: i32,
        dy: i32,
        invert: bool,
    ) -> DisplayResult<I> {
        let Some(copy) = clip::clip_copy(self.viewport.bounds(), x, y, w, h, dx, dy) else {
            trace!("ssd1331: copy ({x}, {y}) {w}x{h} -> ({dx}, {dy}) has nothing to move, skipped");
            return Ok(());
        };
        let source = copy.source;
        let mode = if invert {
            FillMode::ReverseCopy
        } else {
            FillMode::Outline
        };
        let commands = [
            Command::Fill(mode),
            Command::Copy {
                start: self.viewport.device_point(source.x0, source.y0),
                end: self.viewport.device_point(source.last_x(), source.last_y()),
                dest: self.viewport.device_point(copy.dest_x, copy.dest_y),
            },
        ];
        self.session(|display| {
            display.send_commands(&commands)?;
            display.busy_wait(&source);
            Ok(())
        })
    }

    /// Move the whole viewport up by `lines` and clear the freed rows
    #[cfg(feature = "extras")]
    pub fn scroll_up(&mut self, lines: i32) -> DisplayResult<I> {
        if lines <= 0 {
            return Ok(());
        }
        let bounds = self.viewport.bounds();
        self.session(|display| {
            display.copy_bits(0, 0, bounds.width, bounds.height, 0, -lines, false)?;
            display.fill_rect(
                0,
                bounds.height.saturating_sub(lines),
                bounds.width,
                lines,
                Color::BLACK,
            )
        })
    }

    /// Logical width in pixels
    pub fn width(&self) -> u16 {
        self.viewport.width()
    }

    /// Logical height in pixels
    pub fn height(&self) -> u16 {
        self.viewport.height()
    }

    /// Current rotation
    pub fn rotation(&self) -> Rotation {
        self.viewport.rotation()
    }

    /// Rotation and color order in effect
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Configuration in effect
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    #[cfg(test)]
    pub(crate) fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    fn send_address_window(&mut self, area: &Area) -> DisplayResult<I> {
        let commands = self.viewport.address_window(area);
        self.send_commands(&commands)
    }

    /// Send commands in one command-mode transaction
    ///
    /// DC goes back high even if a write failed.
    fn send_commands(&mut self, commands: &[Command]) -> DisplayResult<I> {
        self.interface.command_mode().map_err(Error::Interface)?;
        let written = self.write_commands(commands);
        let exited = self.interface.data_mode().map_err(Error::Interface);
        written.and(exited)
    }

    fn write_commands(&mut self, commands: &[Command]) -> DisplayResult<I> {
        for command in commands {
            let frame = command.encode();
            if self.command_buf.len() + frame.len() > COMMAND_BUF_LEN {
                self.flush_commands()?;
            }
            // A single frame always fits an empty buffer
            let _ = self.command_buf.extend_from_slice(&frame);
        }
        self.flush_commands()
    }

    fn flush_commands(&mut self) -> DisplayResult<I> {
        if self.command_buf.is_empty() {
            return Ok(());
        }
        let result = self
            .interface
            .write(&self.command_buf)
            .map_err(Error::Interface);
        self.command_buf.clear();
        result
    }

    fn write_data(&mut self, bytes: &[u8]) -> DisplayResult<I> {
        self.interface.write(bytes).map_err(Error::Interface)
    }

    fn busy_wait(&mut self, area: &Area) {
        let us = timing::area_delay_us(area);
        trace!("ssd1331: waiting {us}us for {}x{} area", area.width(), area.height());
        if us > 0 {
            self.delay.delay_us(us);
        }
    }
}
