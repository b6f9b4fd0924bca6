//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and two transports for
//! talking to the SSD1331 controller over SPI:
//!
//! - [`Interface`] wraps an [`SpiDevice`], which manages chip select on every
//!   write by itself.
//! - [`BusInterface`] wraps a raw [`SpiBus`] plus a CS pin, and holds CS low
//!   for the whole write session.
//!
//! ## Hardware Requirements
//!
//! The SSD1331 requires:
//! - SPI bus (MOSI + SCK), mode 0 or 3
//! - 2 or 3 GPIO pins:
//!   - **DC**: Data/Command select (output, low = command)
//!   - **RST**: Reset (output, active low)
//!   - **CS**: Chip select (output, active low), only for [`BusInterface`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1331::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//! interface.reset(&mut delay);
//!
//! // Display on
//! let _ = interface.command_mode();
//! let _ = interface.write(&[0xAF]);
//! let _ = interface.data_mode();
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{SpiBus, SpiDevice};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to SSD1331 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// A write session is bracketed by [`acquire`](Self::acquire) and
/// [`release`](Self::release). Inside it the display switches between
/// command mode and data mode and writes raw bytes.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Take the transport at the start of a write session
    ///
    /// Called once per outermost session. The default does nothing.
    fn acquire(&mut self) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }

    /// Give the transport back at the end of a write session
    ///
    /// All bytes written so far must be on the wire when this returns.
    fn release(&mut self) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }

    /// Drive DC low so that following bytes are commands
    fn command_mode(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Drive DC high so that following bytes are pixel data
    fn data_mode(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Write bytes in the current mode
    fn write(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must:
    /// 1. Set RST pin low
    /// 2. Wait at least 10ms
    /// 3. Set RST pin high
    /// 4. Wait at least 10ms
    fn reset<D: DelayNs>(&mut self, delay: &mut D);
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

fn reset_pulse<RST: OutputPin, D: DelayNs>(rst: &mut RST, delay: &mut D) {
    // Reset sequence: LOW -> wait 10ms -> HIGH -> wait 10ms
    let _ = rst.set_low();
    delay.delay_ms(10);
    let _ = rst.set_high();
    delay.delay_ms(10);
}

/// Interface over an [`SpiDevice`]
///
/// The SPI device asserts chip select around every write, so acquire and
/// release are no-ops.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct Interface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Return the SPI device and pins
    pub fn into_parts(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn command_mode(&mut self) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)
    }

    fn data_mode(&mut self) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)
    }

    fn write(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.spi.write(bytes).map_err(InterfaceError::Spi)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        reset_pulse(&mut self.rst, delay);
    }
}

/// Interface over a raw [`SpiBus`] with a dedicated chip select pin
///
/// Chip select goes low on [`acquire`](DisplayInterface::acquire) and stays
/// low until [`release`](DisplayInterface::release), so a whole drawing
/// session is one bus transaction. The bus is flushed before DC changes,
/// since a bus may still be shifting out earlier bytes when `write` returns.
///
/// To share a bus with other devices, pass `&mut bus`: [`SpiBus`] is
/// implemented for mutable references, and the borrow keeps other users off
/// the bus for as long as the interface lives.
///
/// ## Type Parameters
///
/// * `BUS` - SPI bus implementing [`SpiBus`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct BusInterface<BUS, CS, DC, RST> {
    bus: BUS,
    cs: CS,
    dc: DC,
    rst: RST,
}

impl<BUS, CS, DC, RST> BusInterface<BUS, CS, DC, RST>
where
    BUS: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new BusInterface
    ///
    /// CS is expected to idle high.
    pub fn new(bus: BUS, cs: CS, dc: DC, rst: RST) -> Self {
        Self { bus, cs, dc, rst }
    }

    /// Return the bus and pins
    pub fn into_parts(self) -> (BUS, CS, DC, RST) {
        (self.bus, self.cs, self.dc, self.rst)
    }
}

impl<BUS, CS, DC, RST, PinErr> DisplayInterface for BusInterface<BUS, CS, DC, RST>
where
    BUS: SpiBus,
    BUS::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<BUS::Error, PinErr>;

    fn acquire(&mut self) -> InterfaceResult<(), Self::Error> {
        self.cs.set_low().map_err(InterfaceError::Pin)
    }

    fn release(&mut self) -> InterfaceResult<(), Self::Error> {
        let flushed = self.bus.flush().map_err(InterfaceError::Spi);
        // CS goes high even if the flush failed
        let deselected = self.cs.set_high().map_err(InterfaceError::Pin);
        flushed.and(deselected)
    }

    fn command_mode(&mut self) -> InterfaceResult<(), Self::Error> {
        self.bus.flush().map_err(InterfaceError::Spi)?;
        self.dc.set_low().map_err(InterfaceError::Pin)
    }

    fn data_mode(&mut self) -> InterfaceResult<(), Self::Error> {
        self.bus.flush().map_err(InterfaceError::Spi)?;
        self.dc.set_high().map_err(InterfaceError::Pin)
    }

    fn write(&mut self, bytes: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.bus.write(bytes).map_err(InterfaceError::Spi)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        reset_pulse(&mut self.rst, delay);
    }
}
