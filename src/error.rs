//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! Geometry never produces an error: requests that fall outside the viewport,
//! collapse to nothing after clipping, or carry an out-of-range rotation are
//! absorbed as no-ops. Only the transport can fail.
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use ssd1331::{Builder, BuilderError, Dimensions};
//!
//! // Too many columns for the controller
//! let result = Dimensions::new(64, 128);
//! assert!(matches!(result, Err(BuilderError::InvalidDimensions { rows: 64, cols: 128 })));
//!
//! // Master current is a 4-bit register
//! let result = Builder::new().master_current(0x1F).build();
//! assert!(matches!(result, Err(BuilderError::InvalidMasterCurrent(0x1F))));
//! ```

use crate::interface::DisplayInterface;

/// Maximum number of rows (COM outputs) driven by the SSD1331
pub const MAX_ROWS: u16 = 64;

/// Maximum number of columns (SEG outputs) driven by the SSD1331
pub const MAX_COLS: u16 = 96;

/// Largest value accepted by the master current register
pub const MAX_MASTER_CURRENT: u8 = 0x0F;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u16,
        /// Number of columns (width) requested
        cols: u16,
    },
    /// Master current value does not fit the 4-bit register
    InvalidMasterCurrent(u8),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (must be between 1x1 and {MAX_ROWS}x{MAX_COLS})"
            ),
            Self::InvalidMasterCurrent(value) => write!(
                f,
                "Invalid master current {value:#04x} (max {MAX_MASTER_CURRENT:#04x})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
