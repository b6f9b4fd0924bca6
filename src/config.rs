//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLS, MAX_MASTER_CURRENT, MAX_ROWS};

/// Display dimensions in the panel's native orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of rows (height in pixels, corresponds to COM outputs)
    pub rows: u16,
    /// Number of columns (width in pixels, corresponds to SEG outputs)
    pub cols: u16,
}

impl Dimensions {
    /// The full 96x64 SSD1331 panel
    pub const FULL: Self = Self {
        rows: MAX_ROWS,
        cols: MAX_COLS,
    };

    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows == 0 or rows > MAX_ROWS
    /// - cols == 0 or cols > MAX_COLS
    pub fn new(rows: u16, cols: u16) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_ROWS || cols == 0 || cols > MAX_COLS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of pixels on the panel
    pub fn pixel_count(&self) -> u32 {
        u32::from(self.rows) * u32::from(self.cols)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::FULL
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

impl Rotation {
    /// Map a rotation index to a rotation, keeping only the low two bits
    ///
    /// ```
    /// use ssd1331::Rotation;
    ///
    /// assert_eq!(Rotation::from_bits(1), Rotation::Rotate90);
    /// assert_eq!(Rotation::from_bits(6), Rotation::Rotate180);
    /// ```
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Rotate0,
            1 => Self::Rotate90,
            2 => Self::Rotate180,
            _ => Self::Rotate270,
        }
    }

    /// Rotation index 0..=3
    pub const fn index(self) -> u8 {
        match self {
            Self::Rotate0 => 0,
            Self::Rotate90 => 1,
            Self::Rotate180 => 2,
            Self::Rotate270 => 3,
        }
    }

    /// Whether rows and columns trade places (90 and 270 degrees)
    pub const fn swaps_axes(self) -> bool {
        self.index() & 0x01 != 0
    }
}

impl From<u8> for Rotation {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

/// Order of the color channels in display RAM
///
/// Depends on how the panel is wired to the controller's segment outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    /// Red in the high bits
    #[default]
    Rgb,
    /// Blue in the high bits
    Bgr,
}

/// Display configuration
///
/// This struct holds all configurable parameters for the SSD1331 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Rotation applied during init
    pub rotation: Rotation,
    /// Color channel order of the panel
    pub color_order: ColorOrder,
    /// Master configuration byte (0xAD), selects the external VCC supply
    pub master_config: u8,
    /// Power save mode byte (0xB0)
    pub power_mode: u8,
    /// Phase 1 and 2 period adjustment (0xB1)
    pub phase_period: u8,
    /// Oscillator frequency and clock divide ratio (0xB3)
    pub clock_div: u8,
    /// Second precharge speed for color A, B and C (0x8A, 0x8B, 0x8C)
    pub second_precharge: [u8; 3],
    /// Precharge voltage level (0xBB)
    pub precharge_level: u8,
    /// VCOMH voltage level (0xBE)
    pub vcomh: u8,
    /// Master current attenuation, 0x00..=0x0F (0x87)
    pub master_current: u8,
    /// Contrast for color A, B and C (0x81, 0x82, 0x83)
    pub contrast: [u8; 3],
}

impl Config {
    /// Multiplex ratio register value for the configured row count
    pub fn multiplex_ratio(&self) -> u8 {
        self.dimensions.rows.saturating_sub(1) as u8
    }
}

impl Default for Config {
    fn default() -> Self {
        // Register values for the common 96x64 breakout boards
        Self {
            dimensions: Dimensions::FULL,
            rotation: Rotation::Rotate0,
            color_order: ColorOrder::Rgb,
            master_config: 0x8E,
            power_mode: 0x0B,
            phase_period: 0x31,
            clock_div: 0xF0,
            second_precharge: [0x64, 0x78, 0x64],
            precharge_level: 0x3A,
            vcomh: 0x3E,
            master_current: 0x06,
            contrast: [0x91, 0x50, 0x7D],
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust
/// use ssd1331::{Builder, ColorOrder, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(64, 96) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .rotation(Rotation::Rotate90)
///     .color_order(ColorOrder::Bgr)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.multiplex_ratio(), 0x3F);
/// ```
#[must_use]
pub struct Builder {
    config: Config,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            config: Config::default(),
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.config.dimensions = dims;
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Set the panel's color channel order
    pub fn color_order(mut self, order: ColorOrder) -> Self {
        self.config.color_order = order;
        self
    }

    /// Set the master configuration byte
    pub fn master_config(mut self, value: u8) -> Self {
        self.config.master_config = value;
        self
    }

    /// Set the power save mode byte
    pub fn power_mode(mut self, value: u8) -> Self {
        self.config.power_mode = value;
        self
    }

    /// Set phase 1 and 2 periods
    pub fn phase_period(mut self, value: u8) -> Self {
        self.config.phase_period = value;
        self
    }

    /// Set oscillator frequency and clock divide ratio
    pub fn clock_div(mut self, value: u8) -> Self {
        self.config.clock_div = value;
        self
    }

    /// Set second precharge speed for colors A, B and C
    pub fn second_precharge(mut self, values: [u8; 3]) -> Self {
        self.config.second_precharge = values;
        self
    }

    /// Set precharge voltage level
    pub fn precharge_level(mut self, value: u8) -> Self {
        self.config.precharge_level = value;
        self
    }

    /// Set VCOMH voltage level
    pub fn vcomh(mut self, value: u8) -> Self {
        self.config.vcomh = value;
        self
    }

    /// Set master current attenuation
    pub fn master_current(mut self, value: u8) -> Self {
        self.config.master_current = value;
        self
    }

    /// Set contrast for colors A, B and C
    pub fn contrast(mut self, values: [u8; 3]) -> Self {
        self.config.contrast = values;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidMasterCurrent` if the master current
    /// exceeds [`MAX_MASTER_CURRENT`].
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.config.master_current > MAX_MASTER_CURRENT {
            return Err(BuilderError::InvalidMasterCurrent(
                self.config.master_current,
            ));
        }
        Ok(self.config)
    }
}
