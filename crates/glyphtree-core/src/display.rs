//! Display driver contract.
//!
//! The toolkit never talks to a terminal directly. Everything it paints goes through
//! [`Display::write`], and everything it reads comes from [`Display::read_input`]. Two drivers
//! ship with the crate: [`crate::buffer::BufferDisplay`] (an in-memory grid, used for tests and
//! headless rendering) and, behind the `crossterm` feature, `crate::terminal::TerminalDisplay`.

use std::time::Duration;

use thiserror::Error;

use crate::color::Color;
use crate::color::PairId;
use crate::input::DriverInput;

/// Whether the driver can draw box-drawing and block glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlyphSupport {
    Basic,
    #[default]
    Extended,
}

impl GlyphSupport {
    pub fn from_flag(extended: bool) -> Self {
        if extended {
            GlyphSupport::Extended
        } else {
            GlyphSupport::Basic
        }
    }

    pub fn is_extended(self) -> bool {
        self == GlyphSupport::Extended
    }
}

/// Attributes for one `write` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub pair: PairId,
    pub invert: bool,
    pub underline: bool,
}

/// Faults a driver may report. The render surface swallows all of them.
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("write at ({y}, {x}) is outside the display")]
    OutOfBounds { y: i32, x: i32 },

    #[error("write at ({y}, {x}) overflowed the right edge")]
    Truncated { y: i32, x: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait Display {
    /// Current size as `(height, width)`.
    fn size(&self) -> (u16, u16);

    /// Declares the colors behind `pair`. Called once per pair, before its first use.
    fn init_pair(&mut self, pair: PairId, fg: Color, bg: Color);

    /// Writes a single run of text starting at absolute cell `(y, x)`.
    ///
    /// Text that runs past the right edge is cut, and the call reports
    /// [`DisplayError::Truncated`] after writing what fits.
    fn write(&mut self, y: i32, x: i32, text: &str, style: CellStyle) -> Result<(), DisplayError>;

    fn clear(&mut self);

    fn refresh(&mut self) -> Result<(), DisplayError>;

    /// Next input, waiting at most `timeout` (`None` blocks until something arrives).
    fn read_input(&mut self, timeout: Option<Duration>) -> Option<DriverInput>;

    fn glyph_support(&self) -> GlyphSupport {
        GlyphSupport::Extended
    }
}
