//! `glyphtree-core` holds the primitives underneath the `glyphtree` widget toolkit.
//!
//! Most applications should depend on the facade crate `glyphtree`, which re-exports this crate
//! as `glyphtree::core`. Use this crate directly if you only need the drawing layer.
//!
//! ## Layers
//!
//! - [`geometry::Rectangle`] and [`color::Color`]: value types every other layer speaks.
//! - [`display::Display`]: the driver contract. [`buffer::BufferDisplay`] paints into memory;
//!   `terminal::TerminalDisplay` (feature `crossterm`) drives a real terminal.
//! - [`surface::Surface`]: clipped drawing with markup, word wrap and centering.
//! - [`markup`], [`wrapping`], [`keymap`]: the text engine pieces, usable on their own.
//! - [`line_edit`], [`viewport`], [`scroll`]: state machines behind the editing and scrolling
//!   widgets.
//!
//! ## Driver faults
//!
//! Drawing never fails from the caller's point of view. Writes that fall off the display are
//! dropped by the surface and logged at trace level.
pub mod buffer;
pub mod color;
pub mod display;
pub mod error;
pub mod geometry;
pub mod input;
pub mod keymap;
pub mod line_edit;
pub mod markup;
pub mod scroll;
pub mod surface;
pub mod viewport;
pub mod wrapping;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

#[cfg(feature = "crossterm")]
pub mod terminal;

pub use error::Error;
pub use error::Result;
