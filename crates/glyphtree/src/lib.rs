//! `glyphtree` is a retained-mode widget toolkit for character-grid terminals.
//!
//! An application is a sequence of [`scene::Scene`]s. Each scene builds a tree of components
//! (see [`widgets`]); the [`scheduler::MainLoop`] ticks, paints and feeds input to that tree,
//! and floats overlays such as menus and dialogs above it.
//!
//! ```no_run
//! # #[cfg(feature = "crossterm")]
//! # fn main() -> glyphtree::Result<()> {
//! use glyphtree::component::Element;
//! use glyphtree::context::Handle;
//! use glyphtree::scene::Scene;
//! use glyphtree::scheduler::SchedulerOptions;
//! use glyphtree::widgets::Label;
//!
//! struct Hello;
//!
//! impl Scene for Hello {
//!     fn create(&mut self, _handle: &Handle) -> Option<Element> {
//!         Some(Element::new(Label::new("Hello, <green>world</green>!").formatted(true)))
//!     }
//! }
//!
//! glyphtree::run::execute(Hello, SchedulerOptions::default(), None)
//! # }
//! # #[cfg(not(feature = "crossterm"))]
//! # fn main() {}
//! ```
//!
//! The drawing layer lives in [`core`] (the `glyphtree-core` crate).
pub use glyphtree_core as core;

pub mod capability;
pub mod component;
pub mod context;
pub mod error;
pub mod logging;
pub mod scene;
pub mod scheduler;
pub mod settings;
pub mod state;
pub mod widgets;

#[cfg(feature = "crossterm")]
pub mod run;

#[cfg(test)]
pub(crate) mod testing;

pub use error::Error;
pub use error::Result;
