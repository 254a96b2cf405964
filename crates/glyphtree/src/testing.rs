use glyphtree_core::buffer::BufferDisplay;
use glyphtree_core::display::GlyphSupport;
use glyphtree_core::geometry::Rectangle;
use glyphtree_core::surface::Screen;

use crate::component::Component;
use crate::component::Element;
use crate::context::Handle;
use crate::settings::Settings;

/// A screen and handle for driving components without a scheduler.
pub(crate) struct Harness {
    screen: Screen<BufferDisplay>,
    handle: Handle,
}

impl Harness {
    pub(crate) fn new(height: u16, width: u16) -> Self {
        Self::with_glyphs(height, width, GlyphSupport::Extended)
    }

    pub(crate) fn with_glyphs(height: u16, width: u16, glyphs: GlyphSupport) -> Self {
        let display = BufferDisplay::new(height, width).with_glyph_support(glyphs);
        Self {
            screen: Screen::new(display),
            handle: Handle::new(Settings::with_glyphs(glyphs)),
        }
    }

    pub(crate) fn handle(&self) -> &Handle {
        &self.handle
    }

    pub(crate) fn attach(&self, component: impl Component + 'static) -> Element {
        let mut element = Element::new(component);
        element.attach(&self.handle);
        element
    }

    /// Renders over the whole screen.
    pub(crate) fn render(&mut self, element: &mut Element) {
        let bounds = self.screen.bounds();
        self.render_at(element, bounds);
    }

    pub(crate) fn render_at(&mut self, element: &mut Element, rect: Rectangle) {
        let mut surface = self.screen.surface();
        element.render(&mut surface, rect);
    }

    pub(crate) fn display(&self) -> &BufferDisplay {
        self.screen.display()
    }

    pub(crate) fn row(&self, y: u16) -> String {
        self.screen.display().row_text(y)
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.screen.display().lines()
    }

    /// Pending commands, drained: `(registered, unregistered)` counts.
    pub(crate) fn drain_commands(&self) -> (usize, usize) {
        let mut counts = (0, 0);
        while let Some(command) = self.handle.pop_command() {
            match command {
                crate::context::Command::Register { .. } => counts.0 += 1,
                crate::context::Command::Unregister(_) => counts.1 += 1,
            }
        }
        counts
    }
}
