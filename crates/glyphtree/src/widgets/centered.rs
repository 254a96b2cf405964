use glyphtree_core::geometry::Rectangle;
use glyphtree_core::input::InputEvent;
use glyphtree_core::surface::Surface;

use crate::component::Component;
use crate::component::DeferredInput;
use crate::component::Element;
use crate::component::InputResult;
use crate::component::IntoElement;
use crate::context::Context;

/// Centers a child of known size in the area; a child without bounds fills it.
pub struct Centered {
    child: Element,
}

impl Centered {
    pub fn new(child: impl IntoElement) -> Self {
        Self {
            child: child.into_element(),
        }
    }
}

impl Component for Centered {
    fn attach(&mut self, ctx: &Context) {
        self.child.attach(ctx.handle());
    }

    fn detach(&mut self) {
        self.child.detach();
    }

    fn tick(&mut self) {
        self.child.tick();
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let area = surface.bounds();
        let rect = match self.child.bounds() {
            Some(b) => {
                let h = b.height().min(area.height());
                let w = b.width().min(area.width());
                let top = (area.height() - h) / 2;
                let left = (area.width() - w) / 2;
                Rectangle::new(top, top + h, left, left + w)
            }
            None => area,
        };
        surface.clear();
        self.child.render(surface, rect);
    }

    fn dirty(&self) -> bool {
        self.child.dirty()
    }

    fn bounds(&self) -> Option<Rectangle> {
        self.child.bounds()
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        self.child.handle_input(event)
    }

    fn retry_input(&mut self, deferred: &DeferredInput, event: &InputEvent) -> bool {
        self.child.retry_input(deferred, event)
    }
}
