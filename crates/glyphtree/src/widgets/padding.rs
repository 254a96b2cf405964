use glyphtree_core::geometry::Rectangle;
use glyphtree_core::input::InputEvent;
use glyphtree_core::surface::Surface;

use crate::component::Component;
use crate::component::DeferredInput;
use crate::component::Element;
use crate::component::InputResult;
use crate::component::IntoElement;
use crate::context::Context;

/// Empty space around a child.
///
/// ```
/// use glyphtree::widgets::{Label, Padding};
///
/// // One column left and right, two rows above.
/// let padded = Padding::new(Label::new("hi")).horizontal(1).top(2);
/// ```
pub struct Padding {
    child: Element,
    top: i32,
    bottom: i32,
    left: i32,
    right: i32,
}

impl Padding {
    pub fn new(child: impl IntoElement) -> Self {
        Self {
            child: child.into_element(),
            top: 0,
            bottom: 0,
            left: 0,
            right: 0,
        }
    }

    pub fn all(self, n: i32) -> Self {
        self.vertical(n).horizontal(n)
    }

    pub fn vertical(mut self, n: i32) -> Self {
        self.top = n;
        self.bottom = n;
        self
    }

    pub fn horizontal(mut self, n: i32) -> Self {
        self.left = n;
        self.right = n;
        self
    }

    pub fn top(mut self, n: i32) -> Self {
        self.top = n;
        self
    }

    pub fn bottom(mut self, n: i32) -> Self {
        self.bottom = n;
        self
    }

    pub fn left(mut self, n: i32) -> Self {
        self.left = n;
        self
    }

    pub fn right(mut self, n: i32) -> Self {
        self.right = n;
        self
    }
}

impl Component for Padding {
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
        let inner = surface
            .bounds()
            .inset(self.top, self.bottom, self.left, self.right);
        if inner.is_empty() {
            return;
        }
        self.child.render(surface, inner);
    }

    fn dirty(&self) -> bool {
        self.child.dirty()
    }

    fn bounds(&self) -> Option<Rectangle> {
        let inner = self.child.bounds()?;
        let height = if inner.height() > 0 {
            inner.height() + self.top + self.bottom
        } else {
            0
        };
        let width = if inner.width() > 0 {
            inner.width() + self.left + self.right
        } else {
            0
        };
        Some(Rectangle::sized(height, width))
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        self.child.handle_input(event)
    }

    fn retry_input(&mut self, deferred: &DeferredInput, event: &InputEvent) -> bool {
        self.child.retry_input(deferred, event)
    }
}
