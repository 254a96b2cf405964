use std::str::FromStr;

use glyphtree_core::geometry::Rectangle;
use glyphtree_core::input::InputEvent;
use glyphtree_core::surface::Surface;

use crate::component::Component;
use crate::component::DeferredInput;
use crate::component::Element;
use crate::component::InputResult;
use crate::component::IntoElement;
use crate::component::dispatch_children;
use crate::component::retry_children;
use crate::context::Context;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StickyEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl FromStr for StickyEdge {
    type Err = glyphtree_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(StickyEdge::Top),
            "bottom" => Ok(StickyEdge::Bottom),
            "left" => Ok(StickyEdge::Left),
            "right" => Ok(StickyEdge::Right),
            _ => Err(glyphtree_core::Error::invalid_option("sticky edge", s)),
        }
    }
}

const STICKY: usize = 0;
const OTHER: usize = 1;

/// A fixed-size pane pinned to one edge, with a second pane filling the rest.
pub struct Sticky {
    // [sticky, other]
    panes: [Element; 2],
    // Which panes got room in the last render.
    shown: [bool; 2],
    edge: StickyEdge,
    size: i32,
}

impl Sticky {
    pub fn new(
        sticky: impl IntoElement,
        other: impl IntoElement,
        edge: StickyEdge,
        size: i32,
    ) -> Self {
        Self {
            panes: [sticky.into_element(), other.into_element()],
            shown: [true; 2],
            edge,
            size: size.max(1),
        }
    }

    fn split(&self, w: i32, h: i32) -> (Rectangle, Rectangle) {
        let s = self.size;
        match self.edge {
            StickyEdge::Top => {
                let s = s.min(h);
                (Rectangle::new(0, s, 0, w), Rectangle::new(s, h, 0, w))
            }
            StickyEdge::Bottom => {
                let s = s.min(h);
                (Rectangle::new(h - s, h, 0, w), Rectangle::new(0, h - s, 0, w))
            }
            StickyEdge::Left => {
                let s = s.min(w);
                (Rectangle::new(0, h, 0, s), Rectangle::new(0, h, s, w))
            }
            StickyEdge::Right => {
                let s = s.min(w);
                (Rectangle::new(0, h, w - s, w), Rectangle::new(0, h, 0, w - s))
            }
        }
    }
}

impl Component for Sticky {
    fn attach(&mut self, ctx: &Context) {
        for pane in &mut self.panes {
            pane.attach(ctx.handle());
        }
    }

    fn detach(&mut self) {
        for pane in &mut self.panes {
            pane.detach();
        }
    }

    fn tick(&mut self) {
        for pane in &mut self.panes {
            pane.tick();
        }
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let (sticky, other) = self.split(surface.width(), surface.height());
        for (i, rect) in [(STICKY, sticky), (OTHER, other)] {
            self.shown[i] = !rect.is_empty();
            if self.shown[i] {
                self.panes[i].render(surface, rect);
            }
        }
    }

    fn dirty(&self) -> bool {
        self.panes
            .iter()
            .zip(self.shown)
            .any(|(pane, shown)| shown && pane.dirty())
    }

    fn bounds(&self) -> Option<Rectangle> {
        let sticky = self.panes[STICKY].bounds()?;
        let other = self.panes[OTHER].bounds()?;
        Some(match self.edge {
            StickyEdge::Top | StickyEdge::Bottom => Rectangle::sized(
                other.height() + self.size,
                sticky.width().max(other.width()),
            ),
            StickyEdge::Left | StickyEdge::Right => Rectangle::sized(
                sticky.height().max(other.height()),
                other.width() + self.size,
            ),
        })
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        dispatch_children(&mut self.panes, event)
    }

    fn retry_input(&mut self, deferred: &DeferredInput, event: &InputEvent) -> bool {
        retry_children(&mut self.panes, deferred, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use crate::widgets::Label;

    #[test]
    fn bottom_pane_is_pinned() {
        let mut h = Harness::new(4, 3);
        let mut el = h.attach(Sticky::new(
            Label::new("ok"),
            Label::new("msg"),
            StickyEdge::Bottom,
            1,
        ));
        h.render(&mut el);
        assert_eq!(h.lines(), vec!["msg", "", "", "ok"]);
    }

    #[test]
    fn right_pane_is_pinned() {
        let mut h = Harness::new(1, 5);
        let mut el = h.attach(Sticky::new(Label::new("R"), Label::new("left"), StickyEdge::Right, 1));
        h.render(&mut el);
        assert_eq!(h.row(0), "leftR");
    }

    #[test]
    fn oversized_sticky_pane_takes_everything() {
        let mut h = Harness::new(2, 4);
        let mut el = h.attach(Sticky::new(Label::new("top"), Label::new("rest"), StickyEdge::Top, 5));
        h.render(&mut el);
        assert_eq!(h.lines(), vec!["top", ""]);
        assert!(!el.dirty(), "the pane without room does not keep it dirty");
    }

    #[test]
    fn bounds_add_the_sticky_size() {
        let s = Sticky::new(Label::new("abcd"), Label::new("x\ny"), StickyEdge::Top, 2);
        assert_eq!(s.bounds(), Some(Rectangle::sized(4, 4)));
        let s = Sticky::new(Label::new("a\nb\nc"), Label::new("xy"), StickyEdge::Left, 0);
        assert_eq!(s.bounds(), Some(Rectangle::sized(3, 3)), "size is at least one");
    }
}
