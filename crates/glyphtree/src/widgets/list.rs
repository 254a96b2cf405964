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

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    TopToBottom,
    LeftToRight,
}

impl FromStr for Direction {
    type Err = glyphtree_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top_to_bottom" | "top-to-bottom" | "vertical" => Ok(Direction::TopToBottom),
            "left_to_right" | "left-to-right" | "horizontal" => Ok(Direction::LeftToRight),
            _ => Err(glyphtree_core::Error::invalid_option("list direction", s)),
        }
    }
}

/// Children laid out one after another along a direction.
///
/// Every child gets the same extent: `size` when given, otherwise an even share of the area
/// (at least one cell). Children that would start past the end are not drawn; the last visible
/// one is clipped. Only drawn children count toward [`Component::dirty`].
pub struct List {
    direction: Direction,
    size: Option<i32>,
    children: Vec<Element>,
    // Children drawn by the last render; all of them until the first one.
    shown: usize,
}

impl List {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            size: None,
            children: Vec::new(),
            shown: usize::MAX,
        }
    }

    pub fn with_children(direction: Direction, children: Vec<Element>) -> Self {
        Self {
            direction,
            size: None,
            children,
            shown: usize::MAX,
        }
    }

    pub fn push(mut self, child: impl IntoElement) -> Self {
        self.children.push(child.into_element());
        self
    }

    /// Fixed extent per child along the direction.
    pub fn size(mut self, size: i32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn item_extent(&self, extent: i32) -> i32 {
        let size = match self.size {
            Some(size) => size,
            None => extent / self.children.len().max(1) as i32,
        };
        size.max(1)
    }
}

impl Component for List {
    fn attach(&mut self, ctx: &Context) {
        for child in &mut self.children {
            child.attach(ctx.handle());
        }
    }

    fn detach(&mut self) {
        for child in &mut self.children {
            child.detach();
        }
    }

    fn tick(&mut self) {
        for child in &mut self.children {
            child.tick();
        }
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let (w, h) = (surface.width(), surface.height());
        let extent = match self.direction {
            Direction::TopToBottom => h,
            Direction::LeftToRight => w,
        };
        let step = self.item_extent(extent);

        let mut offset = 0;
        self.shown = 0;
        for child in &mut self.children {
            if offset >= extent {
                break;
            }
            self.shown += 1;
            let end = (offset + step).min(extent);
            let rect = match self.direction {
                Direction::TopToBottom => Rectangle::new(offset, end, 0, w),
                Direction::LeftToRight => Rectangle::new(0, h, offset, end),
            };
            child.render(surface, rect);
            offset += step;
        }
    }

    fn dirty(&self) -> bool {
        self.children.iter().take(self.shown).any(Element::dirty)
    }

    /// Known only with a fixed size and children that all know theirs.
    fn bounds(&self) -> Option<Rectangle> {
        let size = self.size?;
        let mut cross = 0;
        for child in &self.children {
            let b = child.bounds()?;
            cross = cross.max(match self.direction {
                Direction::TopToBottom => b.width(),
                Direction::LeftToRight => b.height(),
            });
        }
        let along = size * self.children.len() as i32;
        Some(match self.direction {
            Direction::TopToBottom => Rectangle::sized(along, cross),
            Direction::LeftToRight => Rectangle::sized(cross, along),
        })
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        dispatch_children(&mut self.children, event)
    }

    fn retry_input(&mut self, deferred: &DeferredInput, event: &InputEvent) -> bool {
        retry_children(&mut self.children, deferred, event)
    }
}
