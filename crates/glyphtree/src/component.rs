//! The component protocol.
//!
//! Widgets implement [`Component`]. The tree never holds components directly: every node is an
//! [`Element`], which owns the component plus the bookkeeping the framework needs around it
//! (identity, attach state, last rendered location). Composite widgets hold their layout children
//! as `Element`s too, and call the `Element` methods rather than the `Component` ones.

use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use glyphtree_core::geometry::Rectangle;
use glyphtree_core::input::InputEvent;
use glyphtree_core::surface::Surface;

use crate::context::Context;
use crate::context::Handle;

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of one element in the tree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    pub fn new() -> Self {
        ComponentId(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// "Try me again if nobody else takes this event."
///
/// Names the component that asked; the retry is routed back to it through
/// [`Element::retry_input`], which calls its [`Component::handle_deferred`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredInput {
    owner: ComponentId,
}

impl DeferredInput {
    pub fn new(owner: ComponentId) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> ComponentId {
        self.owner
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Handled,
    Ignored,
    Deferred(DeferredInput),
}

impl InputResult {
    pub fn from_handled(handled: bool) -> Self {
        if handled {
            InputResult::Handled
        } else {
            InputResult::Ignored
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, InputResult::Handled)
    }
}

pub trait Component {
    /// One-time setup when the element joins a live tree. Composites attach their children here.
    fn attach(&mut self, _ctx: &Context) {}

    /// Teardown. Overlays registered through this component's context are already released.
    fn detach(&mut self) {}

    /// Advances animations by one fixed timestep.
    fn tick(&mut self) {}

    /// Paints into `surface`, whose bounds are exactly the area given to this component.
    fn render(&mut self, surface: &mut Surface<'_>);

    /// True while a repaint is needed. Containers report the OR of their children.
    fn dirty(&self) -> bool {
        false
    }

    /// Intrinsic size, if known without an allotted area. `None` means "fill what you get".
    fn bounds(&self) -> Option<Rectangle> {
        None
    }

    fn handle_input(&mut self, _event: &InputEvent) -> InputResult {
        InputResult::Ignored
    }

    /// Second chance for an event this component deferred. Returns whether it took it.
    fn handle_deferred(&mut self, _event: &InputEvent) -> bool {
        false
    }

    /// Routes a deferred retry owned by a descendant. Composites forward to their children.
    fn retry_input(&mut self, _deferred: &DeferredInput, _event: &InputEvent) -> bool {
        false
    }
}

/// A node of the live tree.
pub struct Element {
    id: ComponentId,
    location: Option<Rectangle>,
    ctx: Option<Context>,
    inner: Box<dyn Component>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("location", &self.location)
            .field("attached", &self.ctx.is_some())
            .finish()
    }
}

impl Element {
    pub fn new(component: impl Component + 'static) -> Self {
        Self {
            id: ComponentId::new(),
            location: None,
            ctx: None,
            inner: Box::new(component),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Absolute rectangle of the last render, used for mouse hit-testing.
    pub fn location(&self) -> Option<Rectangle> {
        self.location
    }

    pub fn is_attached(&self) -> bool {
        self.ctx.is_some()
    }

    pub fn context(&self) -> Option<&Context> {
        self.ctx.as_ref()
    }

    pub fn attach(&mut self, handle: &Handle) {
        if self.ctx.is_some() {
            log::warn!("component {} attached twice; ignoring", self.id);
            return;
        }
        let ctx = Context::new(handle.clone(), self.id);
        self.inner.attach(&ctx);
        self.ctx = Some(ctx);
    }

    pub fn detach(&mut self) {
        let Some(ctx) = self.ctx.take() else {
            return;
        };
        for child in ctx.children() {
            ctx.handle().release_overlay(child);
        }
        self.inner.detach();
        ctx.handle().forget_location(self.id);
        self.location = None;
    }

    pub fn tick(&mut self) {
        if self.ctx.is_some() {
            self.inner.tick();
        }
    }

    pub fn dirty(&self) -> bool {
        self.inner.dirty()
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        self.inner.bounds()
    }

    /// Renders into `rect` (in `surface` coordinates), clipped to the surface.
    pub fn render(&mut self, surface: &mut Surface<'_>, rect: Rectangle) {
        let Some(ctx) = &self.ctx else {
            log::warn!("skipping render of detached component {}", self.id);
            return;
        };
        let mut sub = surface.clip(rect);
        let location = sub.location();
        self.location = Some(location);
        ctx.handle().record_location(self.id, location);
        self.inner.render(&mut sub);
    }

    /// Delivers an event, hit-testing mouse clicks against the last rendered location.
    ///
    /// A click outside the element arrives as [`InputEvent::Defocus`]. An element that has
    /// never been rendered ignores mouse clicks entirely.
    pub fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        if self.ctx.is_none() {
            return InputResult::Ignored;
        }
        match *event {
            InputEvent::Mouse { x, y, button } => match self.location {
                Some(loc) if loc.contains(y, x) => self.inner.handle_input(event),
                Some(_) => self.inner.handle_input(&InputEvent::Defocus { button }),
                None => InputResult::Ignored,
            },
            _ => self.inner.handle_input(event),
        }
    }

    pub fn retry_input(&mut self, deferred: &DeferredInput, event: &InputEvent) -> bool {
        if self.ctx.is_none() {
            return false;
        }
        if deferred.owner() == self.id {
            self.inner.handle_deferred(event)
        } else {
            self.inner.retry_input(deferred, event)
        }
    }
}

/// `component.into_element()` as shorthand for [`Element::new`].
pub trait IntoElement {
    fn into_element(self) -> Element;
}

impl<C: Component + 'static> IntoElement for C {
    fn into_element(self) -> Element {
        Element::new(self)
    }
}

impl IntoElement for Element {
    fn into_element(self) -> Element {
        self
    }
}

/// Runs a first pass over `children`, then retries deferred results in order.
///
/// Shared by the containers that hold several children side by side.
pub(crate) fn dispatch_children(children: &mut [Element], event: &InputEvent) -> InputResult {
    let mut deferred = Vec::new();
    for (i, child) in children.iter_mut().enumerate() {
        match child.handle_input(event) {
            InputResult::Handled => return InputResult::Handled,
            InputResult::Ignored => {}
            InputResult::Deferred(d) => deferred.push((i, d)),
        }
    }
    for (i, d) in deferred {
        if children[i].retry_input(&d, event) {
            return InputResult::Handled;
        }
    }
    InputResult::Ignored
}

pub(crate) fn retry_children(
    children: &mut [Element],
    deferred: &DeferredInput,
    event: &InputEvent,
) -> bool {
    children
        .iter_mut()
        .any(|child| child.retry_input(deferred, event))
}
