//! The link between components and the scheduler that runs them.
//!
//! Components cannot reach the scheduler directly while it is dispatching into them, so every
//! request (register an overlay, drop one, switch scenes) goes into a queue on the shared
//! [`Handle`] and takes effect at the scheduler's next apply point.
//!
//! The overlay registry itself also lives on the handle. Detaching an element releases the
//! overlays it registered right away, before its own teardown runs.

use std::cell::Cell;
use std::cell::Ref;
use std::cell::RefCell;
use std::cell::RefMut;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use glyphtree_core::display::GlyphSupport;
use glyphtree_core::geometry::Rectangle;

use crate::component::ComponentId;
use crate::component::Element;
use crate::error::Error;
use crate::error::Result;
use crate::scene::Scene;
use crate::settings::ENABLE_UNICODE;
use crate::settings::Settings;

pub(crate) enum Command {
    Register {
        element: Element,
        location: Option<Rectangle>,
        parent: Option<ComponentId>,
    },
    Unregister(ComponentId),
}

/// A floating element owned by the registry rather than by a parent widget.
pub(crate) struct Overlay {
    pub(crate) element: Element,
    pub(crate) location: Option<Rectangle>,
    pub(crate) parent: Option<ComponentId>,
}

pub(crate) enum NextScene {
    Enter(Box<dyn Scene>),
    Exit,
}

struct HandleState {
    commands: RefCell<VecDeque<Command>>,
    next_scene: RefCell<Option<NextScene>>,
    settings: RefCell<Settings>,
    locations: RefCell<HashMap<ComponentId, Rectangle>>,
    overlays: RefCell<Vec<Overlay>>,
    overlays_removed: Cell<bool>,
}

/// Cloneable access to the running scheduler.
#[derive(Clone)]
pub struct Handle {
    state: Rc<HandleState>,
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("pending_commands", &self.state.commands.borrow().len())
            .field("scene_pending", &self.has_pending_scene())
            .finish()
    }
}

impl Handle {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: Rc::new(HandleState {
                commands: RefCell::new(VecDeque::new()),
                next_scene: RefCell::new(None),
                settings: RefCell::new(settings),
                locations: RefCell::new(HashMap::new()),
                overlays: RefCell::new(Vec::new()),
                overlays_removed: Cell::new(false),
            }),
        }
    }

    /// Requests a scene switch at the top of the next cycle.
    ///
    /// Only the first request per cycle counts; later ones are dropped until it is applied.
    pub fn change_scene(&self, scene: impl Scene + 'static) {
        let mut next = self.state.next_scene.borrow_mut();
        if next.is_some() {
            log::debug!("scene change already pending; ignoring request");
            return;
        }
        *next = Some(NextScene::Enter(Box::new(scene)));
    }

    /// Requests shutdown. Overrides any pending scene change.
    pub fn exit(&self) {
        *self.state.next_scene.borrow_mut() = Some(NextScene::Exit);
    }

    pub fn has_pending_scene(&self) -> bool {
        self.state.next_scene.borrow().is_some()
    }

    /// Queues a floating overlay.
    ///
    /// `location` is relative to the parent's rendered location when a parent is given, and to
    /// the screen otherwise. Without a location the overlay covers the screen.
    pub fn register_component(
        &self,
        element: Element,
        location: Option<Rectangle>,
        parent: Option<ComponentId>,
    ) -> Result<ComponentId> {
        if parent.is_some() && location.is_none() {
            return Err(Error::MissingOverlayLocation);
        }
        let id = element.id();
        self.state.commands.borrow_mut().push_back(Command::Register {
            element,
            location,
            parent,
        });
        Ok(id)
    }

    /// Queues removal of an overlay and everything registered under it.
    pub fn unregister_component(&self, id: ComponentId) {
        self.state
            .commands
            .borrow_mut()
            .push_back(Command::Unregister(id));
    }

    pub fn settings(&self) -> Ref<'_, Settings> {
        self.state.settings.borrow()
    }

    pub fn settings_mut(&self) -> RefMut<'_, Settings> {
        self.state.settings.borrow_mut()
    }

    pub fn enable_unicode(&self) -> bool {
        self.settings().get(&ENABLE_UNICODE).unwrap_or(true)
    }

    pub fn glyph_support(&self) -> GlyphSupport {
        GlyphSupport::from_flag(self.enable_unicode())
    }

    /// Where `id` was last rendered, in absolute screen cells.
    pub fn location_of(&self, id: ComponentId) -> Option<Rectangle> {
        self.state.locations.borrow().get(&id).copied()
    }

    pub(crate) fn record_location(&self, id: ComponentId, location: Rectangle) {
        self.state.locations.borrow_mut().insert(id, location);
    }

    pub(crate) fn forget_location(&self, id: ComponentId) {
        self.state.locations.borrow_mut().remove(&id);
    }

    /// Registered overlays, oldest first.
    pub(crate) fn overlays_mut(&self) -> RefMut<'_, Vec<Overlay>> {
        self.state.overlays.borrow_mut()
    }

    pub(crate) fn overlay_ids(&self) -> Vec<ComponentId> {
        self.state
            .overlays
            .borrow()
            .iter()
            .map(|o| o.element.id())
            .collect()
    }

    /// Detaches overlay `id` now: first everything registered under it, then `id` itself.
    ///
    /// A registration still waiting in the queue is dropped instead. While the scheduler is
    /// walking the registry (painting or dispatching) the removal is queued like
    /// [`Handle::unregister_component`].
    pub(crate) fn release_overlay(&self, id: ComponentId) {
        let children: Vec<ComponentId> = match self.state.overlays.try_borrow() {
            Ok(overlays) => overlays
                .iter()
                .filter(|o| o.parent == Some(id))
                .map(|o| o.element.id())
                .collect(),
            Err(_) => {
                log::debug!("overlay registry busy; queueing removal of {id}");
                self.unregister_component(id);
                return;
            }
        };
        for child in children {
            self.release_overlay(child);
        }

        let removed = match self.state.overlays.try_borrow_mut() {
            Ok(mut overlays) => overlays
                .iter()
                .position(|o| o.element.id() == id)
                .map(|pos| overlays.remove(pos)),
            Err(_) => {
                self.unregister_component(id);
                return;
            }
        };
        match removed {
            Some(mut overlay) => {
                log::debug!("unregistering overlay {id}");
                self.state.overlays_removed.set(true);
                overlay.element.detach();
            }
            None => self.cancel_registration(id),
        }
    }

    /// Whether any overlay was released since the last call. The cells it covered need a repaint.
    pub(crate) fn take_overlays_removed(&self) -> bool {
        self.state.overlays_removed.replace(false)
    }

    fn cancel_registration(&self, id: ComponentId) {
        let mut commands = self.state.commands.borrow_mut();
        let before = commands.len();
        commands.retain(|c| !matches!(c, Command::Register { element, .. } if element.id() == id));
        if commands.len() < before {
            log::debug!("dropped queued registration of {id}");
        }
    }

    pub(crate) fn pop_command(&self) -> Option<Command> {
        self.state.commands.borrow_mut().pop_front()
    }

    pub(crate) fn discard_commands(&self) -> usize {
        let mut commands = self.state.commands.borrow_mut();
        let n = commands.len();
        commands.clear();
        n
    }

    pub(crate) fn take_next_scene(&self) -> Option<NextScene> {
        self.state.next_scene.borrow_mut().take()
    }
}

/// A component's view of the scheduler, tied to its own identity.
#[derive(Clone, Debug)]
pub struct Context {
    handle: Handle,
    id: ComponentId,
    children: Rc<RefCell<Vec<ComponentId>>>,
}

impl Context {
    pub(crate) fn new(handle: Handle, id: ComponentId) -> Self {
        Self {
            handle,
            id,
            children: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// This component's last rendered location.
    pub fn location(&self) -> Option<Rectangle> {
        self.handle.location_of(self.id)
    }

    /// Registers an overlay positioned relative to this component.
    ///
    /// The overlay is released when this component is detached.
    pub fn register(&self, element: Element, location: Rectangle) -> Result<ComponentId> {
        let id = self
            .handle
            .register_component(element, Some(location), Some(self.id))?;
        self.children.borrow_mut().push(id);
        Ok(id)
    }

    pub fn unregister(&self, id: ComponentId) {
        self.handle.unregister_component(id);
        self.children.borrow_mut().retain(|c| *c != id);
    }

    /// Removes this component itself from the overlay layer.
    pub fn dismiss(&self) {
        self.handle.unregister_component(self.id);
    }

    pub fn children(&self) -> Vec<ComponentId> {
        self.children.borrow().clone()
    }

    pub fn enable_unicode(&self) -> bool {
        self.handle.enable_unicode()
    }
}
