//! The main loop.
//!
//! One cycle runs, in order:
//!
//! 1. a pending scene change (teardown of the old tree, creation of the new one);
//! 2. as many fixed-rate ticks as have elapsed;
//! 3. queued overlay registrations and removals;
//! 4. a repaint, if anything is dirty or a full repaint was forced;
//! 5. at most one input event, dispatched to overlays (newest first), then the tree, then
//!    deferred claims, then the scene;
//! 6. the idle callback, in realtime mode, when nothing else happened.
//!
//! Everything runs on the calling thread. Widget state shared with other threads is guarded per
//! widget (see [`crate::state::Shared`]).

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use std::time::Instant;

use glyphtree_core::display::Display;
use glyphtree_core::geometry::Rectangle;
use glyphtree_core::input::DriverInput;
use glyphtree_core::input::InputEvent;
use glyphtree_core::input::MouseButton;
use glyphtree_core::surface::Screen;

use crate::component::ComponentId;
use crate::component::DeferredInput;
use crate::component::Element;
use crate::component::InputResult;
use crate::context::Command;
use crate::context::Handle;
use crate::context::NextScene;
use crate::context::Overlay;
use crate::error::Error;
use crate::error::Result;
use crate::scene::Scene;
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Poll for input instead of blocking, and run the idle callback on quiet cycles.
    pub realtime: bool,
    pub tick_rate: Duration,
    /// Longest press-to-release time that still counts as a click.
    pub click_timeout: Duration,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            realtime: false,
            tick_rate: Duration::from_secs(1) / 12,
            click_timeout: Duration::from_secs(1),
        }
    }
}

impl SchedulerOptions {
    pub fn realtime() -> Self {
        Self {
            realtime: true,
            ..Self::default()
        }
    }
}

/// Turns press/release pairs into clicks.
///
/// A release is a click only at the same cell as the press, within the timeout. Anything else
/// (a drag, a stale press, a release without a press) produces nothing.
#[derive(Clone, Debug)]
pub struct ClickTracker {
    timeout: Duration,
    presses: HashMap<MouseButton, (i32, i32, Instant)>,
}

impl ClickTracker {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            presses: HashMap::new(),
        }
    }

    pub fn press(&mut self, button: MouseButton, x: i32, y: i32, at: Instant) {
        self.presses.insert(button, (x, y, at));
    }

    pub fn release(&mut self, button: MouseButton, x: i32, y: i32, at: Instant) -> Option<InputEvent> {
        let (px, py, pressed) = self.presses.remove(&button)?;
        if (px, py) != (x, y) || at.saturating_duration_since(pressed) >= self.timeout {
            return None;
        }
        Some(InputEvent::click(x, y, button.into()))
    }
}

pub type IdleCallback<D> = Box<dyn FnMut(&mut MainLoop<D>)>;

#[derive(Clone, Copy)]
enum Slot {
    Overlay(ComponentId),
    Root,
}

pub struct MainLoop<D: Display> {
    screen: Screen<D>,
    handle: Handle,
    options: SchedulerOptions,
    scene: Option<Box<dyn Scene>>,
    root: Option<Element>,
    force_repaint: bool,
    last_tick: Instant,
    clicks: ClickTracker,
    idle: Option<IdleCallback<D>>,
}

impl<D: Display> fmt::Debug for MainLoop<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainLoop")
            .field("options", &self.options)
            .field("has_scene", &self.scene.is_some())
            .field("root", &self.root)
            .field("overlays", &self.overlay_ids())
            .finish()
    }
}

impl<D: Display> MainLoop<D> {
    pub fn new(display: D, options: SchedulerOptions) -> Self {
        let screen = Screen::new(display);
        let handle = Handle::new(Settings::with_glyphs(screen.glyph_support()));
        Self {
            screen,
            handle,
            options,
            scene: None,
            root: None,
            force_repaint: false,
            last_tick: Instant::now(),
            clicks: ClickTracker::new(options.click_timeout),
            idle: None,
        }
    }

    /// Installs a callback run on cycles with no input and nothing to repaint.
    pub fn with_idle(mut self, idle: impl FnMut(&mut MainLoop<D>) + 'static) -> Result<Self> {
        if !self.options.realtime {
            return Err(Error::IdleRequiresRealtime);
        }
        self.idle = Some(Box::new(idle));
        Ok(self)
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn options(&self) -> SchedulerOptions {
        self.options
    }

    pub fn display(&self) -> &D {
        self.screen.display()
    }

    pub fn display_mut(&mut self) -> &mut D {
        self.screen.display_mut()
    }

    pub fn change_scene(&self, scene: impl Scene + 'static) {
        self.handle.change_scene(scene);
    }

    pub fn exit(&self) {
        self.handle.exit();
    }

    /// Registers an overlay and applies the registration immediately.
    pub fn register_component(
        &mut self,
        element: Element,
        location: Option<Rectangle>,
        parent: Option<ComponentId>,
    ) -> Result<ComponentId> {
        let id = self.handle.register_component(element, location, parent)?;
        self.apply_commands();
        Ok(id)
    }

    pub fn unregister_component(&mut self, id: ComponentId) {
        self.handle.unregister_component(id);
        self.apply_commands();
    }

    pub fn is_running(&self) -> bool {
        self.scene.is_some() || self.handle.has_pending_scene()
    }

    /// Registered overlays, oldest first.
    pub fn overlay_ids(&self) -> Vec<ComponentId> {
        self.handle.overlay_ids()
    }

    pub fn is_registered(&self, id: ComponentId) -> bool {
        self.handle.overlay_ids().contains(&id)
    }

    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Runs cycles until the application exits.
    pub fn run(&mut self) {
        while self.run_cycle(Instant::now()) {}
        self.screen.clear();
        self.screen.refresh();
    }

    /// Runs one cycle as of `now`. Returns whether the loop should keep going.
    pub fn run_cycle(&mut self, now: Instant) -> bool {
        self.apply_scene_change(now);
        self.run_ticks(now);
        self.apply_commands();
        self.paint();

        let mut had_event = false;
        if self.scene.is_some() {
            let timeout = self.options.realtime.then(|| {
                self.options
                    .tick_rate
                    .saturating_sub(now.saturating_duration_since(self.last_tick))
            });
            if let Some(input) = self.screen.display_mut().read_input(timeout) {
                if let Some(event) = self.translate(input, Instant::now().max(now)) {
                    had_event = true;
                    self.dispatch(&event);
                }
            }
        }
        self.apply_commands();

        if self.scene.is_some() && !had_event && !self.force_repaint {
            if let Some(mut idle) = self.idle.take() {
                idle(self);
                if self.idle.is_none() {
                    self.idle = Some(idle);
                }
            }
        }

        self.is_running()
    }

    fn apply_scene_change(&mut self, now: Instant) {
        let Some(next) = self.handle.take_next_scene() else {
            return;
        };
        if let Some(mut old) = self.scene.take() {
            old.destroy(&self.handle);
        }
        let overlays = std::mem::take(&mut *self.handle.overlays_mut());
        for mut overlay in overlays.into_iter().rev() {
            overlay.element.detach();
        }
        if let Some(mut root) = self.root.take() {
            root.detach();
        }
        let dropped = self.handle.discard_commands();
        if dropped > 0 {
            log::debug!("dropped {dropped} queued overlay commands from the old scene");
        }
        self.last_tick = now;

        match next {
            NextScene::Exit => log::debug!("exiting main loop"),
            NextScene::Enter(mut scene) => {
                log::debug!("entering new scene");
                self.root = scene.create(&self.handle).map(|mut root| {
                    root.attach(&self.handle);
                    root
                });
                self.scene = Some(scene);
            }
        }
        self.force_repaint = true;
    }

    fn run_ticks(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        if self.options.tick_rate.is_zero() || elapsed < self.options.tick_rate {
            return;
        }
        let ticks = elapsed.as_nanos() / self.options.tick_rate.as_nanos();
        self.last_tick = now;
        for _ in 0..ticks {
            if let Some(scene) = self.scene.as_mut() {
                scene.tick(&self.handle);
            }
            if let Some(root) = self.root.as_mut() {
                root.tick();
            }
            for overlay in self.handle.overlays_mut().iter_mut() {
                overlay.element.tick();
            }
        }
    }

    /// Applies queued registry commands, including any queued while applying.
    fn apply_commands(&mut self) {
        while let Some(command) = self.handle.pop_command() {
            match command {
                Command::Register {
                    mut element,
                    location,
                    parent,
                } => {
                    if self.scene.is_none() {
                        log::warn!("no active scene; dropping overlay {}", element.id());
                        continue;
                    }
                    log::debug!("registering overlay {} (parent {parent:?})", element.id());
                    element.attach(&self.handle);
                    self.handle.overlays_mut().push(Overlay {
                        element,
                        location,
                        parent,
                    });
                    self.force_repaint = true;
                }
                Command::Unregister(id) => self.handle.release_overlay(id),
            }
        }
        if self.handle.take_overlays_removed() {
            self.force_repaint = true;
        }
    }

    fn paint(&mut self) {
        if self.handle.take_overlays_removed() {
            self.force_repaint = true;
        }
        let dirty = self.root.as_ref().is_some_and(Element::dirty)
            || self.handle.overlays_mut().iter().any(|o| o.element.dirty());
        if !self.force_repaint && !dirty {
            return;
        }
        if self.force_repaint {
            self.screen.clear();
        }

        let screen = self.screen.bounds();
        let handle = &self.handle;
        let mut surface = self.screen.surface();
        if let Some(root) = self.root.as_mut() {
            root.render(&mut surface, screen);
        }
        // Overlays after the tree: they float above it and position against their parents.
        for overlay in self.handle.overlays_mut().iter_mut() {
            let anchor = overlay
                .parent
                .and_then(|p| handle.location_of(p))
                .unwrap_or(screen);
            let rect = overlay
                .location
                .unwrap_or(screen)
                .offset(anchor.top, anchor.left)
                .clip(&screen);
            overlay.element.render(&mut surface, rect);
        }
        self.screen.refresh();
        self.force_repaint = false;
    }

    fn translate(&mut self, input: DriverInput, at: Instant) -> Option<InputEvent> {
        match input {
            DriverInput::Key(key) => Some(InputEvent::Keyboard(key)),
            DriverInput::Press { button, x, y } => {
                self.clicks.press(button, x, y, at);
                None
            }
            DriverInput::Release { button, x, y } => self.clicks.release(button, x, y, at),
            DriverInput::Scroll { direction, x, y } => Some(InputEvent::Scroll { x, y, direction }),
            DriverInput::Resize => {
                self.force_repaint = true;
                None
            }
        }
    }

    fn dispatch(&mut self, event: &InputEvent) {
        log::trace!("dispatching {event:?}");
        let mut deferred: Vec<(Slot, DeferredInput)> = Vec::new();

        // Removals requested by overlays while the registry is borrowed here are queued.
        for overlay in self.handle.overlays_mut().iter_mut().rev() {
            match overlay.element.handle_input(event) {
                InputResult::Handled => return,
                InputResult::Ignored => {}
                InputResult::Deferred(d) => deferred.push((Slot::Overlay(overlay.element.id()), d)),
            }
        }
        if let Some(root) = self.root.as_mut() {
            match root.handle_input(event) {
                InputResult::Handled => return,
                InputResult::Ignored => {}
                InputResult::Deferred(d) => deferred.push((Slot::Root, d)),
            }
        }

        for (slot, d) in deferred {
            let claimed = match slot {
                Slot::Root => self.root.as_mut().is_some_and(|e| e.retry_input(&d, event)),
                Slot::Overlay(id) => self
                    .handle
                    .overlays_mut()
                    .iter_mut()
                    .find(|o| o.element.id() == id)
                    .is_some_and(|o| o.element.retry_input(&d, event)),
            };
            if claimed {
                log::trace!("deferred claim by {} took the event", d.owner());
                return;
            }
        }

        if let Some(scene) = self.scene.as_mut() {
            if !scene.handle_input(event, &self.handle) {
                log::trace!("event went unhandled");
            }
        }
    }
}
