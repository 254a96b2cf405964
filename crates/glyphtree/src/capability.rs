//! Reusable input behaviors.
//!
//! A widget that reacts to activation holds an [`OnClick`] plus any number of [`Behavior`]s and
//! runs them through [`dispatch`] from its `handle_input`. Each behavior either consumes the event
//! or passes it to the next one in the chain.

use std::fmt;

use glyphtree_core::input::Button;
use glyphtree_core::input::InputEvent;
use glyphtree_core::keymap::matches_hotkey;

use crate::component::InputResult;
use crate::context::Context;

type ClickCallback = Box<dyn FnMut(&Context, Button) -> bool>;

/// The activation callback shared by every behavior of one widget.
///
/// The callback returns whether it took the event; `false` lets it fall through to whatever comes
/// after the widget.
#[derive(Default)]
pub struct OnClick {
    callback: Option<ClickCallback>,
}

impl fmt::Debug for OnClick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnClick")
            .field("set", &self.callback.is_some())
            .finish()
    }
}

impl OnClick {
    pub fn new(callback: impl FnMut(&Context, Button) -> bool + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    pub fn set(&mut self, callback: impl FnMut(&Context, Button) -> bool + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn clear(&mut self) {
        self.callback = None;
    }

    pub fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    /// Runs the callback. `None` when no callback is set.
    pub fn fire(&mut self, ctx: &Context, button: Button) -> Option<bool> {
        self.callback.as_mut().map(|cb| cb(ctx, button))
    }
}

pub trait Behavior {
    /// `Some` consumes the event with that result; `None` passes it on.
    fn handle(
        &mut self,
        event: &InputEvent,
        on_click: &mut OnClick,
        ctx: &Context,
    ) -> Option<InputResult>;
}

fn activate(on_click: &mut OnClick, ctx: &Context, button: Button) -> Option<InputResult> {
    match on_click.fire(ctx, button) {
        None | Some(true) => Some(InputResult::Handled),
        Some(false) => None,
    }
}

/// Mouse clicks inside the widget activate it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clickable;

impl Behavior for Clickable {
    fn handle(
        &mut self,
        event: &InputEvent,
        on_click: &mut OnClick,
        ctx: &Context,
    ) -> Option<InputResult> {
        match *event {
            InputEvent::Mouse { button, .. } => activate(on_click, ctx, button),
            _ => None,
        }
    }
}

/// A key press matching the hotkey activates the widget with [`Button::Key`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Hotkeyable {
    pub hotkey: Option<char>,
}

impl Hotkeyable {
    pub fn new(hotkey: Option<char>) -> Self {
        Self { hotkey }
    }
}

impl Behavior for Hotkeyable {
    fn handle(
        &mut self,
        event: &InputEvent,
        on_click: &mut OnClick,
        ctx: &Context,
    ) -> Option<InputResult> {
        match event {
            InputEvent::Keyboard(key) if matches_hotkey(self.hotkey, key) => {
                activate(on_click, ctx, Button::Key)
            }
            _ => None,
        }
    }
}

/// Runs `chain` in order; the first behavior that consumes the event wins.
pub fn dispatch(
    chain: &mut [&mut dyn Behavior],
    event: &InputEvent,
    on_click: &mut OnClick,
    ctx: &Context,
) -> Option<InputResult> {
    chain
        .iter_mut()
        .find_map(|behavior| behavior.handle(event, on_click, ctx))
}
