//! Popover menus.
//!
//! A [`PopoverMenu`] is meant to be registered as an overlay. Choosing an entry closes the whole
//! chain of open menus (the root and every submenu under it) and runs the entry's callback; with
//! animation enabled the chosen entry blinks for a short while first, and the menu swallows all
//! input until it is gone.

use std::cell::Cell;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glyphtree_core::geometry::Rectangle;
use glyphtree_core::input::Button;
use glyphtree_core::input::InputEvent;
use glyphtree_core::input::KeyCode;
use glyphtree_core::keymap::text_to_hotkeys;
use glyphtree_core::markup;
use glyphtree_core::surface::DrawOptions;
use glyphtree_core::surface::Surface;
use glyphtree_core::surface::TextStyle;

use crate::capability::Clickable;
use crate::capability::Hotkeyable;
use crate::capability::OnClick;
use crate::capability::dispatch;
use crate::component::Component;
use crate::component::ComponentId;
use crate::component::Element;
use crate::component::InputResult;
use crate::context::Context;
use crate::state::Shared;
use crate::widgets::Border;
use crate::widgets::Direction;
use crate::widgets::List;

/// Ticks the chosen entry blinks before an animated menu closes.
const CLOSE_DELAY_TICKS: u32 = 12;

/// Runs with the menu's context and the entry's label as written (hotkey markers included).
pub type MenuCallback = Rc<RefCell<dyn FnMut(&Context, &str)>>;

#[derive(Clone)]
pub enum MenuItem {
    Entry {
        label: String,
        callback: MenuCallback,
    },
    Submenu {
        label: String,
        items: Vec<MenuItem>,
    },
    Separator,
}

impl MenuItem {
    pub fn entry(label: impl Into<String>, callback: impl FnMut(&Context, &str) + 'static) -> Self {
        MenuItem::Entry {
            label: label.into(),
            callback: Rc::new(RefCell::new(callback)),
        }
    }

    pub fn submenu(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        MenuItem::Submenu {
            label: label.into(),
            items,
        }
    }

    pub fn separator() -> Self {
        MenuItem::Separator
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Entry { label, .. } => f.debug_tuple("Entry").field(label).finish(),
            MenuItem::Submenu { label, items } => {
                f.debug_tuple("Submenu").field(label).field(items).finish()
            }
            MenuItem::Separator => f.write_str("Separator"),
        }
    }
}

#[derive(Debug, Default)]
struct EntryState {
    text: String,
    expandable: bool,
    animating: bool,
    spot: u32,
    rendered: bool,
}

/// One row of a menu: a hotkey-marked caption, plus a `>` marker when it opens a submenu.
pub struct MenuEntry {
    state: Shared<EntryState>,
    hotkey: Option<char>,
    on_click: OnClick,
    ctx: Option<Context>,
}

impl MenuEntry {
    pub fn new(text: &str) -> Self {
        let (markup, hotkey) = text_to_hotkeys(text);
        Self {
            state: Shared::new(EntryState {
                text: markup,
                ..EntryState::default()
            }),
            hotkey,
            on_click: OnClick::default(),
            ctx: None,
        }
    }

    pub fn expandable(self, expandable: bool) -> Self {
        self.state.lock().expandable = expandable;
        self
    }

    pub fn on_click(mut self, callback: impl FnMut(&Context, Button) -> bool + 'static) -> Self {
        self.on_click.set(callback);
        self
    }

    pub fn handle(&self) -> MenuEntryHandle {
        MenuEntryHandle {
            state: self.state.clone(),
        }
    }
}

impl Component for MenuEntry {
    fn attach(&mut self, ctx: &Context) {
        self.ctx = Some(ctx.clone());
    }

    fn detach(&mut self) {
        self.ctx = None;
    }

    fn tick(&mut self) {
        let mut state = self.state.lock();
        if state.animating {
            state.spot += 1;
            state.rendered = false;
        }
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let mut state = self.state.lock();
        let invert = state.animating && state.spot % 2 == 1;
        if invert {
            surface.fill(TextStyle::inverted());
        } else {
            surface.clear();
        }
        let options = DrawOptions::styled(TextStyle::default().with_invert(invert));
        surface.draw_formatted_string(0, 0, &format!(" {} ", state.text), &options);
        if state.expandable {
            let x = surface.width() - 2;
            surface.draw_string(0, x, " >", &options);
        }
        state.rendered = true;
    }

    fn dirty(&self) -> bool {
        !self.state.lock().rendered
    }

    fn bounds(&self) -> Option<Rectangle> {
        let state = self.state.lock();
        let marker = if state.expandable { 3 } else { 2 };
        let width = markup::formatted_string_length(&state.text) + marker;
        Some(Rectangle::sized(1, width as i32))
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        let Some(ctx) = &self.ctx else {
            return InputResult::Ignored;
        };
        let mut hotkey = Hotkeyable::new(self.hotkey);
        dispatch(&mut [&mut hotkey, &mut Clickable], event, &mut self.on_click, ctx)
            .unwrap_or(InputResult::Ignored)
    }
}

#[derive(Clone, Debug)]
pub struct MenuEntryHandle {
    state: Shared<EntryState>,
}

impl MenuEntryHandle {
    /// Starts or stops the blink. A started blink shows inverted first.
    pub fn set_animating(&self, animating: bool) {
        let mut state = self.state.lock();
        state.animating = animating;
        state.spot = u32::from(animating);
        state.rendered = false;
    }

    pub fn is_animating(&self) -> bool {
        self.state.lock().animating
    }
}

/// A horizontal rule between menu entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct MenuSeparator;

impl Component for MenuSeparator {
    fn render(&mut self, surface: &mut Surface<'_>) {
        let rule = if surface.glyph_support().is_extended() {
            "─"
        } else {
            "-"
        };
        surface.clear();
        let line = rule.repeat(surface.width().max(0) as usize);
        surface.draw_string(0, 0, &line, &DrawOptions::default());
    }

    fn bounds(&self) -> Option<Rectangle> {
        Some(Rectangle::sized(1, 0))
    }
}

/// State shared by every menu of one open chain.
#[derive(Debug, Default)]
struct Chain {
    closing: Cell<bool>,
    root: Cell<Option<ComponentId>>,
}

struct PendingClose {
    delay: u32,
    label: String,
    callback: MenuCallback,
}

struct MenuNode {
    ctx: Option<Context>,
    chain: Rc<Chain>,
    is_root: bool,
    animated: bool,
    pending: Option<PendingClose>,
    submenu: Option<ComponentId>,
    width: i32,
}

impl MenuNode {
    /// Closes the whole chain, or only this menu and what hangs off it.
    fn close(&self, whole_chain: bool) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        match self.chain.root.get() {
            Some(root) if whole_chain => ctx.handle().unregister_component(root),
            _ => ctx.dismiss(),
        }
    }
}

fn invoke(callback: &MenuCallback, ctx: &Context, label: &str) {
    let mut f = callback.borrow_mut();
    (&mut *f)(ctx, label);
}

fn choose_entry(
    node: &Rc<RefCell<MenuNode>>,
    entry: &MenuEntryHandle,
    button: Button,
    label: &str,
    callback: &MenuCallback,
) -> bool {
    if !button.is_activation() {
        return false;
    }
    let mut n = node.borrow_mut();
    if n.animated {
        entry.set_animating(true);
        n.chain.closing.set(true);
        n.pending = Some(PendingClose {
            delay: CLOSE_DELAY_TICKS,
            label: label.to_string(),
            callback: callback.clone(),
        });
        return true;
    }
    let ctx = n.ctx.clone();
    drop(n);
    if let Some(ctx) = ctx {
        invoke(callback, &ctx, label);
    }
    node.borrow().close(true);
    true
}

fn open_submenu(node: &Rc<RefCell<MenuNode>>, index: usize, items: &[MenuItem], button: Button) -> bool {
    if !button.is_activation() {
        return false;
    }
    let mut n = node.borrow_mut();
    let Some(ctx) = n.ctx.clone() else {
        return true;
    };
    if let Some(previous) = n.submenu.take() {
        ctx.unregister(previous);
    }
    let submenu = PopoverMenu::build(items.to_vec(), n.chain.clone(), n.animated, false);
    let location = submenu.size.offset(index as i32, n.width);
    match ctx.register(Element::new(submenu), location) {
        Ok(id) => n.submenu = Some(id),
        Err(err) => log::warn!("could not open submenu: {err}"),
    }
    true
}

/// A bordered list of [`MenuItem`]s.
///
/// Register it as an overlay at [`PopoverMenu::size`] offset to where it should appear.
pub struct PopoverMenu {
    frame: Element,
    node: Rc<RefCell<MenuNode>>,
    size: Rectangle,
}

impl PopoverMenu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self::build(items, Rc::new(Chain::default()), false, true)
    }

    /// Blink the chosen entry before closing.
    pub fn animated(self, animated: bool) -> Self {
        self.node.borrow_mut().animated = animated;
        self
    }

    /// Height and width of the framed menu.
    pub fn size(&self) -> Rectangle {
        self.size
    }

    fn build(items: Vec<MenuItem>, chain: Rc<Chain>, animated: bool, is_root: bool) -> Self {
        let node = Rc::new(RefCell::new(MenuNode {
            ctx: None,
            chain,
            is_root,
            animated,
            pending: None,
            submenu: None,
            width: 0,
        }));

        let rows = items.len() as i32;
        let mut list = List::new(Direction::TopToBottom).size(1);
        let mut width = 0;
        for (index, item) in items.into_iter().enumerate() {
            let element = match item {
                MenuItem::Separator => Element::new(MenuSeparator),
                MenuItem::Entry { label, callback } => {
                    let entry = MenuEntry::new(&label);
                    let handle = entry.handle();
                    let node = node.clone();
                    Element::new(entry.on_click(move |_, button| {
                        choose_entry(&node, &handle, button, &label, &callback)
                    }))
                }
                MenuItem::Submenu { label, items } => {
                    let node = node.clone();
                    Element::new(
                        MenuEntry::new(&label)
                            .expandable(true)
                            .on_click(move |_, button| open_submenu(&node, index, &items, button)),
                    )
                }
            };
            width = width.max(element.bounds().map_or(0, |b| b.width()));
            list = list.push(element);
        }

        let size = Rectangle::sized(rows + 2, width + 2);
        node.borrow_mut().width = size.width();
        Self {
            frame: Element::new(Border::new(list)),
            node,
            size,
        }
    }
}

impl Component for PopoverMenu {
    fn attach(&mut self, ctx: &Context) {
        {
            let mut node = self.node.borrow_mut();
            if node.is_root {
                node.chain.root.set(Some(ctx.id()));
            }
            node.ctx = Some(ctx.clone());
        }
        self.frame.attach(ctx.handle());
    }

    fn detach(&mut self) {
        self.frame.detach();
        let mut node = self.node.borrow_mut();
        node.ctx = None;
        node.submenu = None;
    }

    fn tick(&mut self) {
        let mut node = self.node.borrow_mut();
        let due = match &mut node.pending {
            Some(pending) => {
                pending.delay = pending.delay.saturating_sub(1);
                pending.delay == 0
            }
            None => false,
        };
        let fire = if due { node.pending.take() } else { None };
        let ctx = node.ctx.clone();
        drop(node);

        if let (Some(pending), Some(ctx)) = (fire, ctx) {
            invoke(&pending.callback, &ctx, &pending.label);
            self.node.borrow().close(true);
        }
        self.frame.tick();
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let area = surface.bounds();
        self.frame.render(surface, area);
    }

    fn dirty(&self) -> bool {
        self.frame.dirty()
    }

    fn bounds(&self) -> Option<Rectangle> {
        Some(self.size)
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        let (closing, is_root) = {
            let node = self.node.borrow();
            (node.chain.closing.get(), node.is_root)
        };
        if closing {
            return InputResult::Handled;
        }

        let result = self.frame.handle_input(event);
        let defocus = matches!(event, InputEvent::Defocus { .. });
        if is_root {
            if !result.is_handled() && (defocus || event.is_key(KeyCode::Esc)) {
                self.node.borrow().close(true);
            }
            return InputResult::Handled;
        }

        // Submenus close on their own and let the event carry on to the menu below.
        if defocus {
            self.node.borrow().close(false);
            return result;
        }
        if !result.is_handled() && event.is_key(KeyCode::Esc) {
            self.node.borrow().close(false);
            return InputResult::Handled;
        }
        match event {
            InputEvent::Mouse { .. } => InputResult::Handled,
            _ => result,
        }
    }
}
