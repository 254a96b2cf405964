use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use glyphtree_core::geometry::Rectangle;
use glyphtree_core::input::InputEvent;
use glyphtree_core::surface::DrawOptions;
use glyphtree_core::surface::Surface;
use unicode_width::UnicodeWidthStr;

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
use crate::state::set_prop;
use crate::widgets::MenuItem;
use crate::widgets::PopoverMenu;

type ChangeSlot = Rc<RefCell<Option<Box<dyn FnMut(&Context, &str)>>>>;

#[derive(Debug, Default)]
struct SelectState {
    options: Vec<String>,
    selected: usize,
    rendered: bool,
}

/// A drop-down choice drawn as `[value v]`.
///
/// Activating it opens a [`PopoverMenu`] of the options just below it.
pub struct SelectInput {
    state: Shared<SelectState>,
    hotkey: Option<char>,
    on_click: OnClick,
    on_change: ChangeSlot,
    open: Rc<Cell<Option<ComponentId>>>,
    ctx: Option<Context>,
}

impl SelectInput {
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            state: Shared::new(SelectState {
                options: options.into_iter().map(Into::into).collect(),
                ..SelectState::default()
            }),
            hotkey: None,
            on_click: OnClick::default(),
            on_change: Rc::new(RefCell::new(None)),
            open: Rc::new(Cell::new(None)),
            ctx: None,
        }
    }

    pub fn selected(self, index: usize) -> Self {
        {
            let mut state = self.state.lock();
            if index < state.options.len() {
                state.selected = index;
            }
        }
        self
    }

    pub fn hotkey(mut self, hotkey: char) -> Self {
        self.hotkey = Some(hotkey);
        self
    }

    /// Runs with the select's context and the newly chosen value.
    pub fn on_change(self, callback: impl FnMut(&Context, &str) + 'static) -> Self {
        *self.on_change.borrow_mut() = Some(Box::new(callback));
        self
    }

    pub fn handle(&self) -> SelectHandle {
        SelectHandle {
            state: self.state.clone(),
        }
    }
}

fn open_menu(
    ctx: &Context,
    state: &Shared<SelectState>,
    on_change: &ChangeSlot,
    open: &Rc<Cell<Option<ComponentId>>>,
) {
    if let Some(previous) = open.take() {
        ctx.unregister(previous);
    }
    let options = state.lock().options.clone();
    let items = options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let (state, on_change, select) = (state.clone(), on_change.clone(), ctx.clone());
            MenuItem::entry(option.replace('&', "&&"), move |_, _| {
                choose(&select, &state, &on_change, index);
            })
        })
        .collect();

    let menu = PopoverMenu::new(items);
    let location = menu.size().offset(1, 0);
    match ctx.register(Element::new(menu), location) {
        Ok(id) => open.set(Some(id)),
        Err(err) => log::warn!("could not open select menu: {err}"),
    }
}

fn choose(ctx: &Context, state: &Shared<SelectState>, on_change: &ChangeSlot, index: usize) {
    let value = {
        let mut guard = state.lock();
        let state = &mut *guard;
        let Some(value) = state.options.get(index).cloned() else {
            return;
        };
        set_prop(&mut state.rendered, &mut state.selected, index);
        value
    };
    if let Some(callback) = on_change.borrow_mut().as_mut() {
        callback(ctx, &value);
    }
}

impl Component for SelectInput {
    fn attach(&mut self, ctx: &Context) {
        let (state, on_change, open) = (self.state.clone(), self.on_change.clone(), self.open.clone());
        self.on_click.set(move |ctx, button| {
            if !button.is_activation() {
                return false;
            }
            open_menu(ctx, &state, &on_change, &open);
            true
        });
        self.ctx = Some(ctx.clone());
    }

    fn detach(&mut self) {
        self.on_click.clear();
        self.open.set(None);
        self.ctx = None;
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let mut state = self.state.lock();
        surface.clear();
        let value = state.options.get(state.selected).map_or("", String::as_str);
        let options = DrawOptions::default();
        surface.draw_string(0, 0, "[", &options);
        surface.draw_string(0, 1, value, &options);
        let x = surface.width() - 3;
        surface.draw_string(0, x, " v]", &options);
        state.rendered = true;
    }

    fn dirty(&self) -> bool {
        !self.state.lock().rendered
    }

    fn bounds(&self) -> Option<Rectangle> {
        let state = self.state.lock();
        let widest = state
            .options
            .iter()
            .map(|o| UnicodeWidthStr::width(o.as_str()))
            .max()
            .unwrap_or(0);
        Some(Rectangle::sized(1, widest as i32 + 4))
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
pub struct SelectHandle {
    state: Shared<SelectState>,
}

impl SelectHandle {
    pub fn selected(&self) -> usize {
        self.state.lock().selected
    }

    pub fn value(&self) -> Option<String> {
        let state = self.state.lock();
        state.options.get(state.selected).cloned()
    }

    /// Out-of-range indexes are ignored.
    pub fn set_selected(&self, index: usize) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if index < state.options.len() {
            set_prop(&mut state.rendered, &mut state.selected, index);
        }
    }
}
