use glyphtree_core::geometry::Rectangle;
use glyphtree_core::input::InputEvent;
use glyphtree_core::keymap::matches_hotkey;
use glyphtree_core::keymap::text_to_hotkeys;
use glyphtree_core::markup;
use glyphtree_core::surface::DrawOptions;
use glyphtree_core::surface::Surface;
use glyphtree_core::surface::TextStyle;

use crate::component::Component;
use crate::component::DeferredInput;
use crate::component::Element;
use crate::component::InputResult;
use crate::component::IntoElement;
use crate::context::Context;

struct Tab {
    title: String,
    hotkey: Option<char>,
    pane: Element,
    /// Columns of the title in the bar, relative to the widget.
    span: (i32, i32),
}

/// A one-row tab bar over the selected tab's pane.
///
/// Titles use `&` hotkey markers. Every pane stays attached and keeps ticking, but only the
/// selected one is drawn and sees input.
#[derive(Default)]
pub struct Tabs {
    tabs: Vec<Tab>,
    selected: usize,
    bar_drawn: bool,
    clear_pending: bool,
    ctx: Option<Context>,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(mut self, title: &str, pane: impl IntoElement) -> Self {
        let (title, hotkey) = text_to_hotkeys(title);
        self.tabs.push(Tab {
            title,
            hotkey,
            pane: pane.into_element(),
            span: (0, 0),
        });
        self
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        if index == self.selected || index >= self.tabs.len() {
            return;
        }
        log::debug!("switching to tab {index}");
        self.selected = index;
        self.bar_drawn = false;
        self.clear_pending = true;
    }

    fn tab_at_column(&self, x: i32) -> Option<usize> {
        self.tabs
            .iter()
            .position(|tab| tab.span.0 <= x && x < tab.span.1)
    }
}

impl Component for Tabs {
    fn attach(&mut self, ctx: &Context) {
        for tab in &mut self.tabs {
            tab.pane.attach(ctx.handle());
        }
        self.ctx = Some(ctx.clone());
    }

    fn detach(&mut self) {
        for tab in &mut self.tabs {
            tab.pane.detach();
        }
        self.ctx = None;
    }

    fn tick(&mut self) {
        for tab in &mut self.tabs {
            tab.pane.tick();
        }
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let (w, h) = (surface.width(), surface.height());
        if self.clear_pending {
            surface.clear();
            self.clear_pending = false;
        }

        let mut bar = surface.clip(Rectangle::new(0, 1, 0, w));
        bar.clear();
        let mut x = 0;
        for (i, tab) in self.tabs.iter_mut().enumerate() {
            let style = TextStyle::default().with_invert(i == self.selected);
            let label = format!(" {} ", tab.title);
            bar.draw_formatted_string(0, x, &label, &DrawOptions::styled(style));
            let width = markup::formatted_string_length(&label) as i32;
            tab.span = (x, x + width);
            x += width;
        }
        self.bar_drawn = true;

        if h > 1 {
            if let Some(tab) = self.tabs.get_mut(self.selected) {
                tab.pane.render(surface, Rectangle::new(1, h, 0, w));
            }
        }
    }

    fn dirty(&self) -> bool {
        !self.bar_drawn
            || self.clear_pending
            || self.tabs.get(self.selected).is_some_and(|t| t.pane.dirty())
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        if let Some(tab) = self.tabs.get_mut(self.selected) {
            match tab.pane.handle_input(event) {
                InputResult::Ignored => {}
                taken => return taken,
            }
        }

        match *event {
            InputEvent::Keyboard(key) => {
                if let Some(i) = self.tabs.iter().position(|t| matches_hotkey(t.hotkey, &key)) {
                    self.select(i);
                    return InputResult::Handled;
                }
            }
            InputEvent::Mouse { x, y, button } if button.is_activation() => {
                let origin = self.ctx.as_ref().and_then(Context::location);
                if let Some(loc) = origin.filter(|loc| y == loc.top) {
                    if let Some(i) = self.tab_at_column(x - loc.left) {
                        self.select(i);
                        return InputResult::Handled;
                    }
                }
            }
            _ => {}
        }
        InputResult::Ignored
    }

    fn retry_input(&mut self, deferred: &DeferredInput, event: &InputEvent) -> bool {
        self.tabs
            .get_mut(self.selected)
            .is_some_and(|tab| tab.pane.retry_input(deferred, event))
    }
}
