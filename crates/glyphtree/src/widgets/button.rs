use glyphtree_core::color::Color;
use glyphtree_core::input;
use glyphtree_core::input::InputEvent;
use glyphtree_core::keymap::text_to_hotkeys;
use glyphtree_core::surface::Surface;

use crate::capability::Clickable;
use crate::capability::Hotkeyable;
use crate::capability::OnClick;
use crate::capability::dispatch;
use crate::component::Component;
use crate::component::Element;
use crate::component::InputResult;
use crate::context::Context;
use crate::state::Shared;
use crate::widgets::Border;
use crate::widgets::BorderHandle;
use crate::widgets::BorderStyle;
use crate::widgets::Label;
use crate::widgets::LabelHandle;
use crate::widgets::Padding;

/// A framed, clickable caption.
///
/// The caption uses `&` hotkey markers: `"&Save"` underlines the `S` and makes `s` activate the
/// button. The frame is double-lined when the display can draw it, ASCII otherwise.
pub struct Button {
    frame: Element,
    label: LabelHandle,
    border: BorderHandle,
    hotkey: Shared<Option<char>>,
    on_click: OnClick,
    ctx: Option<Context>,
}

impl Button {
    pub fn new(text: &str) -> Self {
        let (markup, hotkey) = text_to_hotkeys(text);
        let label = Label::new(markup).formatted(true);
        let label_handle = label.handle();
        let border = Border::new(Padding::new(label).horizontal(1));
        let border_handle = border.handle();
        Self {
            frame: Element::new(border),
            label: label_handle,
            border: border_handle,
            hotkey: Shared::new(hotkey),
            on_click: OnClick::default(),
            ctx: None,
        }
    }

    /// `callback` returns whether it took the activation.
    pub fn on_click(mut self, callback: impl FnMut(&Context, input::Button) -> bool + 'static) -> Self {
        self.on_click.set(callback);
        self
    }

    pub fn color(self, color: Color) -> Self {
        self.label.set_color(color);
        self
    }

    pub fn border_color(self, color: Color) -> Self {
        self.border.set_color(color);
        self
    }

    pub fn hotkey(&self) -> Option<char> {
        *self.hotkey.lock()
    }

    pub fn handle(&self) -> ButtonHandle {
        ButtonHandle {
            label: self.label.clone(),
            border: self.border.clone(),
            hotkey: self.hotkey.clone(),
        }
    }
}

impl Component for Button {
    fn attach(&mut self, ctx: &Context) {
        let style = if ctx.enable_unicode() {
            BorderStyle::Double
        } else {
            BorderStyle::Ascii
        };
        if let Err(err) = self.border.set_style(style, ctx.handle().glyph_support()) {
            log::warn!("button frame keeps its default style: {err}");
        }
        self.frame.attach(ctx.handle());
        self.ctx = Some(ctx.clone());
    }

    fn detach(&mut self) {
        self.frame.detach();
        self.ctx = None;
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let area = surface.bounds();
        self.frame.render(surface, area);
    }

    fn dirty(&self) -> bool {
        self.frame.dirty()
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        let Some(ctx) = &self.ctx else {
            return InputResult::Ignored;
        };
        let mut hotkey = Hotkeyable::new(*self.hotkey.lock());
        dispatch(&mut [&mut hotkey, &mut Clickable], event, &mut self.on_click, ctx)
            .unwrap_or(InputResult::Ignored)
    }
}

#[derive(Clone, Debug)]
pub struct ButtonHandle {
    label: LabelHandle,
    border: BorderHandle,
    hotkey: Shared<Option<char>>,
}

impl ButtonHandle {
    /// Replaces the caption, re-reading its `&` hotkey marker.
    pub fn set_text(&self, text: &str) {
        let (markup, hotkey) = text_to_hotkeys(text);
        *self.hotkey.lock() = hotkey;
        self.label.set_text(markup);
    }

    pub fn set_color(&self, color: Color) {
        self.label.set_color(color);
    }

    pub fn set_border_color(&self, color: Color) {
        self.border.set_color(color);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glyphtree_core::display::GlyphSupport;
    use glyphtree_core::input::KeyCode;

    use super::*;
    use crate::testing::Harness;

    #[test]
    fn frame_follows_glyph_support() {
        let mut h = Harness::new(3, 8);
        let mut el = h.attach(Button::new("&Yes"));
        h.render(&mut el);
        assert_eq!(h.lines(), vec!["╔══════╗", "║ Yes  ║", "╚══════╝"]);
        assert!(h.display().is_underlined(1, 2));
        assert!(!h.display().is_underlined(1, 3));

        let mut h = Harness::with_glyphs(3, 6, GlyphSupport::Basic);
        let mut el = h.attach(Button::new("No"));
        h.render(&mut el);
        assert_eq!(h.lines(), vec!["+----+", "| No |", "+----+"]);
    }

    #[test]
    fn hotkey_and_click_activate() {
        let presses = Rc::new(RefCell::new(Vec::new()));
        let log = presses.clone();
        let button = Button::new("&Save").on_click(move |_, b| {
            log.borrow_mut().push(b);
            true
        });
        assert_eq!(button.hotkey(), Some('s'));

        let mut h = Harness::new(3, 8);
        let mut el = h.attach(button);
        h.render(&mut el);

        assert!(el.handle_input(&InputEvent::char('S')).is_handled());
        assert!(el.handle_input(&InputEvent::click(1, 1, input::Button::Left)).is_handled());
        assert_eq!(
            el.handle_input(&InputEvent::key(KeyCode::Enter)),
            InputResult::Ignored
        );
        assert_eq!(*presses.borrow(), vec![input::Button::Key, input::Button::Left]);
    }

    #[test]
    fn set_text_moves_the_hotkey() {
        let button = Button::new("&One");
        let handle = button.handle();
        let mut h = Harness::new(3, 8);
        let mut el = h.attach(button);
        h.render(&mut el);

        handle.set_text("T&wo");
        assert!(el.dirty());
        assert_eq!(el.handle_input(&InputEvent::char('o')), InputResult::Ignored);
        assert!(el.handle_input(&InputEvent::char('w')).is_handled());
        h.render(&mut el);
        assert_eq!(h.row(1), "║ Two  ║");
    }
}
