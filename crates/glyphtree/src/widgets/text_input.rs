use glyphtree_core::color::Color;
use glyphtree_core::input::InputEvent;
use glyphtree_core::input::KeyCode;
use glyphtree_core::line_edit::EditAction;
use glyphtree_core::line_edit::LineEdit;
use glyphtree_core::surface::DrawOptions;
use glyphtree_core::surface::Surface;
use glyphtree_core::surface::TextStyle;
use glyphtree_core::surface::slice_by_cols;

use crate::component::Component;
use crate::component::InputResult;
use crate::context::Context;
use crate::state::Shared;
use crate::state::set_prop;

type TextCallback = Box<dyn FnMut(&Context, &str)>;

#[derive(Debug, Default)]
struct InputState {
    edit: LineEdit,
    focused: bool,
    color: Color,
    rendered: bool,
}

/// A one-line text field, drawn underlined.
///
/// A click focuses it; a click elsewhere or Escape releases focus. Keys are only taken while
/// focused.
pub struct TextInput {
    state: Shared<InputState>,
    on_change: Option<TextCallback>,
    on_submit: Option<TextCallback>,
    ctx: Option<Context>,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        let mut edit = LineEdit::new();
        edit.set_text(text);
        Self {
            state: Shared::new(InputState {
                edit,
                ..InputState::default()
            }),
            on_change: None,
            on_submit: None,
            ctx: None,
        }
    }

    /// Runs after every edit with the new text.
    pub fn on_change(mut self, callback: impl FnMut(&Context, &str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Runs on Enter.
    pub fn on_submit(mut self, callback: impl FnMut(&Context, &str) + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    pub fn color(self, color: Color) -> Self {
        self.state.lock().color = color;
        self
    }

    pub fn handle(&self) -> TextInputHandle {
        TextInputHandle {
            state: self.state.clone(),
        }
    }

    fn set_focus(&self, focused: bool) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        set_prop(&mut state.rendered, &mut state.focused, focused);
    }
}

impl Component for TextInput {
    fn attach(&mut self, ctx: &Context) {
        self.ctx = Some(ctx.clone());
    }

    fn detach(&mut self) {
        self.ctx = None;
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let mut state = self.state.lock();
        let width = surface.width().max(0);
        state.edit.set_view_width(width as usize);

        let style = TextStyle::fg(state.color).with_underline(true);
        surface.fill(style);
        let visible = slice_by_cols(
            state.edit.text(),
            state.edit.scroll_x() as u32,
            width.min(i32::from(u16::MAX)) as u16,
        );
        surface.draw_string(0, 0, &visible, &DrawOptions::styled(style));

        if state.focused {
            let under = state
                .edit
                .text()
                .chars()
                .nth(state.edit.cursor())
                .unwrap_or(' ');
            let x = state.edit.cursor_view_x() as i32;
            surface.draw_string(
                0,
                x,
                under.encode_utf8(&mut [0; 4]),
                &DrawOptions::styled(style.with_invert(true)),
            );
        }
        state.rendered = true;
    }

    fn dirty(&self) -> bool {
        !self.state.lock().rendered
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        let key = match event {
            InputEvent::Mouse { .. } => {
                self.set_focus(true);
                return InputResult::Handled;
            }
            InputEvent::Defocus { .. } => {
                self.set_focus(false);
                return InputResult::Ignored;
            }
            InputEvent::Keyboard(key) => key,
            InputEvent::Scroll { .. } => return InputResult::Ignored,
        };

        let mut state = self.state.lock();
        if !state.focused {
            return InputResult::Ignored;
        }
        if key.code == KeyCode::Esc {
            state.focused = false;
            state.rendered = false;
            return InputResult::Handled;
        }
        if !LineEdit::accepts(key) {
            return InputResult::Ignored;
        }
        let action = state.edit.input(key);
        state.rendered = false;
        let text = state.edit.text().to_string();
        drop(state);

        let Some(ctx) = &self.ctx else {
            return InputResult::Handled;
        };
        let callback = match &action {
            EditAction::Changed => self.on_change.as_mut().map(|cb| (cb, text.as_str())),
            EditAction::Submitted(submitted) => {
                self.on_submit.as_mut().map(|cb| (cb, submitted.as_str()))
            }
            EditAction::None => None,
        };
        if let Some((cb, value)) = callback {
            cb(ctx, value);
        }
        InputResult::Handled
    }
}

#[derive(Clone, Debug)]
pub struct TextInputHandle {
    state: Shared<InputState>,
}

impl TextInputHandle {
    pub fn text(&self) -> String {
        self.state.lock().edit.text().to_string()
    }

    /// Replaces the text without running `on_change`.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.state.lock();
        if state.edit.text() != text {
            state.edit.set_text(text);
            state.rendered = false;
        }
    }

    pub fn is_focused(&self) -> bool {
        self.state.lock().focused
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glyphtree_core::input::Button;

    use super::*;
    use crate::testing::Harness;

    #[test]
    fn keys_need_focus() {
        let input = TextInput::new("");
        let handle = input.handle();
        let mut h = Harness::new(1, 6);
        let mut el = h.attach(input);
        h.render(&mut el);

        assert_eq!(el.handle_input(&InputEvent::char('a')), InputResult::Ignored);
        assert!(el.handle_input(&InputEvent::click(0, 0, Button::Left)).is_handled());
        assert!(handle.is_focused());
        assert!(el.handle_input(&InputEvent::char('a')).is_handled());
        assert_eq!(handle.text(), "a");

        assert!(el.handle_input(&InputEvent::key(KeyCode::Esc)).is_handled());
        assert!(!handle.is_focused());
        el.handle_input(&InputEvent::click(0, 0, Button::Left));
        el.handle_input(&InputEvent::click(3, 4, Button::Left));
        assert!(!handle.is_focused(), "click elsewhere releases focus");
    }

    #[test]
    fn callbacks_see_each_edit_and_the_submission() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (changes, submits) = (seen.clone(), seen.clone());
        let input = TextInput::new("")
            .on_change(move |_, text| changes.borrow_mut().push(format!("change {text}")))
            .on_submit(move |_, text| submits.borrow_mut().push(format!("submit {text}")));
        let mut h = Harness::new(1, 6);
        let mut el = h.attach(input);
        h.render(&mut el);

        el.handle_input(&InputEvent::click(0, 0, Button::Left));
        for c in "hi".chars() {
            el.handle_input(&InputEvent::char(c));
        }
        el.handle_input(&InputEvent::key(KeyCode::Left));
        el.handle_input(&InputEvent::key(KeyCode::Enter));
        assert_eq!(
            *seen.borrow(),
            vec!["change h", "change hi", "submit hi"]
        );
    }

    #[test]
    fn renders_underlined_with_a_cursor() {
        let mut h = Harness::new(1, 6);
        let mut el = h.attach(TextInput::new("hi"));
        h.render(&mut el);
        assert_eq!(h.row(0), "hi    ");
        assert!(h.display().is_underlined(0, 5));
        assert!(!h.display().is_inverted(0, 2));

        el.handle_input(&InputEvent::click(0, 0, Button::Left));
        assert!(el.dirty());
        h.render(&mut el);
        assert!(h.display().is_inverted(0, 2), "cursor after the text");
    }

    #[test]
    fn long_text_scrolls_to_the_cursor() {
        let mut h = Harness::new(1, 4);
        let mut el = h.attach(TextInput::new("abcdef"));
        h.render(&mut el);
        el.handle_input(&InputEvent::click(0, 0, Button::Left));
        h.render(&mut el);
        assert_eq!(h.row(0), "def ");
        assert!(h.display().is_inverted(0, 3));
    }
}
