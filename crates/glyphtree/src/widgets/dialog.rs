use std::cell::RefCell;
use std::rc::Rc;

use glyphtree_core::input::InputEvent;
use glyphtree_core::input::KeyCode;
use glyphtree_core::surface::Surface;
use glyphtree_core::wrapping::WrapMode;

use crate::component::Component;
use crate::component::Element;
use crate::component::InputResult;
use crate::context::Context;
use crate::widgets::Border;
use crate::widgets::Button;
use crate::widgets::Direction;
use crate::widgets::Label;
use crate::widgets::List;
use crate::widgets::Padding;
use crate::widgets::Sticky;
use crate::widgets::StickyEdge;

type OptionCallback = Rc<RefCell<dyn FnMut(&Context, &str)>>;

/// A modal message with a row of option buttons.
///
/// Option labels use `&` hotkey markers. Callbacks receive the dialog's context (so they can
/// [`Context::dismiss`] it) and the label as written. The dialog takes every event while it is
/// on screen.
pub struct DialogBox {
    text: String,
    options: Vec<(String, OptionCallback)>,
    escape: Option<String>,
    padding: i32,
    body: Option<Element>,
    ctx: Option<Context>,
}

impl DialogBox {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
            escape: None,
            padding: 5,
            body: None,
            ctx: None,
        }
    }

    pub fn option(
        mut self,
        label: impl Into<String>,
        callback: impl FnMut(&Context, &str) + 'static,
    ) -> Self {
        self.options
            .push((label.into(), Rc::new(RefCell::new(callback))));
        self
    }

    /// Escape activates the option with this label.
    pub fn with_escape(mut self, label: impl Into<String>) -> Self {
        self.escape = Some(label.into());
        self
    }

    /// Space between the dialog frame and the edge of its area.
    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    fn build(&self, ctx: &Context) -> Element {
        let mut buttons = List::new(Direction::LeftToRight);
        for (label, callback) in &self.options {
            let (ctx, label, callback) = (ctx.clone(), label.clone(), callback.clone());
            let button = Button::new(&label).on_click(move |_, button| {
                if !button.is_activation() {
                    return false;
                }
                run_option(&callback, &ctx, &label);
                true
            });
            buttons = buttons.push(Padding::new(button).horizontal(1));
        }
        let message = Label::new(self.text.clone()).wrap(WrapMode::Word);
        let content = Sticky::new(buttons, message, StickyEdge::Bottom, 3);
        Element::new(Padding::new(Border::new(Padding::new(content).all(1))).all(self.padding))
    }

    fn escape(&self) {
        let (Some(label), Some(ctx)) = (&self.escape, &self.ctx) else {
            return;
        };
        match self.options.iter().find(|(l, _)| l == label) {
            Some((label, callback)) => run_option(callback, ctx, label),
            None => log::warn!("dialog escape option {label:?} is not one of its options"),
        }
    }
}

fn run_option(callback: &OptionCallback, ctx: &Context, label: &str) {
    let mut f = callback.borrow_mut();
    (&mut *f)(ctx, label);
}

impl Component for DialogBox {
    fn attach(&mut self, ctx: &Context) {
        let mut body = self.build(ctx);
        body.attach(ctx.handle());
        self.body = Some(body);
        self.ctx = Some(ctx.clone());
    }

    fn detach(&mut self) {
        if let Some(mut body) = self.body.take() {
            body.detach();
        }
        self.ctx = None;
    }

    fn tick(&mut self) {
        if let Some(body) = &mut self.body {
            body.tick();
        }
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let area = surface.bounds();
        if let Some(body) = &mut self.body {
            body.render(surface, area);
        }
    }

    fn dirty(&self) -> bool {
        self.body.as_ref().is_some_and(Element::dirty)
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        let taken = self
            .body
            .as_mut()
            .is_some_and(|body| body.handle_input(event).is_handled());
        if !taken && event.is_key(KeyCode::Esc) {
            self.escape();
        }
        InputResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use glyphtree_core::input;

    use super::*;
    use crate::testing::Harness;

    fn dialog(seen: &Rc<RefCell<Vec<String>>>) -> DialogBox {
        let (yes, no) = (seen.clone(), seen.clone());
        DialogBox::new("Delete?")
            .option("&Yes", move |_, label| yes.borrow_mut().push(label.to_string()))
            .option("&No", move |_, label| no.borrow_mut().push(label.to_string()))
            .with_padding(0)
    }

    #[test]
    fn lays_out_text_above_buttons() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut h = Harness::new(10, 24);
        let mut el = h.attach(dialog(&seen));
        h.render(&mut el);
        let lines = h.lines();
        assert_eq!(lines[2], "  Delete?");
        assert_eq!(lines[5], "   ╔══════╗  ╔══════╗");
        assert_eq!(lines[6], "   ║ Yes  ║  ║ No   ║");
        assert_eq!(lines[7], "   ╚══════╝  ╚══════╝");
    }

    #[test]
    fn options_fire_on_activation_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut h = Harness::new(10, 24);
        let mut el = h.attach(dialog(&seen));
        h.render(&mut el);

        assert!(el.handle_input(&InputEvent::click(5, 6, input::Button::Right)).is_handled());
        assert!(seen.borrow().is_empty());
        el.handle_input(&InputEvent::click(5, 6, input::Button::Left));
        el.handle_input(&InputEvent::char('n'));
        assert_eq!(*seen.borrow(), vec!["&Yes".to_string(), "&No".to_string()]);
    }

    #[test]
    fn swallows_input_and_maps_escape() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut h = Harness::new(10, 24);
        let mut el = h.attach(dialog(&seen).with_escape("&No"));
        h.render(&mut el);

        assert!(el.handle_input(&InputEvent::char('z')).is_handled());
        assert!(el.handle_input(&InputEvent::key(KeyCode::Esc)).is_handled());
        assert_eq!(*seen.borrow(), vec!["&No".to_string()]);
    }
}
