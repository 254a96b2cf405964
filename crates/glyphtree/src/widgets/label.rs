use glyphtree_core::color::Color;
use glyphtree_core::geometry::Rectangle;
use glyphtree_core::markup;
use glyphtree_core::surface::DrawOptions;
use glyphtree_core::surface::Surface;
use glyphtree_core::surface::TextStyle;
use glyphtree_core::wrapping::WrapMode;
use unicode_width::UnicodeWidthStr;

use crate::component::Component;
use crate::state::Shared;
use crate::state::set_prop;

#[derive(Debug, Default)]
struct LabelState {
    text: String,
    color: Color,
    invert: bool,
    formatted: bool,
    wrap: WrapMode,
    centered: bool,
    rendered: bool,
}

impl LabelState {
    fn style(&self) -> TextStyle {
        TextStyle::fg(self.color).with_invert(self.invert)
    }

    fn line_width(&self, line: &str) -> usize {
        if self.formatted {
            markup::formatted_string_length(line)
        } else {
            UnicodeWidthStr::width(line)
        }
    }
}

/// A block of text.
///
/// Labels own their whole area: the background is cleared on every paint, or filled inverted
/// for an inverted label.
#[derive(Debug)]
pub struct Label {
    state: Shared<LabelState>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: Shared::new(LabelState {
                text: text.into(),
                ..LabelState::default()
            }),
        }
    }

    pub fn color(self, color: Color) -> Self {
        self.state.lock().color = color;
        self
    }

    pub fn inverted(self, invert: bool) -> Self {
        self.state.lock().invert = invert;
        self
    }

    /// Interpret the text as markup.
    pub fn formatted(self, formatted: bool) -> Self {
        self.state.lock().formatted = formatted;
        self
    }

    pub fn wrap(self, wrap: WrapMode) -> Self {
        self.state.lock().wrap = wrap;
        self
    }

    pub fn centered(self, centered: bool) -> Self {
        self.state.lock().centered = centered;
        self
    }

    pub fn handle(&self) -> LabelHandle {
        LabelHandle {
            state: self.state.clone(),
        }
    }
}

impl Component for Label {
    fn render(&mut self, surface: &mut Surface<'_>) {
        let mut state = self.state.lock();
        if state.invert {
            surface.fill(TextStyle::inverted());
        } else {
            surface.clear();
        }

        let options = DrawOptions::styled(state.style())
            .with_wrap(state.wrap)
            .with_centered(state.centered);
        if state.formatted {
            surface.draw_formatted_string(0, 0, &state.text, &options);
        } else {
            surface.draw_string(0, 0, &state.text, &options);
        }
        state.rendered = true;
    }

    fn dirty(&self) -> bool {
        !self.state.lock().rendered
    }

    fn bounds(&self) -> Option<Rectangle> {
        let state = self.state.lock();
        if state.wrap != WrapMode::None {
            return None;
        }
        let lines = state.text.split('\n');
        let (height, width) = lines.fold((0, 0), |(h, w), line| {
            (h + 1, w.max(state.line_width(line)))
        });
        Some(Rectangle::sized(height, width as i32))
    }
}

/// Shared access to a [`Label`]'s properties.
#[derive(Clone, Debug)]
pub struct LabelHandle {
    state: Shared<LabelState>,
}

impl LabelHandle {
    pub fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        set_prop(&mut state.rendered, &mut state.text, text.into());
    }

    pub fn color(&self) -> Color {
        self.state.lock().color
    }

    pub fn set_color(&self, color: Color) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        set_prop(&mut state.rendered, &mut state.color, color);
    }

    pub fn invert(&self) -> bool {
        self.state.lock().invert
    }

    pub fn set_invert(&self, invert: bool) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        set_prop(&mut state.rendered, &mut state.invert, invert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn draws_and_clears_its_area() {
        let mut h = Harness::new(2, 6);
        let mut el = h.attach(Label::new("hi"));
        h.render(&mut el);
        assert_eq!(h.lines(), vec!["hi", ""]);
        assert!(!el.dirty());
    }

    #[test]
    fn setters_dirty_only_on_change() {
        let label = Label::new("a");
        let handle = label.handle();
        let mut h = Harness::new(1, 4);
        let mut el = h.attach(label);
        h.render(&mut el);

        handle.set_text("a");
        assert!(!el.dirty());
        handle.set_text("b");
        assert!(el.dirty());
        h.render(&mut el);
        assert_eq!(h.row(0), "b   ");

        handle.set_color(Color::Red);
        assert!(el.dirty());
    }

    #[test]
    fn inverted_label_fills_its_area() {
        let mut h = Harness::new(2, 3);
        let mut el = h.attach(Label::new("x").inverted(true));
        h.render(&mut el);
        assert!(h.display().is_inverted(0, 0));
        assert!(h.display().is_inverted(1, 2));
    }

    #[test]
    fn formatted_text_measures_without_tags() {
        let label = Label::new("<red>abc</red>\nde").formatted(true);
        assert_eq!(label.bounds(), Some(Rectangle::sized(2, 3)));
        let plain = Label::new("<red>");
        assert_eq!(plain.bounds(), Some(Rectangle::sized(1, 5)));
        assert_eq!(Label::new("x").wrap(WrapMode::Word).bounds(), None);
    }

    #[test]
    fn word_wrap_and_centering() {
        let mut h = Harness::new(3, 7);
        let mut el = h.attach(
            Label::new("one two three")
                .wrap(WrapMode::Word)
                .centered(true),
        );
        h.render(&mut el);
        assert_eq!(h.lines(), vec!["one two", " three", ""]);
    }
}
