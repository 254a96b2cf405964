use std::str::FromStr;

use glyphtree_core::color::Color;
use glyphtree_core::display::GlyphSupport;
use glyphtree_core::geometry::Rectangle;
use glyphtree_core::input::InputEvent;
use glyphtree_core::surface::DrawOptions;
use glyphtree_core::surface::Surface;
use glyphtree_core::surface::TextStyle;

use crate::component::Component;
use crate::component::DeferredInput;
use crate::component::Element;
use crate::component::InputResult;
use crate::component::IntoElement;
use crate::context::Context;
use crate::state::Shared;
use crate::state::set_prop;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    /// Inverted blanks.
    #[default]
    Solid,
    Ascii,
    Single,
    Double,
}

impl BorderStyle {
    pub fn needs_extended(self) -> bool {
        matches!(self, BorderStyle::Single | BorderStyle::Double)
    }

    fn check(self, glyphs: GlyphSupport) -> glyphtree_core::Result<Self> {
        if self.needs_extended() && !glyphs.is_extended() {
            return Err(glyphtree_core::Error::UnsupportedGlyphs {
                what: format!("{self:?} border"),
            });
        }
        Ok(self)
    }

    /// `(horizontal, vertical, [top-left, top-right, bottom-left, bottom-right])`.
    fn glyphs(self) -> (&'static str, &'static str, [&'static str; 4]) {
        match self {
            BorderStyle::Solid => (" ", " ", [" "; 4]),
            BorderStyle::Ascii => ("-", "|", ["+"; 4]),
            BorderStyle::Single => ("─", "│", ["┌", "┐", "└", "┘"]),
            BorderStyle::Double => ("═", "║", ["╔", "╗", "╚", "╝"]),
        }
    }
}

impl FromStr for BorderStyle {
    type Err = glyphtree_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solid" => Ok(BorderStyle::Solid),
            "ascii" => Ok(BorderStyle::Ascii),
            "single" => Ok(BorderStyle::Single),
            "double" => Ok(BorderStyle::Double),
            _ => Err(glyphtree_core::Error::invalid_option("border style", s)),
        }
    }
}

#[derive(Debug, Default)]
struct BorderState {
    style: BorderStyle,
    color: Color,
    drawn: bool,
}

/// A one-cell frame around a child.
pub struct Border {
    child: Element,
    state: Shared<BorderState>,
}

impl Border {
    pub fn new(child: impl IntoElement) -> Self {
        Self {
            child: child.into_element(),
            state: Shared::new(BorderState::default()),
        }
    }

    /// Fails if `style` needs glyphs the display cannot draw.
    pub fn with_style(self, style: BorderStyle, glyphs: GlyphSupport) -> glyphtree_core::Result<Self> {
        self.state.lock().style = style.check(glyphs)?;
        Ok(self)
    }

    pub fn color(self, color: Color) -> Self {
        self.state.lock().color = color;
        self
    }

    pub fn handle(&self) -> BorderHandle {
        BorderHandle {
            state: self.state.clone(),
        }
    }
}

impl Component for Border {
    fn attach(&mut self, ctx: &Context) {
        self.child.attach(ctx.handle());
    }

    fn detach(&mut self) {
        self.child.detach();
    }

    fn tick(&mut self) {
        self.child.tick();
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let mut state = self.state.lock();
        state.drawn = true;
        surface.clear();

        let (w, h) = (surface.width(), surface.height());
        let mut style = TextStyle::fg(state.color);
        if state.style == BorderStyle::Solid {
            style = style.with_invert(true);
        }
        let options = DrawOptions::styled(style);
        let (horizontal, vertical, corners) = state.style.glyphs();

        for x in 0..w {
            surface.draw_string(0, x, horizontal, &options);
            surface.draw_string(h - 1, x, horizontal, &options);
        }
        for y in 1..h - 1 {
            surface.draw_string(y, 0, vertical, &options);
            surface.draw_string(y, w - 1, vertical, &options);
        }
        let [tl, tr, bl, br] = corners;
        surface.draw_string(0, 0, tl, &options);
        surface.draw_string(0, w - 1, tr, &options);
        surface.draw_string(h - 1, 0, bl, &options);
        surface.draw_string(h - 1, w - 1, br, &options);
        drop(state);

        if w > 2 && h > 2 {
            self.child.render(surface, Rectangle::new(1, h - 1, 1, w - 1));
        }
    }

    fn dirty(&self) -> bool {
        !self.state.lock().drawn || self.child.dirty()
    }

    fn bounds(&self) -> Option<Rectangle> {
        let inner = self.child.bounds()?;
        let grow = |n: i32| if n > 0 { n + 2 } else { 0 };
        Some(Rectangle::sized(grow(inner.height()), grow(inner.width())))
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        self.child.handle_input(event)
    }

    fn retry_input(&mut self, deferred: &DeferredInput, event: &InputEvent) -> bool {
        self.child.retry_input(deferred, event)
    }
}

#[derive(Clone, Debug)]
pub struct BorderHandle {
    state: Shared<BorderState>,
}

impl BorderHandle {
    pub fn color(&self) -> Color {
        self.state.lock().color
    }

    pub fn set_color(&self, color: Color) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        set_prop(&mut state.drawn, &mut state.color, color);
    }

    pub fn style(&self) -> BorderStyle {
        self.state.lock().style
    }

    pub fn set_style(&self, style: BorderStyle, glyphs: GlyphSupport) -> glyphtree_core::Result<()> {
        let style = style.check(glyphs)?;
        let mut guard = self.state.lock();
        let state = &mut *guard;
        set_prop(&mut state.drawn, &mut state.style, style);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use crate::widgets::Label;

    #[test]
    fn double_border_frames_the_child() {
        let mut h = Harness::new(3, 6);
        let border = Border::new(Label::new("hi"))
            .with_style(BorderStyle::Double, GlyphSupport::Extended)
            .unwrap();
        let mut el = h.attach(border);
        h.render(&mut el);
        assert_eq!(h.lines(), vec!["╔════╗", "║hi  ║", "╚════╝"]);
        assert!(!el.dirty());
    }

    #[test]
    fn ascii_border_uses_plus_corners() {
        let mut h = Harness::new(3, 4);
        let border = Border::new(Label::new("x"))
            .with_style(BorderStyle::Ascii, GlyphSupport::Basic)
            .unwrap();
        let mut el = h.attach(border);
        h.render(&mut el);
        assert_eq!(h.lines(), vec!["+--+", "|x |", "+--+"]);
    }

    #[test]
    fn line_styles_need_extended_glyphs() {
        let err = Border::new(Label::new("x")).with_style(BorderStyle::Single, GlyphSupport::Basic);
        assert!(matches!(
            err,
            Err(glyphtree_core::Error::UnsupportedGlyphs { .. })
        ));
        assert!("double".parse::<BorderStyle>().is_ok());
        assert!("dotted".parse::<BorderStyle>().unwrap_err().is_configuration());
    }

    #[test]
    fn bounds_add_the_frame() {
        let border = Border::new(Label::new("abc"));
        assert_eq!(border.bounds(), Some(Rectangle::sized(3, 5)));
        assert_eq!(Border::new(Label::new("")).bounds(), Some(Rectangle::sized(3, 0)));
    }

    #[test]
    fn solid_border_is_inverted() {
        let mut h = Harness::new(3, 3);
        let mut el = h.attach(Border::new(Label::new("")));
        h.render(&mut el);
        assert!(h.display().is_inverted(0, 0));
        assert!(h.display().is_inverted(2, 1));
        assert!(!h.display().is_inverted(1, 1));
    }

    #[test]
    fn color_change_redraws() {
        let border = Border::new(Label::new("x"));
        let handle = border.handle();
        let mut h = Harness::new(3, 3);
        let mut el = h.attach(border);
        h.render(&mut el);
        handle.set_color(Color::Blue);
        assert!(el.dirty());
    }
}
