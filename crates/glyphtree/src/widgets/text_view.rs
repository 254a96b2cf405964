use glyphtree_core::input::InputEvent;
use glyphtree_core::scroll::ScrollBindings;
use glyphtree_core::surface::DrawOptions;
use glyphtree_core::surface::Surface;
use glyphtree_core::surface::TextStyle;
use glyphtree_core::viewport::ViewportState;
use glyphtree_core::wrapping::WrapCache;
use glyphtree_core::wrapping::WrapMode;

use crate::component::Component;
use crate::component::DeferredInput;
use crate::component::InputResult;
use crate::context::Context;
use crate::state::Shared;

#[derive(Debug, Default)]
struct ViewState {
    wrap: WrapCache,
    viewport: ViewportState,
    rendered: bool,
}

impl ViewState {
    fn set_text(&mut self, text: &str) {
        self.wrap.set_content(text.split('\n').map(str::to_string).collect());
        self.rendered = false;
    }

    /// Applies a viewport change, repainting only if the position moved.
    fn scroll(&mut self, f: impl FnOnce(&mut ViewportState)) {
        let before = self.viewport.y;
        f(&mut self.viewport);
        if self.viewport.y != before {
            self.rendered = false;
        }
    }
}

/// Read-only, word-wrapped text with a scrollbar in the last column.
///
/// Wheel events over the view scroll it. Wheel events anywhere else are claimed with a
/// [`DeferredInput`], so the view also scrolls when nothing under the pointer wants them.
pub struct TextView {
    state: Shared<ViewState>,
    bindings: ScrollBindings,
    ctx: Option<Context>,
}

impl TextView {
    pub fn new(text: &str) -> Self {
        let mut state = ViewState::default();
        state.wrap.set_mode(WrapMode::Word);
        state.set_text(text);
        Self {
            state: Shared::new(state),
            bindings: ScrollBindings::default(),
            ctx: None,
        }
    }

    pub fn with_bindings(mut self, bindings: ScrollBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn handle(&self) -> TextViewHandle {
        TextViewHandle {
            state: self.state.clone(),
        }
    }
}

impl Component for TextView {
    fn attach(&mut self, ctx: &Context) {
        self.ctx = Some(ctx.clone());
    }

    fn detach(&mut self) {
        self.ctx = None;
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.rendered = true;
        surface.clear();
        let (w, h) = (surface.width(), surface.height());
        if w <= 0 || h <= 0 {
            return;
        }
        let (w, h) = (w.min(i32::from(u16::MAX)) as u16, h.min(i32::from(u16::MAX)) as u16);

        state.wrap.set_width(w.saturating_sub(1));
        state.viewport.set_viewport(h);
        state
            .viewport
            .set_content(u32::from(state.wrap.content_height()));

        let plain = DrawOptions::default();
        let lines = state
            .wrap
            .wrapped_lines()
            .iter()
            .skip(state.viewport.y as usize)
            .take(usize::from(h));
        for (row, line) in lines.enumerate() {
            surface.draw_string(row as i32, 0, line, &plain);
        }

        let Some((top, len)) = state.viewport.scrollbar_thumb(h) else {
            return;
        };
        let (track, thumb) = if surface.glyph_support().is_extended() {
            (("│", plain), ("█", plain))
        } else {
            (("|", plain), (" ", DrawOptions::styled(TextStyle::inverted())))
        };
        let x = i32::from(w) - 1;
        for row in 0..h {
            let (glyph, options) = if (top..top + len).contains(&row) {
                thumb
            } else {
                track
            };
            surface.draw_string(i32::from(row), x, glyph, &options);
        }
    }

    fn dirty(&self) -> bool {
        !self.state.lock().rendered
    }

    fn handle_input(&mut self, event: &InputEvent) -> InputResult {
        match *event {
            InputEvent::Keyboard(key) => {
                let Some(action) = self.bindings.action_for(&key) else {
                    return InputResult::Ignored;
                };
                let mut state = self.state.lock();
                if !state.viewport.can_scroll() {
                    return InputResult::Ignored;
                }
                state.scroll(|vp| self.bindings.apply(vp, action));
                InputResult::Handled
            }
            InputEvent::Scroll { x, y, direction } => {
                let Some(ctx) = &self.ctx else {
                    return InputResult::Ignored;
                };
                let inside = ctx.location().is_some_and(|loc| loc.contains(y, x));
                if inside {
                    self.state
                        .lock()
                        .scroll(|vp| self.bindings.apply_wheel(vp, direction));
                    InputResult::Handled
                } else {
                    InputResult::Deferred(DeferredInput::new(ctx.id()))
                }
            }
            _ => InputResult::Ignored,
        }
    }

    fn handle_deferred(&mut self, event: &InputEvent) -> bool {
        let InputEvent::Scroll { direction, .. } = *event else {
            return false;
        };
        self.state
            .lock()
            .scroll(|vp| self.bindings.apply_wheel(vp, direction));
        true
    }
}

#[derive(Clone, Debug)]
pub struct TextViewHandle {
    state: Shared<ViewState>,
}

impl TextViewHandle {
    /// Replaces the text. The scroll position is kept, clamped to the new content.
    pub fn set_text(&self, text: &str) {
        self.state.lock().set_text(text);
    }

    /// First visible wrapped row.
    pub fn scroll_position(&self) -> u32 {
        self.state.lock().viewport.y
    }

    pub fn scroll_to_bottom(&self) {
        self.state.lock().scroll(ViewportState::to_bottom);
    }
}
