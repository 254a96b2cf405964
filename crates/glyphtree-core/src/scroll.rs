use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::ScrollDirection;
use crate::keymap;
use crate::viewport::ViewportState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

impl From<ScrollDirection> for ScrollAction {
    fn from(direction: ScrollDirection) -> Self {
        match direction {
            ScrollDirection::Up => ScrollAction::Up,
            ScrollDirection::Down => ScrollAction::Down,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScrollBindings {
    pub line_step: i32,
    /// Rows moved per mouse wheel notch.
    pub wheel_step: i32,
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub top: Vec<KeyEvent>,
    pub bottom: Vec<KeyEvent>,
}

impl Default for ScrollBindings {
    fn default() -> Self {
        Self {
            line_step: 1,
            wheel_step: 3,
            up: vec![KeyEvent::new(KeyCode::Up)],
            down: vec![KeyEvent::new(KeyCode::Down)],
            page_up: vec![KeyEvent::new(KeyCode::PageUp), keymap::key_ctrl('u')],
            page_down: vec![KeyEvent::new(KeyCode::PageDown), keymap::key_ctrl('d')],
            top: vec![KeyEvent::new(KeyCode::Home)],
            bottom: vec![KeyEvent::new(KeyCode::End)],
        }
    }
}

impl ScrollBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<ScrollAction> {
        let table = [
            (&self.up, ScrollAction::Up),
            (&self.down, ScrollAction::Down),
            (&self.page_up, ScrollAction::PageUp),
            (&self.page_down, ScrollAction::PageDown),
            (&self.top, ScrollAction::Top),
            (&self.bottom, ScrollAction::Bottom),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.iter().any(|p| keymap::key_event_matches(p, key)))
            .map(|(_, action)| action)
    }

    pub fn apply(&self, state: &mut ViewportState, action: ScrollAction) {
        match action {
            ScrollAction::Up => state.scroll_y_by(-self.line_step),
            ScrollAction::Down => state.scroll_y_by(self.line_step),
            ScrollAction::PageUp => state.page_up(),
            ScrollAction::PageDown => state.page_down(),
            ScrollAction::Top => state.to_top(),
            ScrollAction::Bottom => state.to_bottom(),
        }
    }

    pub fn apply_wheel(&self, state: &mut ViewportState, direction: ScrollDirection) {
        match direction {
            ScrollDirection::Up => state.scroll_y_by(-self.wheel_step),
            ScrollDirection::Down => state.scroll_y_by(self.wheel_step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_navigation_keys() {
        let b = ScrollBindings::default();
        assert_eq!(
            b.action_for(&KeyEvent::new(KeyCode::PageDown)),
            Some(ScrollAction::PageDown)
        );
        assert_eq!(b.action_for(&keymap::key_ctrl('u')), Some(ScrollAction::PageUp));
        assert_eq!(b.action_for(&keymap::key_char('u')), None);
    }

    #[test]
    fn wheel_scrolls_several_rows() {
        let b = ScrollBindings::default();
        let mut s = ViewportState::default();
        s.set_viewport(2);
        s.set_content(10);
        b.apply_wheel(&mut s, ScrollDirection::Down);
        assert_eq!(s.y, 3);
        b.apply(&mut s, ScrollAction::from(ScrollDirection::Up));
        assert_eq!(s.y, 2);
    }
}
