#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The typed character, if this is a plain (unmodified by ctrl/alt) character key.
    pub fn character(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
            _ => None,
        }
    }
}

/// Physical mouse buttons reported by the display driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Button carried by click and defocus events.
///
/// `Key` is the pseudo-button used when a hotkey activates something clickable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Middle,
    Right,
    Key,
}

impl From<MouseButton> for Button {
    fn from(b: MouseButton) -> Self {
        match b {
            MouseButton::Left => Button::Left,
            MouseButton::Middle => Button::Middle,
            MouseButton::Right => Button::Right,
        }
    }
}

impl Button {
    /// Left click or hotkey: the two ways a control is "activated".
    pub fn is_activation(self) -> bool {
        matches!(self, Button::Left | Button::Key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Events routed through the component tree.
///
/// Coordinates are absolute screen cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Keyboard(KeyEvent),
    Mouse {
        x: i32,
        y: i32,
        button: Button,
    },
    Scroll {
        x: i32,
        y: i32,
        direction: ScrollDirection,
    },
    /// A click landed outside the receiving component.
    Defocus {
        button: Button,
    },
}

impl InputEvent {
    pub fn key(code: KeyCode) -> Self {
        InputEvent::Keyboard(KeyEvent::new(code))
    }

    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    pub fn click(x: i32, y: i32, button: Button) -> Self {
        InputEvent::Mouse { x, y, button }
    }

    pub fn is_key(&self, code: KeyCode) -> bool {
        matches!(self, InputEvent::Keyboard(k) if k.code == code)
    }
}

/// Raw input as decoded by a display driver, before click detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverInput {
    Key(KeyEvent),
    Press {
        button: MouseButton,
        x: i32,
        y: i32,
    },
    Release {
        button: MouseButton,
        x: i32,
        y: i32,
    },
    Scroll {
        direction: ScrollDirection,
        x: i32,
        y: i32,
    },
    Resize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_ignores_control_chords() {
        assert_eq!(KeyEvent::new(KeyCode::Char('a')).character(), Some('a'));
        let ctrl = KeyEvent::new(KeyCode::Char('a')).with_modifiers(KeyModifiers {
            ctrl: true,
            ..KeyModifiers::none()
        });
        assert_eq!(ctrl.character(), None);
        assert_eq!(KeyEvent::new(KeyCode::Enter).character(), None);
    }

    #[test]
    fn activation_buttons() {
        assert!(Button::Left.is_activation());
        assert!(Button::Key.is_activation());
        assert!(!Button::Right.is_activation());
        assert_eq!(Button::from(MouseButton::Middle), Button::Middle);
    }
}
