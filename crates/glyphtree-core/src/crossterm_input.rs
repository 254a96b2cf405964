use crate::input::DriverInput;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::ScrollDirection;

pub fn driver_input_from_crossterm(ev: crossterm::event::Event) -> Option<DriverInput> {
    match ev {
        crossterm::event::Event::Key(key) => {
            if key.kind != crossterm::event::KeyEventKind::Press {
                return None;
            }
            Some(DriverInput::Key(key_event_from_crossterm(key)?))
        }
        crossterm::event::Event::Mouse(m) => mouse_input_from_crossterm(m),
        crossterm::event::Event::Resize(_, _) => Some(DriverInput::Resize),
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: crossterm::event::KeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        crossterm::event::KeyCode::Char(c) => KeyCode::Char(c),
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        crossterm::event::KeyCode::Tab => KeyCode::Tab,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        crossterm::event::KeyCode::Home => KeyCode::Home,
        crossterm::event::KeyCode::End => KeyCode::End,
        crossterm::event::KeyCode::PageUp => KeyCode::PageUp,
        crossterm::event::KeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers: modifiers_from_crossterm(key.modifiers),
    })
}

/// Maps mouse reports onto press/release/scroll. Drags and moves are dropped; a release after a
/// drag never matches its press coordinates anyway.
pub fn mouse_input_from_crossterm(m: crossterm::event::MouseEvent) -> Option<DriverInput> {
    let x = i32::from(m.column);
    let y = i32::from(m.row);
    match m.kind {
        crossterm::event::MouseEventKind::Down(b) => Some(DriverInput::Press {
            button: mouse_button_from_crossterm(b),
            x,
            y,
        }),
        crossterm::event::MouseEventKind::Up(b) => Some(DriverInput::Release {
            button: mouse_button_from_crossterm(b),
            x,
            y,
        }),
        crossterm::event::MouseEventKind::ScrollUp => Some(DriverInput::Scroll {
            direction: ScrollDirection::Up,
            x,
            y,
        }),
        crossterm::event::MouseEventKind::ScrollDown => Some(DriverInput::Scroll {
            direction: ScrollDirection::Down,
            x,
            y,
        }),
        _ => None,
    }
}

fn modifiers_from_crossterm(m: crossterm::event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: m.contains(crossterm::event::KeyModifiers::SHIFT),
        ctrl: m.contains(crossterm::event::KeyModifiers::CONTROL),
        alt: m.contains(crossterm::event::KeyModifiers::ALT),
    }
}

fn mouse_button_from_crossterm(b: crossterm::event::MouseButton) -> MouseButton {
    match b {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::Event;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyEventState;
    use crossterm::event::MouseEvent;
    use crossterm::event::MouseEventKind;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: crossterm::event::KeyModifiers::NONE,
        })
    }

    #[test]
    fn decodes_press_release_and_scroll() {
        assert_eq!(
            driver_input_from_crossterm(mouse(
                MouseEventKind::Down(crossterm::event::MouseButton::Left),
                3,
                4
            )),
            Some(DriverInput::Press {
                button: MouseButton::Left,
                x: 3,
                y: 4
            })
        );
        assert_eq!(
            driver_input_from_crossterm(mouse(
                MouseEventKind::Up(crossterm::event::MouseButton::Right),
                1,
                2
            )),
            Some(DriverInput::Release {
                button: MouseButton::Right,
                x: 1,
                y: 2
            })
        );
        assert_eq!(
            driver_input_from_crossterm(mouse(MouseEventKind::ScrollDown, 0, 0)),
            Some(DriverInput::Scroll {
                direction: ScrollDirection::Down,
                x: 0,
                y: 0
            })
        );
        assert_eq!(
            driver_input_from_crossterm(mouse(MouseEventKind::Moved, 0, 0)),
            None
        );
    }

    #[test]
    fn ignores_key_releases() {
        let release = crossterm::event::KeyEvent {
            code: crossterm::event::KeyCode::Char('q'),
            modifiers: crossterm::event::KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(driver_input_from_crossterm(Event::Key(release)), None);
        assert_eq!(
            driver_input_from_crossterm(Event::Resize(80, 24)),
            Some(DriverInput::Resize)
        );
    }
}
