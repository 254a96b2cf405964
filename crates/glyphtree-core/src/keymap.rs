use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// Turns `&`-marked text into markup with the hotkey underlined.
///
/// The first alphanumeric character following a single `&` becomes the hotkey (returned
/// lowercased). `&&` is a literal ampersand. Any later `&` markers are dropped without effect.
///
/// ```
/// use glyphtree_core::keymap::text_to_hotkeys;
///
/// assert_eq!(
///     text_to_hotkeys("&Yes"),
///     ("<underline>Y</underline>es".to_string(), Some('y'))
/// );
/// ```
pub fn text_to_hotkeys(text: &str) -> (String, Option<char>) {
    let mut out = String::with_capacity(text.len() + 24);
    let mut hotkey = None;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '&' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('&') => {
                chars.next();
                out.push_str("&amp;");
            }
            Some(next) if next.is_alphanumeric() && hotkey.is_none() => {
                chars.next();
                hotkey = next.to_lowercase().next();
                out.push_str("<underline>");
                out.push(next);
                out.push_str("</underline>");
            }
            _ => {}
        }
    }
    (out, hotkey)
}

/// True if `event` is a plain key press of `hotkey`, compared case-insensitively.
pub fn matches_hotkey(hotkey: Option<char>, event: &KeyEvent) -> bool {
    match (hotkey, event.character()) {
        (Some(h), Some(c)) => c.is_alphanumeric() && c.to_lowercase().eq(h.to_lowercase()),
        _ => false,
    }
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && modifiers_match(pattern.modifiers, event.modifiers)
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers) -> bool {
    pattern.shift == event.shift && pattern.ctrl == event.ctrl && pattern.alt == event.alt
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers {
        shift: false,
        ctrl: true,
        alt: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_marked_alphanumeric_is_the_hotkey() {
        assert_eq!(
            text_to_hotkeys("E&xit"),
            ("E<underline>x</underline>it".to_string(), Some('x'))
        );
        assert_eq!(
            text_to_hotkeys("&Open &File"),
            ("<underline>O</underline>pen File".to_string(), Some('o'))
        );
    }

    #[test]
    fn double_ampersand_is_literal() {
        assert_eq!(
            text_to_hotkeys("Save && &Quit"),
            ("Save &amp; <underline>Q</underline>uit".to_string(), Some('q'))
        );
        assert_eq!(text_to_hotkeys("plain"), ("plain".to_string(), None));
        assert_eq!(text_to_hotkeys("trailing &"), ("trailing ".to_string(), None));
    }

    #[test]
    fn hotkeys_match_case_insensitively() {
        assert!(matches_hotkey(Some('y'), &key_char('Y')));
        assert!(matches_hotkey(Some('y'), &key_char('y')));
        assert!(!matches_hotkey(Some('y'), &key_ctrl('y')));
        assert!(!matches_hotkey(None, &key_char('y')));
        assert!(!matches_hotkey(Some('-'), &key_char('-')));
    }

    #[test]
    fn key_patterns_compare_modifiers_exactly() {
        assert!(key_event_matches(&key_char('q'), &key_char('q')));
        assert!(!key_event_matches(&key_char('q'), &key_ctrl('q')));
    }
}
