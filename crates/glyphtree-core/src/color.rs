use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Inherit the terminal default.
    #[default]
    None,
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 9] = [
        Color::None,
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Cyan,
        Color::Blue,
        Color::Magenta,
        Color::White,
        Color::Black,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::None => "none",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Cyan => "cyan",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::White => "white",
            Color::Black => "black",
        }
    }

    pub fn to_ratatui(self) -> ratatui::style::Color {
        use ratatui::style::Color as R;
        match self {
            Color::None => R::Reset,
            Color::Red => R::Red,
            Color::Yellow => R::Yellow,
            Color::Green => R::Green,
            Color::Cyan => R::Cyan,
            Color::Blue => R::Blue,
            Color::Magenta => R::Magenta,
            Color::White => R::White,
            Color::Black => R::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Color::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| Error::invalid_option("color", s))
    }
}

/// Colors and attributes for a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextStyle {
    pub foreground: Color,
    pub background: Color,
    pub invert: bool,
    pub underline: bool,
}

impl TextStyle {
    pub fn fg(color: Color) -> Self {
        Self {
            foreground: color,
            ..Self::default()
        }
    }

    pub fn inverted() -> Self {
        Self {
            invert: true,
            ..Self::default()
        }
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }
}

/// Driver-level identifier for a (foreground, background) combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PairId(pub u16);

impl PairId {
    pub const DEFAULT: PairId = PairId(0);
}

/// Lazily allocated color pairs.
///
/// `(None, None)` is always the driver default pair. Every other combination gets the next free
/// slot the first time it is requested, and the same id forever after.
#[derive(Clone, Debug)]
pub struct ColorPairs {
    table: HashMap<(Color, Color), PairId>,
}

impl Default for ColorPairs {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorPairs {
    pub fn new() -> Self {
        let mut table = HashMap::new();
        table.insert((Color::None, Color::None), PairId::DEFAULT);
        Self { table }
    }

    /// Returns the pair for `(fg, bg)`, and whether it was newly allocated.
    pub fn resolve(&mut self, fg: Color, bg: Color) -> (PairId, bool) {
        if let Some(id) = self.table.get(&(fg, bg)) {
            return (*id, false);
        }
        let id = PairId(self.table.len() as u16);
        self.table.insert((fg, bg), id);
        (id, true)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_maps_to_default_pair() {
        let mut pairs = ColorPairs::new();
        assert_eq!(
            pairs.resolve(Color::None, Color::None),
            (PairId::DEFAULT, false)
        );
    }

    #[test]
    fn pairs_are_allocated_once_in_request_order() {
        let mut pairs = ColorPairs::new();
        assert_eq!(pairs.resolve(Color::Red, Color::None), (PairId(1), true));
        assert_eq!(pairs.resolve(Color::Blue, Color::White), (PairId(2), true));
        assert_eq!(pairs.resolve(Color::Red, Color::None), (PairId(1), false));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Red".parse::<Color>().unwrap(), Color::Red);
        assert_eq!("none".parse::<Color>().unwrap(), Color::None);
        assert!("purple".parse::<Color>().is_err());
    }
}
