//! Inline markup for formatted strings.
//!
//! ```text
//! plain <invert>inverted</invert> <red>red <green,black>green on black</green,black></red>
//! ```
//!
//! Tags are `invert`, `underline`, and color pairs `fg` or `fg,bg` (color names or `none`).
//! Literal `<`, `>` and `&` are written `&lt;`, `&gt;` and `&amp;`.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

use crate::color::Color;
use crate::color::TextStyle;

/// Splits markup into text runs and atomic `<...>` tokens, left to right.
///
/// A `<` always starts a new token; a `>` closes the current token only if it began with `<`.
pub fn split(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;

    for (i, ch) in input.char_indices() {
        match ch {
            '<' => {
                if start < i {
                    parts.push(&input[start..i]);
                }
                start = i;
            }
            '>' if input[start..].starts_with('<') => {
                parts.push(&input[start..=i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < input.len() {
        parts.push(&input[start..]);
    }
    parts
}

pub fn sanitize(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    Cow::Owned(
        input
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&"),
    )
}

/// Escapes text so it renders literally inside a formatted string.
pub fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

fn is_tag(part: &str) -> bool {
    part.len() >= 2 && part.starts_with('<') && part.ends_with('>')
}

/// Display width of a formatted string; tags contribute nothing.
pub fn formatted_string_length(input: &str) -> usize {
    split(input)
        .into_iter()
        .filter(|p| !is_tag(p))
        .map(|p| UnicodeWidthStr::width(sanitize(p).as_ref()))
        .sum()
}

/// Markup with the tags removed and entities resolved.
pub fn strip(input: &str) -> String {
    parse(input, TextStyle::default())
        .into_iter()
        .map(|r| r.text)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: TextStyle,
}

enum Tag<'a> {
    Open(&'a str),
    Close(&'a str),
}

fn classify(part: &str) -> Option<Tag<'_>> {
    if !is_tag(part) {
        return None;
    }
    let inner = &part[1..part.len() - 1];
    match inner.strip_prefix('/') {
        Some(name) => Some(Tag::Close(name.trim())),
        None => Some(Tag::Open(inner.trim())),
    }
}

fn parse_pair(name: &str, current: (Color, Color)) -> (Color, Color) {
    let mut it = name.splitn(2, ',');
    let fg = it.next().unwrap_or("");
    let fg = fg.parse::<Color>().unwrap_or_else(|_| {
        log::trace!("unknown markup color {fg:?}, using default");
        Color::None
    });
    let bg = match it.next() {
        Some(bg) => bg.parse::<Color>().unwrap_or(Color::None),
        None => current.1,
    };
    (fg, bg)
}

/// Resolves markup into styled runs on top of `base`.
///
/// Closing a color tag only pops the color stack when it names the color on top, so
/// mismatched nesting cannot unwind colors opened further out.
pub fn parse(input: &str, base: TextStyle) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    let mut invert = base.invert;
    let mut underline = base.underline;
    let mut colors = vec![(base.foreground, base.background)];

    for part in split(input) {
        let top = colors.last().copied().unwrap_or((base.foreground, base.background));
        match classify(part) {
            Some(Tag::Close(name)) => match name.to_ascii_lowercase().as_str() {
                "invert" => invert = base.invert,
                "underline" => underline = base.underline,
                other => {
                    if colors.len() > 1 && parse_pair(other, top) == top {
                        colors.pop();
                    }
                }
            },
            Some(Tag::Open(name)) => match name.to_ascii_lowercase().as_str() {
                "invert" => invert = true,
                "underline" => underline = true,
                other => colors.push(parse_pair(other, top)),
            },
            None => {
                let text = sanitize(part).into_owned();
                if text.is_empty() {
                    continue;
                }
                runs.push(StyledRun {
                    text,
                    style: TextStyle {
                        foreground: top.0,
                        background: top.1,
                        invert,
                        underline,
                    },
                });
            }
        }
    }
    runs
}
