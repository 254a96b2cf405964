use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    #[default]
    None,
    Word,
}

/// Byte offsets where each wrapped segment of `text` ends, in ascending order.
///
/// Greedy lookahead over the next `width + 1` columns. A newline ends the segment right after
/// itself. Otherwise the last break point in the window wins: the end of a whitespace run, or
/// a hyphen with alphanumerics on both sides inside the window. With no break point the
/// segment is cut at exactly `width` columns. The last offset is always `text.len()`.
pub fn break_offsets(text: &str, width: usize) -> Vec<usize> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut start = 0usize;
    while start < text.len() {
        let len = next_break(&text[start..], width);
        debug_assert!(len > 0, "word wrap made no progress at byte {start}");
        start += len.max(1);
        out.push(start);
    }
    out
}

/// Segments of `text`, exactly as split by [`break_offsets`]; they concatenate to `text`.
pub fn wrap_segments(text: &str, width: usize) -> Vec<&str> {
    let mut start = 0usize;
    break_offsets(text, width)
        .into_iter()
        .map(|end| {
            let seg = &text[start..end];
            start = end;
            seg
        })
        .collect()
}

/// The visible part of a segment: its line break and trailing whitespace removed.
pub fn visible(segment: &str) -> &str {
    segment.trim_end()
}

/// Wrapped lines as they appear on screen.
pub fn wrap_lines(text: &str, width: usize) -> Vec<&str> {
    wrap_segments(text, width).into_iter().map(visible).collect()
}

struct Slot {
    byte: usize,
    ch: char,
    col: usize,
    width: usize,
}

fn next_break(rest: &str, width: usize) -> usize {
    let mut window: Vec<Slot> = Vec::new();
    let mut col = 0usize;
    for (byte, ch) in rest.char_indices() {
        if col > width {
            break;
        }
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        window.push(Slot {
            byte,
            ch,
            col,
            width: w,
        });
        col += w;
    }

    if let Some(nl) = window.iter().find(|s| s.ch == '\n') {
        return nl.byte + 1;
    }

    if UnicodeWidthStr::width(rest) <= width {
        return rest.len();
    }

    let mut candidate: Option<usize> = None;
    let mut i = 0usize;
    while i < window.len() {
        let slot = &window[i];
        if is_space(slot.ch) {
            let end = whitespace_run_end(rest, slot.byte);
            candidate = Some(end);
            while i < window.len() && window[i].byte < end {
                i += 1;
            }
            continue;
        }
        if slot.ch == '-'
            && i > 0
            && i + 1 < window.len()
            && window[i - 1].ch.is_alphanumeric()
            && window[i + 1].ch.is_alphanumeric()
        {
            candidate = Some(slot.byte + slot.ch.len_utf8());
        }
        i += 1;
    }
    if let Some(end) = candidate {
        return end;
    }

    let mut end = 0usize;
    for slot in &window {
        if slot.col + slot.width > width {
            break;
        }
        end = slot.byte + slot.ch.len_utf8();
    }
    if end == 0 {
        // A glyph wider than the whole line still has to go somewhere.
        end = window.first().map(|s| s.ch.len_utf8()).unwrap_or(rest.len());
    }
    end
}

fn is_space(ch: char) -> bool {
    ch.is_whitespace() && ch != '\n'
}

fn whitespace_run_end(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, ch)| !is_space(*ch))
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

/// Wrapped view over a list of raw lines, rebuilt only when the width or content changes.
#[derive(Clone, Debug, Default)]
pub struct WrapCache {
    raw: Vec<String>,
    wrapped: Vec<String>,
    wrapped_src_idx: Vec<usize>,
    wrap_cols: Option<u16>,
    mode: WrapMode,
    content_w: u16,
    content_h: u16,
}

impl WrapCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_content(&mut self, lines: Vec<String>) {
        self.raw = lines;
        self.invalidate();
    }

    pub fn set_mode(&mut self, mode: WrapMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.invalidate();
    }

    pub fn set_width(&mut self, width: u16) {
        if self.wrap_cols == Some(width) {
            return;
        }
        self.wrap_cols = Some(width);
        self.rebuild();
    }

    pub fn raw_lines(&self) -> &[String] {
        &self.raw
    }

    pub fn wrapped_lines(&self) -> &[String] {
        &self.wrapped
    }

    pub fn wrapped_src_indices(&self) -> &[usize] {
        &self.wrapped_src_idx
    }

    pub fn content_width(&self) -> u16 {
        self.content_w
    }

    pub fn content_height(&self) -> u16 {
        self.content_h
    }

    fn invalidate(&mut self) {
        self.wrapped.clear();
        self.wrapped_src_idx.clear();
        self.content_w = 0;
        self.content_h = 0;
        self.wrap_cols = None;
    }

    fn rebuild(&mut self) {
        let Some(width) = self.wrap_cols else {
            return;
        };
        self.wrapped.clear();
        self.wrapped_src_idx.clear();
        for (raw_idx, raw) in self.raw.iter().enumerate() {
            let raw = normalize_tabs(raw);
            if raw.is_empty() || self.mode == WrapMode::None || width == 0 {
                self.wrapped.push(raw);
                self.wrapped_src_idx.push(raw_idx);
                continue;
            }
            for line in wrap_lines(&raw, usize::from(width)) {
                self.wrapped.push(line.to_string());
                self.wrapped_src_idx.push(raw_idx);
            }
        }
        self.content_h = self.wrapped.len().min(u16::MAX as usize) as u16;
        self.content_w = self
            .wrapped
            .iter()
            .map(|l| UnicodeWidthStr::width(l.as_str()) as u16)
            .max()
            .unwrap_or(0);
    }
}

fn normalize_tabs(s: &str) -> String {
    if s.contains('\t') {
        s.replace('\t', "    ")
    } else {
        s.to_string()
    }
}
