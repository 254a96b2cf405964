//! Clipped drawing regions.
//!
//! A [`Screen`] owns the display driver and the session's color-pair cache. Components never see
//! the screen; they get a [`Surface`], a view onto one rectangle of it with its own coordinate
//! origin. Everything drawn through a surface is clipped to it, and driver faults are dropped.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::color::ColorPairs;
pub use crate::color::TextStyle;
use crate::display::CellStyle;
use crate::display::Display;
use crate::display::GlyphSupport;
use crate::geometry::Rectangle;
use crate::markup;
use crate::wrapping;
use crate::wrapping::WrapMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawOptions {
    pub style: TextStyle,
    pub wrap: WrapMode,
    /// Center each line; only honored for draws that start at column 0.
    pub centered: bool,
}

impl DrawOptions {
    pub fn styled(style: TextStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }
}

/// The display plus the state that lives as long as the display session.
pub struct Screen<D: Display> {
    display: D,
    pairs: ColorPairs,
}

impl<D: Display> Screen<D> {
    pub fn new(display: D) -> Self {
        Self {
            display,
            pairs: ColorPairs::new(),
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    pub fn bounds(&self) -> Rectangle {
        let (height, width) = self.display.size();
        Rectangle::sized(i32::from(height), i32::from(width))
    }

    pub fn glyph_support(&self) -> GlyphSupport {
        self.display.glyph_support()
    }

    /// A surface covering the whole display.
    pub fn surface(&mut self) -> Surface<'_> {
        let area = self.bounds();
        Surface {
            display: &mut self.display,
            pairs: &mut self.pairs,
            area,
        }
    }

    pub fn clear(&mut self) {
        self.display.clear();
    }

    pub fn refresh(&mut self) {
        if let Err(e) = self.display.refresh() {
            log::trace!("display refresh failed: {e}");
        }
    }
}

/// One rectangular region of the screen.
///
/// Coordinates passed to drawing calls are relative to the region's top-left corner.
pub struct Surface<'a> {
    display: &'a mut dyn Display,
    pairs: &'a mut ColorPairs,
    area: Rectangle,
}

impl<'a> Surface<'a> {
    /// Size of the region, anchored at the origin.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::sized(self.area.height().max(0), self.area.width().max(0))
    }

    /// Absolute position of the region on the screen.
    pub fn location(&self) -> Rectangle {
        self.area
    }

    pub fn width(&self) -> i32 {
        self.area.width().max(0)
    }

    pub fn height(&self) -> i32 {
        self.area.height().max(0)
    }

    pub fn glyph_support(&self) -> GlyphSupport {
        self.display.glyph_support()
    }

    /// Sub-surface for `rect` (in this surface's coordinates), clipped to this surface.
    pub fn clip(&mut self, rect: Rectangle) -> Surface<'_> {
        let area = rect
            .clip(&self.bounds())
            .offset(self.area.top, self.area.left);
        Surface {
            display: &mut *self.display,
            pairs: &mut *self.pairs,
            area,
        }
    }

    /// Blanks the region with the default style.
    pub fn clear(&mut self) {
        self.fill(TextStyle::default());
    }

    /// Paints every cell of the region with spaces in `style`.
    pub fn fill(&mut self, style: TextStyle) {
        let width = self.width();
        if width == 0 {
            return;
        }
        let blank = " ".repeat(width as usize);
        for row in 0..self.height() {
            self.put(row, 0, &blank, style);
        }
    }

    /// Draws plain text. Returns the number of lines the text was laid out on.
    pub fn draw_string(&mut self, y: i32, x: i32, text: &str, options: &DrawOptions) -> i32 {
        let runs = [markup::StyledRun {
            text: text.to_string(),
            style: options.style,
        }];
        self.draw_runs(y, x, &runs, options)
    }

    /// Draws markup (see [`crate::markup`]) on top of `options.style`.
    pub fn draw_formatted_string(
        &mut self,
        y: i32,
        x: i32,
        text: &str,
        options: &DrawOptions,
    ) -> i32 {
        let runs = markup::parse(text, options.style);
        self.draw_runs(y, x, &runs, options)
    }

    fn draw_runs(&mut self, y: i32, x: i32, runs: &[markup::StyledRun], options: &DrawOptions) -> i32 {
        let avail = self.width() - x;
        if avail <= 0 || runs.is_empty() {
            return 0;
        }

        let plain: String = runs.iter().map(|r| r.text.as_str()).collect();
        let ends = match options.wrap {
            WrapMode::Word => wrapping::break_offsets(&plain, avail as usize),
            WrapMode::None => newline_offsets(&plain),
        };

        let mut start = 0usize;
        let mut row = y;
        for end in &ends {
            let segment = &plain[start..*end];
            let visible = wrapping::visible(segment);
            let line_w = UnicodeWidthStr::width(visible) as i32;
            let col = if options.centered && x == 0 {
                ((avail - line_w) / 2).max(0)
            } else {
                x
            };
            if (0..self.height()).contains(&row) {
                self.put_range(row, col, runs, start, start + visible.len());
            }
            start = *end;
            row += 1;
        }
        ends.len() as i32
    }

    /// Writes the bytes `from..to` of the concatenated runs on one row, run by run.
    fn put_range(&mut self, row: i32, mut col: i32, runs: &[markup::StyledRun], from: usize, to: usize) {
        let mut offset = 0usize;
        for run in runs {
            let run_start = offset;
            let run_end = offset + run.text.len();
            offset = run_end;
            if run_end <= from || run_start >= to {
                continue;
            }
            let lo = from.max(run_start) - run_start;
            let hi = to.min(run_end) - run_start;
            let piece = &run.text[lo..hi];
            self.put(row, col, piece, run.style);
            col += UnicodeWidthStr::width(piece) as i32;
        }
    }

    /// Writes one run at `(row, col)` in local coordinates, clipped to the region.
    fn put(&mut self, row: i32, col: i32, text: &str, style: TextStyle) {
        if row < 0 || row >= self.height() || text.is_empty() {
            return;
        }
        let skip = (-col).max(0) as u32;
        let col = col.max(0);
        let room = self.width() - col;
        if room <= 0 {
            return;
        }
        let text = slice_by_cols(text, skip, room.min(i32::from(u16::MAX)) as u16);
        if text.is_empty() {
            return;
        }

        let (pair, fresh) = self.pairs.resolve(style.foreground, style.background);
        if fresh {
            self.display
                .init_pair(pair, style.foreground, style.background);
        }
        let cell = CellStyle {
            pair,
            invert: style.invert,
            underline: style.underline,
        };
        let (y, x) = (self.area.top + row, self.area.left + col);
        if let Err(e) = self.display.write(y, x, &text, cell) {
            log::trace!("dropped draw at ({y}, {x}): {e}");
        }
    }
}

fn newline_offsets(text: &str) -> Vec<usize> {
    let mut ends: Vec<usize> = text.match_indices('\n').map(|(i, _)| i + 1).collect();
    if ends.last() != Some(&text.len()) {
        ends.push(text.len());
    }
    ends
}

/// The part of `input` covering display columns `start_col..start_col + max_cols`.
///
/// Tabs expand to four columns. A wide glyph straddling either edge is dropped.
pub fn slice_by_cols(input: &str, start_col: u32, max_cols: u16) -> Cow<'_, str> {
    if max_cols == 0 {
        return Cow::Borrowed("");
    }
    let input = if input.contains('\t') {
        Cow::Owned(input.replace('\t', "    "))
    } else {
        Cow::Borrowed(input)
    };
    if start_col == 0 && UnicodeWidthStr::width(input.as_ref()) <= usize::from(max_cols) {
        return input;
    }

    let start_col = start_col as usize;
    let max_cols = usize::from(max_cols);
    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut out = String::new();

    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if col < start_col {
            col += w;
            continue;
        }
        if out_cols + w > max_cols {
            break;
        }
        out.push(ch);
        col += w;
        out_cols += w;
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferDisplay;
    use crate::color::Color;

    fn screen(h: u16, w: u16) -> Screen<BufferDisplay> {
        Screen::new(BufferDisplay::new(h, w))
    }

    #[test]
    fn clip_translates_origin() {
        let mut s = screen(5, 10);
        let mut root = s.surface();
        let mut sub = root.clip(Rectangle::new(1, 3, 2, 6));
        assert_eq!(sub.bounds(), Rectangle::sized(2, 4));
        assert_eq!(sub.location(), Rectangle::new(1, 3, 2, 6));
        sub.draw_string(0, 0, "abcdefgh", &DrawOptions::default());
        assert_eq!(s.display().row_text(1), "  abcd    ");
    }

    #[test]
    fn nested_clip_stays_inside_parent() {
        let mut s = screen(4, 8);
        let mut root = s.surface();
        let mut outer = root.clip(Rectangle::new(1, 3, 1, 5));
        let inner = outer.clip(Rectangle::new(-3, 10, 2, 20));
        assert_eq!(inner.location(), Rectangle::new(1, 3, 3, 5));
    }

    #[test]
    fn drawing_off_the_surface_is_harmless() {
        let mut s = screen(2, 4);
        let mut root = s.surface();
        root.draw_string(5, 0, "nope", &DrawOptions::default());
        root.draw_string(0, 10, "nope", &DrawOptions::default());
        root.draw_string(1, -2, "abcd", &DrawOptions::default());
        assert_eq!(s.display().lines(), vec!["", "cd"]);
    }

    #[test]
    fn word_wrap_uses_continuation_rows() {
        let mut s = screen(3, 5);
        let opts = DrawOptions::default().with_wrap(WrapMode::Word);
        let rows = s.surface().draw_string(0, 0, "hello world", &opts);
        assert_eq!(rows, 2);
        assert_eq!(s.display().lines(), vec!["hello", "world", ""]);
    }

    #[test]
    fn centering_is_per_line() {
        let mut s = screen(2, 7);
        let opts = DrawOptions::default()
            .with_wrap(WrapMode::Word)
            .with_centered(true);
        s.surface().draw_string(0, 0, "abc defgh", &opts);
        assert_eq!(s.display().lines(), vec!["  abc", " defgh"]);
    }

    #[test]
    fn centering_only_applies_from_column_zero() {
        let mut s = screen(1, 7);
        let opts = DrawOptions::default().with_centered(true);
        s.surface().draw_string(0, 1, "ab", &opts);
        assert_eq!(s.display().lines(), vec![" ab"]);
    }

    #[test]
    fn formatted_runs_keep_their_styles() {
        let mut s = screen(1, 6);
        s.surface()
            .draw_formatted_string(0, 0, "a<red>b</red><invert>c</invert>", &DrawOptions::default());
        let d = s.display();
        assert_eq!(d.row_text(0), "abc   ");
        assert_eq!(d.cell(0, 1).unwrap().fg, ratatui::style::Color::Red);
        assert_eq!(d.cell(0, 0).unwrap().fg, ratatui::style::Color::Reset);
        assert!(
            d.cell(0, 2)
                .unwrap()
                .modifier
                .contains(ratatui::style::Modifier::REVERSED)
        );
    }

    #[test]
    fn formatted_wrap_splits_runs_across_lines() {
        let mut s = screen(2, 4);
        let opts = DrawOptions::default().with_wrap(WrapMode::Word);
        s.surface()
            .draw_formatted_string(0, 0, "<green>ab cd</green>", &opts);
        assert_eq!(s.display().lines(), vec!["ab", "cd"]);
        assert_eq!(s.display().cell(1, 0).unwrap().fg, ratatui::style::Color::Green);
    }

    #[test]
    fn fill_covers_the_region() {
        let mut s = screen(2, 3);
        s.surface().fill(TextStyle::inverted());
        let cell = s.display().cell(1, 2).unwrap();
        assert!(cell.modifier.contains(ratatui::style::Modifier::REVERSED));
    }

    #[test]
    fn pairs_are_declared_once() {
        let mut s = screen(1, 4);
        let opts = DrawOptions::styled(TextStyle::fg(Color::Blue));
        s.surface().draw_string(0, 0, "a", &opts);
        s.surface().draw_string(0, 1, "b", &opts);
        assert_eq!(s.display().cell(0, 1).unwrap().fg, ratatui::style::Color::Blue);
    }

    #[test]
    fn slice_by_cols_handles_tabs_and_wide_glyphs() {
        assert_eq!(slice_by_cols("\t1", 0, 4), "    ");
        assert_eq!(slice_by_cols("abcdef", 2, 3), "cde");
        assert_eq!(slice_by_cols("你好", 0, 3), "你");
        assert_eq!(slice_by_cols("你好", 1, 2), "好");
    }
}
