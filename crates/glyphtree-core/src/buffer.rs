use std::collections::HashMap;
use std::collections::VecDeque;
use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::buffer::Cell;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

use crate::color::Color;
use crate::color::PairId;
use crate::display::CellStyle;
use crate::display::Display;
use crate::display::DisplayError;
use crate::display::GlyphSupport;
use crate::input::DriverInput;

/// A character grid backed by a ratatui [`Buffer`].
///
/// Shared by the in-memory and terminal drivers: both paint here, the terminal driver then
/// flushes the grid to the real screen on refresh.
#[derive(Clone, Debug)]
pub struct Grid {
    buf: Buffer,
    pairs: HashMap<PairId, (Color, Color)>,
}

impl Grid {
    pub fn new(height: u16, width: u16) -> Self {
        Self {
            buf: Buffer::empty(Rect::new(0, 0, width, height)),
            pairs: HashMap::new(),
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.buf.area.height, self.buf.area.width)
    }

    pub fn resize(&mut self, height: u16, width: u16) {
        self.buf.resize(Rect::new(0, 0, width, height));
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buf
    }

    pub fn init_pair(&mut self, pair: PairId, fg: Color, bg: Color) {
        self.pairs.insert(pair, (fg, bg));
    }

    pub fn clear(&mut self) {
        self.buf.reset();
    }

    pub fn write(&mut self, y: i32, x: i32, text: &str, style: CellStyle) -> Result<(), DisplayError> {
        let (height, width) = self.size();
        if y < 0 || x < 0 || y >= i32::from(height) || x >= i32::from(width) {
            return Err(DisplayError::OutOfBounds { y, x });
        }

        let style = self.style_for(style);
        let row = y as u16;
        let max_cols = usize::from(width);
        let mut col = x as usize;
        let mut tmp = [0u8; 4];

        for ch in text.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if col + w > max_cols {
                return Err(DisplayError::Truncated { y, x });
            }
            if let Some(cell) = self.buf.cell_mut((col as u16, row)) {
                cell.set_symbol(ch.encode_utf8(&mut tmp));
                cell.set_style(style);
            }
            if w == 2 {
                if let Some(cell) = self.buf.cell_mut((col as u16 + 1, row)) {
                    cell.set_symbol("");
                    cell.set_style(style);
                }
            }
            col += w;
        }
        Ok(())
    }

    pub fn cell(&self, y: u16, x: u16) -> Option<&Cell> {
        self.buf.cell((x, y))
    }

    /// The symbols of one row, concatenated (wide glyphs appear once).
    pub fn row_text(&self, y: u16) -> String {
        let (_, width) = self.size();
        (0..width)
            .filter_map(|x| self.buf.cell((x, y)))
            .map(|c| c.symbol())
            .collect()
    }

    fn style_for(&self, style: CellStyle) -> Style {
        let (fg, bg) = self
            .pairs
            .get(&style.pair)
            .copied()
            .unwrap_or((Color::None, Color::None));
        let mut out = Style::reset().fg(fg.to_ratatui()).bg(bg.to_ratatui());
        if style.invert {
            out = out.add_modifier(Modifier::REVERSED);
        }
        if style.underline {
            out = out.add_modifier(Modifier::UNDERLINED);
        }
        out
    }
}

/// Headless display: paints into a [`Grid`] and replays scripted input.
#[derive(Clone, Debug)]
pub struct BufferDisplay {
    grid: Grid,
    input: VecDeque<DriverInput>,
    glyphs: GlyphSupport,
    refreshes: usize,
    clears: usize,
}

impl BufferDisplay {
    pub fn new(height: u16, width: u16) -> Self {
        Self {
            grid: Grid::new(height, width),
            input: VecDeque::new(),
            glyphs: GlyphSupport::Extended,
            refreshes: 0,
            clears: 0,
        }
    }

    pub fn with_glyph_support(mut self, glyphs: GlyphSupport) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn push_input(&mut self, input: DriverInput) {
        self.input.push_back(input);
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Changes the size and queues the matching resize notification.
    pub fn resize(&mut self, height: u16, width: u16) {
        self.grid.resize(height, width);
        self.input.push_back(DriverInput::Resize);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn row_text(&self, y: u16) -> String {
        self.grid.row_text(y)
    }

    /// All rows with trailing blanks trimmed; handy for golden comparisons.
    pub fn lines(&self) -> Vec<String> {
        let (height, _) = self.grid.size();
        (0..height)
            .map(|y| self.grid.row_text(y).trim_end().to_string())
            .collect()
    }

    pub fn cell(&self, y: u16, x: u16) -> Option<&Cell> {
        self.grid.cell(y, x)
    }

    /// Whether the cell at `(y, x)` is drawn in reverse video.
    pub fn is_inverted(&self, y: u16, x: u16) -> bool {
        self.cell(y, x)
            .is_some_and(|c| c.modifier.contains(Modifier::REVERSED))
    }

    pub fn is_underlined(&self, y: u16, x: u16) -> bool {
        self.cell(y, x)
            .is_some_and(|c| c.modifier.contains(Modifier::UNDERLINED))
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl Display for BufferDisplay {
    fn size(&self) -> (u16, u16) {
        self.grid.size()
    }

    fn init_pair(&mut self, pair: PairId, fg: Color, bg: Color) {
        self.grid.init_pair(pair, fg, bg);
    }

    fn write(&mut self, y: i32, x: i32, text: &str, style: CellStyle) -> Result<(), DisplayError> {
        self.grid.write(y, x, text, style)
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.grid.clear();
    }

    fn refresh(&mut self) -> Result<(), DisplayError> {
        self.refreshes += 1;
        Ok(())
    }

    fn read_input(&mut self, _timeout: Option<Duration>) -> Option<DriverInput> {
        self.input.pop_front()
    }

    fn glyph_support(&self) -> GlyphSupport {
        self.glyphs
    }
}
