use std::io;
use std::io::Stdout;
use std::time::Duration;

use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::buffer::Grid;
use crate::color::Color;
use crate::color::PairId;
use crate::crossterm_input::driver_input_from_crossterm;
use crate::display::CellStyle;
use crate::display::Display;
use crate::display::DisplayError;
use crate::display::GlyphSupport;
use crate::input::DriverInput;

#[derive(Clone, Copy, Debug)]
pub struct TerminalOptions {
    pub mouse: bool,
    pub extended_glyphs: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            mouse: true,
            extended_glyphs: true,
        }
    }
}

/// Real terminal driver: raw mode, alternate screen, and mouse capture via crossterm.
///
/// Drawing goes into an off-screen [`Grid`]; `refresh` hands it to ratatui, which diffs against
/// the previous frame. The terminal is restored on drop.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    grid: Grid,
    options: TerminalOptions,
    full_repaint: bool,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        Self::with_options(TerminalOptions::default())
    }

    pub fn with_options(options: TerminalOptions) -> io::Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        crossterm::execute!(stdout, EnterAlternateScreen)?;
        if options.mouse {
            crossterm::execute!(stdout, EnableMouseCapture)?;
        }

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        let (width, height) = crossterm::terminal::size()?;
        log::debug!("terminal opened at {width}x{height}");

        Ok(Self {
            terminal,
            grid: Grid::new(height, width),
            options,
            full_repaint: true,
        })
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        if self.options.mouse {
            crossterm::execute!(self.terminal.backend_mut(), DisableMouseCapture)?;
        }
        crossterm::execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    fn sync_size(&mut self) {
        if let Ok((width, height)) = crossterm::terminal::size() {
            if self.grid.size() != (height, width) {
                self.grid.resize(height, width);
                self.full_repaint = true;
            }
        }
    }
}

impl Display for TerminalDisplay {
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
        self.grid.clear();
        self.full_repaint = true;
    }

    fn refresh(&mut self) -> Result<(), DisplayError> {
        if self.full_repaint {
            self.terminal.clear()?;
            self.full_repaint = false;
        }
        let grid = &self.grid;
        self.terminal.draw(|frame| {
            let area = frame.area();
            let (height, width) = grid.size();
            let buf = frame.buffer_mut();
            for y in 0..area.height.min(height) {
                for x in 0..area.width.min(width) {
                    if let (Some(src), Some(dst)) = (grid.cell(y, x), buf.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
        })?;
        Ok(())
    }

    fn read_input(&mut self, timeout: Option<Duration>) -> Option<DriverInput> {
        let ready = match timeout {
            Some(t) => crossterm::event::poll(t).unwrap_or(false),
            None => true,
        };
        if !ready {
            return None;
        }
        let input = match crossterm::event::read() {
            Ok(ev) => driver_input_from_crossterm(ev),
            Err(e) => {
                log::trace!("terminal read failed: {e}");
                None
            }
        };
        if input == Some(DriverInput::Resize) {
            self.sync_size();
        }
        input
    }

    fn glyph_support(&self) -> GlyphSupport {
        GlyphSupport::from_flag(self.options.extended_glyphs)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("failed to restore terminal: {e}");
        }
    }
}
