use std::str::FromStr;

use glyphtree_core::color::Color;
use glyphtree_core::display::GlyphSupport;
use glyphtree_core::geometry::Rectangle;
use glyphtree_core::surface::DrawOptions;
use glyphtree_core::surface::Surface;
use glyphtree_core::surface::TextStyle;

use crate::component::Component;
use crate::context::Context;
use crate::state::Shared;
use crate::state::set_prop;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PictureSize {
    /// One cell per pixel.
    #[default]
    Full,
    /// 2x2 pixels per cell, drawn with quadrant blocks.
    Half,
}

impl FromStr for PictureSize {
    type Err = glyphtree_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(PictureSize::Full),
            "half" => Ok(PictureSize::Half),
            _ => Err(glyphtree_core::Error::invalid_option("picture size", s)),
        }
    }
}

/// Indexed by `top-left << 3 | top-right << 2 | bottom-left << 1 | bottom-right`.
const QUADRANTS: [&str; 16] = [
    " ", "▗", "▖", "▄", "▝", "▐", "▞", "▟", "▘", "▚", "▌", "▙", "▀", "▜", "▛", "█",
];

#[derive(Debug, Default, PartialEq)]
struct Pixels {
    rows: Vec<Vec<bool>>,
    height: usize,
    width: usize,
}

impl Pixels {
    /// Pads every row to the widest one; in half mode also to even dimensions.
    fn new(data: Vec<Vec<bool>>, size: PictureSize) -> Self {
        let height = data.len();
        let width = data.iter().map(Vec::len).max().unwrap_or(0);
        let (pad_h, pad_w) = match size {
            PictureSize::Full => (height, width),
            PictureSize::Half => (height + height % 2, width + width % 2),
        };
        let mut rows = data;
        rows.resize(pad_h, Vec::new());
        for row in &mut rows {
            row.resize(pad_w, false);
        }
        Self {
            rows,
            height,
            width,
        }
    }

    fn quadrant(&self, row: usize, col: usize) -> &'static str {
        let (y, x) = (row * 2, col * 2);
        let bit = |y: usize, x: usize| usize::from(self.rows[y][x]);
        let index = bit(y, x) << 3 | bit(y, x + 1) << 2 | bit(y + 1, x) << 1 | bit(y + 1, x + 1);
        QUADRANTS[index]
    }
}

#[derive(Debug, Default)]
struct PictureState {
    pixels: Pixels,
    size: PictureSize,
    color: Color,
    unicode: bool,
    rendered: bool,
}

/// A 1-bit image.
pub struct MonochromePicture {
    state: Shared<PictureState>,
}

impl MonochromePicture {
    pub fn new(data: Vec<Vec<bool>>) -> Self {
        Self {
            state: Shared::new(PictureState {
                pixels: Pixels::new(data, PictureSize::Full),
                unicode: true,
                ..PictureState::default()
            }),
        }
    }

    /// Half size needs quadrant glyphs.
    pub fn with_size(self, size: PictureSize, glyphs: GlyphSupport) -> glyphtree_core::Result<Self> {
        if size == PictureSize::Half && !glyphs.is_extended() {
            return Err(glyphtree_core::Error::UnsupportedGlyphs {
                what: "half-size picture".to_string(),
            });
        }
        {
            let mut state = self.state.lock();
            let data = std::mem::take(&mut state.pixels.rows);
            state.pixels = Pixels::new(data, size);
            state.size = size;
        }
        Ok(self)
    }

    pub fn color(self, color: Color) -> Self {
        self.state.lock().color = color;
        self
    }

    pub fn handle(&self) -> PictureHandle {
        PictureHandle {
            state: self.state.clone(),
        }
    }
}

impl Component for MonochromePicture {
    fn attach(&mut self, ctx: &Context) {
        self.state.lock().unicode = ctx.enable_unicode();
    }

    fn render(&mut self, surface: &mut Surface<'_>) {
        let mut state = self.state.lock();
        let style = TextStyle::fg(state.color);
        let plain = DrawOptions::styled(style);
        let pixels = &state.pixels;

        match state.size {
            PictureSize::Full => {
                let lit = if state.unicode {
                    ("█", plain)
                } else {
                    (" ", DrawOptions::styled(style.with_invert(true)))
                };
                for (y, row) in pixels.rows.iter().enumerate() {
                    for (x, &on) in row.iter().enumerate() {
                        let (glyph, options) = if on { lit } else { (" ", plain) };
                        surface.draw_string(y as i32, x as i32, glyph, &options);
                    }
                }
            }
            PictureSize::Half => {
                for row in 0..pixels.rows.len() / 2 {
                    for col in 0..pixels.width.div_ceil(2) {
                        surface.draw_string(row as i32, col as i32, pixels.quadrant(row, col), &plain);
                    }
                }
            }
        }
        state.rendered = true;
    }

    fn dirty(&self) -> bool {
        !self.state.lock().rendered
    }

    fn bounds(&self) -> Option<Rectangle> {
        let state = self.state.lock();
        let (h, w) = (state.pixels.height as i32, state.pixels.width as i32);
        Some(match state.size {
            PictureSize::Full => Rectangle::sized(h, w),
            PictureSize::Half => Rectangle::sized((h + 1) / 2, (w + 1) / 2),
        })
    }
}

#[derive(Clone, Debug)]
pub struct PictureHandle {
    state: Shared<PictureState>,
}

impl PictureHandle {
    /// Replaces the image. Always repaints, even for identical data.
    pub fn set_data(&self, data: Vec<Vec<bool>>) {
        let mut state = self.state.lock();
        state.pixels = Pixels::new(data, state.size);
        state.rendered = false;
    }

    pub fn set_color(&self, color: Color) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        set_prop(&mut state.rendered, &mut state.color, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ENABLE_UNICODE;
    use crate::testing::Harness;

    fn bits(rows: &[&str]) -> Vec<Vec<bool>> {
        rows.iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect()
    }

    #[test]
    fn quadrant_table_matches_bit_positions() {
        let one = |rows: &[&str]| Pixels::new(bits(rows), PictureSize::Half).quadrant(0, 0);
        assert_eq!(one(&["#.", ".."]), "▘");
        assert_eq!(one(&[".#", ".."]), "▝");
        assert_eq!(one(&["..", "#."]), "▖");
        assert_eq!(one(&["..", ".#"]), "▗");
        assert_eq!(one(&["#.", ".#"]), "▚");
        assert_eq!(one(&["##", "##"]), "█");
    }

    #[test]
    fn full_size_draws_blocks() {
        let mut h = Harness::new(2, 4);
        let mut el = h.attach(MonochromePicture::new(bits(&["#.#", ".#"])));
        h.render(&mut el);
        assert_eq!(h.lines(), vec!["█ █", " █"]);
        assert_eq!(el.bounds(), Some(Rectangle::sized(2, 3)));
    }

    #[test]
    fn full_size_without_unicode_inverts() {
        let mut h = Harness::new(1, 2);
        h.handle().settings_mut().put(&ENABLE_UNICODE, false);
        let mut el = h.attach(MonochromePicture::new(bits(&["#."])));
        h.render(&mut el);
        assert_eq!(h.row(0), "  ");
        assert!(h.display().is_inverted(0, 0));
        assert!(!h.display().is_inverted(0, 1));
    }

    #[test]
    fn half_size_pads_odd_edges() {
        let picture = MonochromePicture::new(bits(&["###", "#..", "..#"]))
            .with_size(PictureSize::Half, GlyphSupport::Extended)
            .unwrap();
        assert_eq!(picture.bounds(), Some(Rectangle::sized(2, 2)));
        let mut h = Harness::new(2, 2);
        let mut el = h.attach(picture);
        h.render(&mut el);
        assert_eq!(h.lines(), vec!["▛▘", " ▘"]);
    }

    #[test]
    fn half_size_needs_extended_glyphs() {
        let res = MonochromePicture::new(vec![]).with_size(PictureSize::Half, GlyphSupport::Basic);
        assert!(res.is_err());
        assert!("half".parse::<PictureSize>().is_ok());
    }

    #[test]
    fn set_data_always_repaints() {
        let picture = MonochromePicture::new(bits(&["#"]));
        let handle = picture.handle();
        let mut h = Harness::new(1, 1);
        let mut el = h.attach(picture);
        h.render(&mut el);
        handle.set_data(bits(&["#"]));
        assert!(el.dirty());
    }
}
