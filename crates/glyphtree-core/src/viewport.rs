/// Scroll position of a window onto taller content, in rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub y: u32,
    pub viewport_h: u16,
    pub content_h: u32,
}

impl ViewportState {
    pub fn set_viewport(&mut self, h: u16) {
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, h: u32) {
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        let next = self.y as i64 + delta as i64;
        self.y = next.clamp(0, self.max_y() as i64) as u32;
    }

    pub fn page_down(&mut self) {
        self.scroll_y_by(self.viewport_h.saturating_sub(1).max(1) as i32);
    }

    pub fn page_up(&mut self) {
        self.scroll_y_by(-(self.viewport_h.saturating_sub(1).max(1) as i32));
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    pub fn to_bottom(&mut self) {
        self.y = self.max_y();
    }

    pub fn can_scroll(&self) -> bool {
        self.content_h > u32::from(self.viewport_h)
    }

    pub fn percent_y(&self) -> Option<u8> {
        if self.content_h == 0 || self.viewport_h == 0 || !self.can_scroll() {
            return None;
        }
        let visible_bottom = self.y.saturating_add(self.viewport_h as u32) as f64;
        let pct = (visible_bottom / self.content_h as f64 * 100.0).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }

    /// Position and length of a scrollbar thumb on a track `track_h` rows tall.
    ///
    /// `None` when everything fits and no thumb is needed.
    pub fn scrollbar_thumb(&self, track_h: u16) -> Option<(u16, u16)> {
        if track_h == 0 || !self.can_scroll() {
            return None;
        }
        let track = track_h as f64;
        let thumb_h = ((self.viewport_h as f64 / self.content_h as f64) * track)
            .round()
            .clamp(1.0, track) as u16;
        let max_y = self.max_y().max(1) as f64;
        let thumb_top = ((self.y as f64 / max_y) * (track - thumb_h as f64))
            .round()
            .clamp(0.0, (track - thumb_h as f64).max(0.0)) as u16;
        Some((thumb_top, thumb_h))
    }

    fn max_y(&self) -> u32 {
        self.content_h.saturating_sub(self.viewport_h as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_clamps_to_content() {
        let mut s = ViewportState::default();
        s.set_viewport(5);
        s.set_content(6);
        s.y = 99;
        s.clamp();
        assert_eq!(s.y, 1);
        s.set_content(3);
        assert_eq!(s.y, 0);
    }

    #[test]
    fn paging_moves_by_one_less_than_the_window() {
        let mut s = ViewportState::default();
        s.set_viewport(4);
        s.set_content(20);
        s.page_down();
        assert_eq!(s.y, 3);
        s.to_bottom();
        assert_eq!(s.y, 16);
        s.page_up();
        assert_eq!(s.y, 13);
        assert_eq!(s.percent_y(), Some(85));
    }

    #[test]
    fn thumb_tracks_position() {
        let mut s = ViewportState::default();
        s.set_viewport(5);
        s.set_content(10);
        assert_eq!(s.scrollbar_thumb(5), Some((0, 3)));
        s.to_bottom();
        assert_eq!(s.scrollbar_thumb(5), Some((2, 3)));
        s.set_content(4);
        assert_eq!(s.scrollbar_thumb(5), None);
    }
}
