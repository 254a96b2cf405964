/// Axis-aligned rectangle in character cells.
///
/// `bottom` and `right` are exclusive. Negative and zero-area rectangles are representable;
/// [`Rectangle::width`] and [`Rectangle::height`] report them as-is, so callers clamp before use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Rectangle {
    pub const fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Rectangle anchored at the origin.
    pub const fn sized(height: i32, width: i32) -> Self {
        Self::new(0, height, 0, width)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub const fn contains(&self, y: i32, x: i32) -> bool {
        y >= self.top && y < self.bottom && x >= self.left && x < self.right
    }

    pub const fn offset(&self, y: i32, x: i32) -> Self {
        Self::new(self.top + y, self.bottom + y, self.left + x, self.right + x)
    }

    /// Clamps every edge into `bounds`.
    ///
    /// The result always lies inside `bounds`, but may have zero area.
    pub fn clip(&self, bounds: &Rectangle) -> Self {
        Self {
            top: self.top.max(bounds.top).min(bounds.bottom),
            bottom: self.bottom.min(bounds.bottom).max(bounds.top),
            left: self.left.max(bounds.left).min(bounds.right),
            right: self.right.min(bounds.right).max(bounds.left),
        }
    }

    /// Shrinks each edge inward; used by padding and borders.
    pub const fn inset(&self, top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self::new(
            self.top + top,
            self.bottom - bottom,
            self.left + left,
            self.right - right,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rectangle::new(2, 4, 3, 6);
        assert!(r.contains(2, 3));
        assert!(r.contains(3, 5));
        assert!(!r.contains(4, 3));
        assert!(!r.contains(2, 6));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn offset_moves_both_pairs() {
        let r = Rectangle::sized(2, 3).offset(5, 7);
        assert_eq!(r, Rectangle::new(5, 7, 7, 10));
        assert_eq!(r.height(), 2);
        assert_eq!(r.width(), 3);
    }

    #[test]
    fn clip_intersects_overlapping_rectangles() {
        let a = Rectangle::new(0, 10, 0, 10);
        let b = Rectangle::new(5, 20, -5, 4);
        assert_eq!(a.clip(&b), Rectangle::new(5, 10, 0, 4));
    }

    #[test]
    fn clip_never_goes_negative() {
        let samples = [
            Rectangle::new(0, 10, 0, 10),
            Rectangle::new(-5, -1, -5, -1),
            Rectangle::new(20, 30, 20, 30),
            Rectangle::new(3, 3, 4, 4),
            Rectangle::new(5, 2, 8, 1),
            Rectangle::new(-100, 100, 7, 9),
        ];
        for a in &samples {
            for b in &samples {
                let c = a.clip(b);
                assert!(c.width() >= 0, "{a:?} clip {b:?} = {c:?}");
                assert!(c.height() >= 0, "{a:?} clip {b:?} = {c:?}");
            }
        }
    }

    #[test]
    fn clip_of_disjoint_rectangle_collapses_to_edge() {
        let screen = Rectangle::sized(24, 80);
        let off = Rectangle::new(30, 40, 10, 20);
        let c = off.clip(&screen);
        assert_eq!(c.height(), 0);
        assert_eq!(c.top, 24);
        assert_eq!(c.width(), 10);
    }
}
