use serde::{Deserialize, Serialize};

/// Integer axis-aligned rectangle in world units, `min` inclusive and `max` exclusive.
///
/// World space is y-down: `min_y` is the top edge and `max_y` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// Build a rectangle from two corners, swapping coordinates so that min <= max.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle whose top-left corner is `(x, y)`. The far edges saturate at
    /// the `i32` range.
    pub const fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    pub const fn width(&self) -> i32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub const fn height(&self) -> i32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// True when `other` lies entirely inside `self` (edges may coincide).
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }
}
