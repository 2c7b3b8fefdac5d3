use glam::UVec2;

/// Half-open pixel rectangle `[min.x, max.x) x [min.y, max.y)`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: UVec2,
    pub max: UVec2,
}

impl Rect {
    /// Builds a rectangle from two corners, swapping coordinates so that
    /// `min <= max` holds on both axes.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        let a = UVec2::new(x0, y0);
        let b = UVec2::new(x1, y1);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> u32 {
        self.max.y - self.min.y
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Largest rectangle contained in both `self` and `other`.
    ///
    /// A disjoint pair yields an empty rectangle anchored at the overlap's
    /// start rather than the origin, so a blank band keeps its position.
    pub fn intersect(&self, other: Rect) -> Rect {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max).max(min);
        Rect { min, max }
    }

    /// Same columns, rows `[y0, y1)`.
    pub fn with_rows(&self, y0: u32, y1: u32) -> Rect {
        Rect::new(self.min.x, y0, self.max.x, y1)
    }

    /// Same rows, columns `[x0, x1)`.
    pub fn with_columns(&self, x0: u32, x1: u32) -> Rect {
        Rect::new(x0, self.min.y, x1, self.max.y)
    }
}
