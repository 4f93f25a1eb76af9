//! Geometry value types.
//!
//! Rectangles are stored as edges rather than origin plus size: every layout
//! step adds offsets to both edges, and hit-testing compares against edges.

/// An axis-aligned rectangle stored as its four edges, in window pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x0: f32,
    /// Top edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge.
    pub y1: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: 0.0,
    };

    /// Creates a rectangle from its edges.
    #[must_use]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates a rectangle anchored at the origin with the given size.
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Returns the width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Returns the height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Returns the rectangle moved by `(dx, dy)`; both edges shift.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    /// Returns true if the point lies inside the rectangle or on any edge.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point2) -> bool {
        let x = f32::from(point.x);
        let y = f32::from(point.y);
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Returns true if `other` lies entirely within this rectangle.
    #[must_use]
    pub fn encloses(&self, other: &Self) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }
}

/// A pixel position in window-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point2 {
    /// Horizontal position.
    pub x: i16,
    /// Vertical position.
    pub y: i16,
}

impl Point2 {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}
