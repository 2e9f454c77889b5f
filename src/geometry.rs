//! Geometric primitives for panel placement.
//!
//! Placement rectangles use figure-fraction coordinates with the origin at the
//! bottom-left corner of the figure, which is what plot axes are positioned with.

/// A 2D point in figure-fraction coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A placement rectangle defined by its bottom-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the left edge.
    pub left: f64,
    /// Y coordinate of the bottom edge.
    pub bottom: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// The whole figure.
    pub const UNIT: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a new rectangle.
    #[must_use]
    pub const fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self { left, bottom, width, height }
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Y coordinate of the top edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    /// Top-left corner.
    #[must_use]
    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top())
    }

    /// Area shared with another rectangle; zero when they only touch.
    #[must_use]
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let w = self.right().min(other.right()) - self.left.max(other.left);
        let h = self.top().min(other.top()) - self.bottom.max(other.bottom);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }

    /// As a `[left, bottom, width, height]` array.
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [self.left, self.bottom, self.width, self.height]
    }
}

/// Total figure size in device units (inches for most backends).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FigureSize {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl FigureSize {
    /// Create a new figure size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
