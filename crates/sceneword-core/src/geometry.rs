// Axis-aligned box geometry in image pixel space.
//
// Rectangles are half-open: a box at (x, y) with size (w, h) covers columns
// x..x+w and rows y..y+h, so `bottom_right` is one past the last pixel.

use std::ops::BitAnd;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Dimensions of the source image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned rectangle with integer coordinates.
///
/// Width and height are expected to be non-negative; a rectangle with a
/// zero (or negative) extent has zero area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area in square pixels. Degenerate rectangles report 0.
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        i64::from(self.width) * i64::from(self.height)
    }

    /// Returns `true` if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The corner one past the last covered pixel.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Shift the rectangle by `(dx, dy)`, keeping its size.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Intersection of two rectangles.
    ///
    /// Disjoint (or merely touching) rectangles yield `Rect::default()`, which
    /// has zero area.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);
        if x2 <= x1 || y2 <= y1 {
            return Rect::default();
        }
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }
}

impl BitAnd for Rect {
    type Output = Rect;

    fn bitand(self, rhs: Rect) -> Rect {
        self.intersection(&rhs)
    }
}

/// A quadrilateral given by its four corners in clockwise order starting at
/// the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl Quad {
    /// Build the quadrilateral of `rect` with every coordinate clamped into
    /// `[0, width - margin] x [0, height - margin]`.
    ///
    /// A margin of 2 keeps boxes touching the right or bottom border one
    /// pixel inside the last valid row/column.
    pub fn from_clamped_rect(rect: &Rect, size: ImageSize, margin: u32) -> Self {
        let max_x = i64::from(size.width) - i64::from(margin);
        let max_y = i64::from(size.height) - i64::from(margin);
        let cx = |v: i32| clamp_coord(v, max_x);
        let cy = |v: i32| clamp_coord(v, max_y);

        let tl = rect.top_left();
        let br = rect.bottom_right();
        let (left, top, right, bottom) = (cx(tl.x), cy(tl.y), cx(br.x), cy(br.y));

        Self {
            top_left: Point::new(left, top),
            top_right: Point::new(right, top),
            bottom_right: Point::new(right, bottom),
            bottom_left: Point::new(left, bottom),
        }
    }

    /// Corners as a flat `[x1, y1, x2, y2, x3, y3, x4, y4]` array.
    pub fn coords(&self) -> [i32; 8] {
        [
            self.top_left.x,
            self.top_left.y,
            self.top_right.x,
            self.top_right.y,
            self.bottom_right.x,
            self.bottom_right.y,
            self.bottom_left.x,
            self.bottom_left.y,
        ]
    }
}

fn clamp_coord(v: i32, max: i64) -> i32 {
    // An image narrower than the margin collapses everything onto 0.
    let max = max.max(0);
    i64::from(v).clamp(0, max) as i32
}
