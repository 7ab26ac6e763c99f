//! Rectangles with fractional coordinates.

use serde::{Deserialize, Serialize};

/// A rectangle that keeps its precise (fractional) position and size and
/// exposes truncated integer pixel coordinates for drawing.
///
/// Layout arithmetic runs on the precise values so rounding never
/// accumulates across rows or pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreciseRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PreciseRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// A rectangle of the given size at the origin.
    #[must_use]
    pub const fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Integer x coordinate.
    #[must_use]
    pub fn left(&self) -> i32 {
        self.x as i32
    }

    /// Integer y coordinate.
    #[must_use]
    pub fn top(&self) -> i32 {
        self.y as i32
    }

    #[must_use]
    pub fn pixel_width(&self) -> i32 {
        self.width as i32
    }

    #[must_use]
    pub fn pixel_height(&self) -> i32 {
        self.height as i32
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Move the rectangle, keeping its size.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Check if a point lies inside. The right and bottom edges are exclusive.
    #[must_use]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}
