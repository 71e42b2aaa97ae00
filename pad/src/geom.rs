#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in logical (CSS pixel) coordinates relative to the canvas origin.
///
/// Points are never clamped to the canvas; an overshooting pointer produces
/// coordinates outside `0..width` / `0..height` and the surface clips them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Origin of the canvas bounding rectangle in client (viewport) coordinates,
/// as reported by `getBoundingClientRect` at the moment of an event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
}

impl ClientRect {
    #[must_use]
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Map a client-space position to logical canvas coordinates.
    #[must_use]
    pub fn to_local(&self, client_x: f64, client_y: f64) -> Point {
        Point {
            x: client_x - self.left,
            y: client_y - self.top,
        }
    }
}

/// A rectangle of physical pixels: columns `x..x + width`, rows `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    #[must_use]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Number of pixels covered.
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }
}
