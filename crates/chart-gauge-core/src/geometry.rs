//! Geometric primitives: `Point`, `Size` and the gauge's polar coordinate
//! convention.
//!
//! Angles are in radians and measured clockwise from straight up, so the
//! conversion to screen coordinates is `x = r·cos(θ − π/2)`,
//! `y = r·sin(θ − π/2)`. Angle `0` points up, `−π/2` points left and `π/2`
//! points right.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point at `radius` from the origin along a gauge angle.
    #[must_use]
    pub fn polar(radius: f64, angle: f64) -> Self {
        let theta = angle - FRAC_PI_2;
        Self::new(radius * theta.cos(), radius * theta.sin())
    }

    /// Calculate Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }

    /// Rotate this point about the origin by `degrees`.
    ///
    /// Positive values turn counter-clockwise on screen; label placement
    /// uses negative offsets to push text clockwise along the arc.
    #[must_use]
    pub fn rotate_degrees(&self, degrees: f64) -> Self {
        let r = degrees.to_radians();
        Self::new(
            self.x.mul_add(r.cos(), self.y * r.sin()),
            (-self.x).mul_add(r.sin(), self.y * r.cos()),
        )
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Square size derived from a width.
    #[must_use]
    pub const fn square(width: f64) -> Self {
        Self::new(width, width)
    }

    /// Whether both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_polar_zero_points_up() {
        let p = Point::polar(10.0, 0.0);
        assert!(close(p.x, 0.0));
        assert!(close(p.y, -10.0));
    }

    #[test]
    fn test_polar_quarter_turns() {
        let left = Point::polar(10.0, -FRAC_PI_2);
        assert!(close(left.x, -10.0));
        assert!(close(left.y, 0.0));

        let right = Point::polar(10.0, FRAC_PI_2);
        assert!(close(right.x, 10.0));
        assert!(close(right.y, 0.0));

        let down = Point::polar(10.0, PI);
        assert!(close(down.y, 10.0));
    }

    #[test]
    fn test_rotate_negative_moves_clockwise() {
        // A point straight up, rotated by -90°, ends up on the right.
        let p = Point::new(0.0, -10.0).rotate_degrees(-90.0);
        assert!(close(p.x, 10.0));
        assert!(close(p.y, 0.0));
    }

    #[test]
    fn test_rotate_preserves_distance() {
        let p = Point::new(3.0, 4.0);
        let r = p.rotate_degrees(-10.0);
        assert!(close(r.distance(&Point::ORIGIN), 5.0));
    }

    #[test]
    fn test_point_ops() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 5.0);
        assert_eq!(a + b, Point::new(4.0, 7.0));
        assert_eq!(b - a, Point::new(2.0, 3.0));
    }

    #[test]
    fn test_size_square_and_positive() {
        assert_eq!(Size::square(400.0), Size::new(400.0, 400.0));
        assert!(Size::new(1.0, 1.0).is_positive());
        assert!(!Size::new(0.0, 1.0).is_positive());
        assert!(!Size::new(f64::NAN, 1.0).is_positive());
    }
}
