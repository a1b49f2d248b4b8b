//! Planar math utilities for the simulation.
//!
//! All positions live on the ground plane; the third axis only appears
//! as a scalar altitude in projectile/obstacle tests, so a 2D vector
//! type is all the simulation needs.

use serde::{Deserialize, Serialize};

/// 2D vector used for positions, directions, and velocities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt for comparisons).
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Vector length.
    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Dot product of two vectors.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Linearly interpolate between two points.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Normalize to unit length. Returns [`Vec2::ZERO`] for the zero
    /// vector; callers that need a direction out of a coincident pair
    /// must substitute a randomized one (see the movement resolver).
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / len, self.y / len)
    }

    /// Unit vector for a facing angle in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self {
        let rad = degrees.to_radians();
        Self::new(rad.cos(), rad.sin())
    }

    /// Facing angle of this vector in degrees, wrapped to [0, 360).
    #[must_use]
    pub fn to_degrees(self) -> f32 {
        wrap_degrees(self.y.atan2(self.x).to_degrees())
    }

    /// Clamp both coordinates to a symmetric square of the given
    /// half-extent.
    #[must_use]
    pub fn clamp_to_square(self, half_extent: f32) -> Self {
        Self {
            x: self.x.clamp(-half_extent, half_extent),
            y: self.y.clamp(-half_extent, half_extent),
        }
    }
}

/// Wrap an angle in degrees into [0, 360).
#[must_use]
pub fn wrap_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Vec2::new(3.0, 0.0);
        let b = Vec2::new(0.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vec2::new(3.0, 4.0);
        let n = v.normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
        // Direction preserved: x/y ratio matches 3/4
        assert!((n.x * 4.0 - n.y * 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_degrees_round_trip() {
        let v = Vec2::from_degrees(30.0);
        assert!((v.to_degrees() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(0.0), 0.0);
    }

    #[test]
    fn test_clamp_to_square() {
        let v = Vec2::new(700.0, -700.0).clamp_to_square(600.0);
        assert_eq!(v, Vec2::new(600.0, -600.0));
    }

    #[test]
    fn test_lerp() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 20.0);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, 10.0));
    }
}
