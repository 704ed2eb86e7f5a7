// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Planar vector and body types
//!
//! The simulator works in two dimensions with double-precision floats.
//! [`Vector2`] is a small `Copy` value type used for positions, velocities
//! and accelerations of individual bodies; bulk per-step state lives in
//! `ndarray` arrays (see [`crate::integration::PhaseState`]).

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use three_body::Vector2;
///
/// let v = Vector2::new(3.0, 4.0);
/// assert_eq!(v.magnitude(), 5.0);
/// assert!(v.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vector2 {
    x: f64,
    y: f64,
}

impl Vector2 {
    /// Create a new vector with the given components
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vector2::new(0.0, 0.0)
    }

    /// Get the x component
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y component
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Get the vector as an array
    pub fn as_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Create a vector from an array
    pub const fn from_array(arr: [f64; 2]) -> Self {
        Vector2::new(arr[0], arr[1])
    }

    /// Squared Euclidean length
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, or the zero vector when the
    /// length is zero
    pub fn normalized_or_zero(&self) -> Vector2 {
        let norm = self.magnitude();
        if norm > 0.0 {
            *self / norm
        } else {
            Vector2::zero()
        }
    }

    /// The vector rotated a quarter turn counter-clockwise, `(-y, x)`
    pub fn perpendicular(&self) -> Vector2 {
        Vector2::new(-self.y, self.x)
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from(arr: [f64; 2]) -> Self {
        Vector2::from_array(arr)
    }
}

impl From<Vector2> for [f64; 2] {
    fn from(v: Vector2) -> Self {
        v.as_array()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

/// Display metadata carried alongside a body
///
/// The physics never reads these fields; they are passed through to the
/// renderer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyMetadata {
    /// Hex color used to draw the body and its trail
    pub color: String,
    /// Human-readable label
    pub name: String,
}

impl BodyMetadata {
    /// Create metadata from a color and a name
    pub fn new(color: impl Into<String>, name: impl Into<String>) -> Self {
        BodyMetadata {
            color: color.into(),
            name: name.into(),
        }
    }
}

/// A point mass and its initial state
///
/// `position` and `velocity` describe the state at `t = 0`. Integration
/// never writes back into a `Body`; each step produces fresh arrays instead,
/// so after a run the bodies remain the historical initial conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Mass in normalized units, constant for the whole run
    pub mass: f64,
    /// Drawing radius, unused by the physics
    pub radius: f64,
    /// Initial position
    pub position: Vector2,
    /// Initial velocity
    pub velocity: Vector2,
    /// Renderer metadata
    pub metadata: BodyMetadata,
}

impl Body {
    /// Linear momentum of the initial state, `m * v`
    pub fn momentum(&self) -> Vector2 {
        self.velocity * self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(0.5, -1.0);

        assert_eq!(a + b, Vector2::new(1.5, 1.0));
        assert_eq!(a - b, Vector2::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(a / 2.0, Vector2::new(0.5, 1.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));

        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
    }

    #[test]
    fn test_normalized_or_zero() {
        let v = Vector2::new(0.0, 2.0).normalized_or_zero();
        assert_eq!(v, Vector2::new(0.0, 1.0));

        // Zero length collapses to zero instead of dividing by zero
        assert_eq!(Vector2::zero().normalized_or_zero(), Vector2::zero());
    }

    #[test]
    fn test_perpendicular() {
        let v = Vector2::new(0.0, 2.0);
        let p = v.perpendicular();
        assert_eq!(p, Vector2::new(-2.0, 0.0));
        assert_eq!(v.x() * p.x() + v.y() * p.y(), 0.0);
    }

    #[test]
    fn test_validity() {
        assert!(Vector2::new(1.0, -1.0).is_valid());
        assert!(!Vector2::new(f64::NAN, 0.0).is_valid());
        assert!(!Vector2::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_vector_serializes_as_pair() {
        let v = Vector2::new(-2.0, 1.5);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[-2.0,1.5]");

        let back: Vector2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_body_momentum() {
        let body = Body {
            mass: 2.0,
            radius: 0.1,
            position: Vector2::zero(),
            velocity: Vector2::new(0.5, -0.25),
            metadata: BodyMetadata::new("#ffffff", "test"),
        };
        assert_eq!(body.momentum(), Vector2::new(1.0, -0.5));
    }
}
