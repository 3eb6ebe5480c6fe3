use std::ops::{Add, Mul, Sub};

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Plain 2D coordinate pair (m).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ORIGIN: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector from the +x axis, in (-pi, pi].
    pub fn bearing(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn distance_to(&self, other: Vector2D) -> f64 {
        (other - *self).norm()
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        Vector2D::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Vector2<f64>> for Vector2D {
    fn from(v: Vector2<f64>) -> Self {
        Vector2D::new(v[0], v[1])
    }
}

impl From<Vector2D> for Vector2<f64> {
    fn from(v: Vector2D) -> Self {
        Vector2::new(v.x, v.y)
    }
}
