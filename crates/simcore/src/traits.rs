use serde::{Deserialize, Serialize};

use crate::vector::Vector2D;

// Mechanical Traits
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector2D,
    pub heading: f64, // radians
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Pose {
            position: Vector2D::new(x, y),
            heading,
        }
    }
}

/// Translational (m/s) and rotational (rad/s) velocity of a robot body.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyVelocity {
    pub linear: f64,
    pub angular: f64,
}

impl BodyVelocity {
    pub fn new(linear: f64, angular: f64) -> Self {
        BodyVelocity { linear, angular }
    }
}

/// Wheel rotation speeds (rad/s).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelSpeeds {
    pub left: f64,
    pub right: f64,
}

impl WheelSpeeds {
    pub fn new(left: f64, right: f64) -> Self {
        WheelSpeeds { left, right }
    }
}

// General Traits
#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    pub dt: f64,
    /// Time at the start of the tick.
    pub t: f64,
}

impl SimContext {
    /// Time once this tick has been applied.
    pub fn end_time(&self) -> f64 {
        self.t + self.dt
    }
}

pub trait Model {
    fn reset(&mut self);
}

/// Entities that can be looked up by name inside a [`crate::Registry`].
pub trait Named {
    fn name(&self) -> &str;
}
