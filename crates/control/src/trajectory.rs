//! Deterministic open-loop trajectories for differential-drive robots

use serde::{Deserialize, Serialize};
use simcore::{BodyVelocity, WheelSpeeds};
use std::f64::consts::{FRAC_PI_2, PI};

/// Wheel speeds that drive a circle of `radius` at `rot_speed`.
///
/// The left wheel runs on the outside of the turn, so the robot circles
/// clockwise.
pub fn circle_wheel_speeds(radius: f64, rot_speed: f64, axle_length: f64) -> WheelSpeeds {
    WheelSpeeds {
        left: rot_speed * (radius + axle_length / 2.0),
        right: rot_speed * (radius - axle_length / 2.0),
    }
}

/// Rectified sine on each wheel, the right wheel a quarter period ahead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SineWheelTrajectory {
    pub amplitude: f64,
    pub omega: f64,
}

impl Default for SineWheelTrajectory {
    fn default() -> Self {
        SineWheelTrajectory { amplitude: 1.0, omega: 1.0 }
    }
}

impl SineWheelTrajectory {
    pub fn wheel_speeds(&self, t: f64) -> WheelSpeeds {
        let a = self.amplitude;
        let w = self.omega;
        WheelSpeeds {
            left: a * (w * t).sin().abs(),
            right: a * (FRAC_PI_2 * w + w * t).sin().abs(),
        }
    }
}

/// Unit forward speed with a sinusoidal turn rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SineBodyTrajectory {
    pub amplitude: f64,
    pub omega: f64,
}

impl Default for SineBodyTrajectory {
    fn default() -> Self {
        SineBodyTrajectory { amplitude: PI / 2.0, omega: 1.0 }
    }
}

impl SineBodyTrajectory {
    pub fn body_velocity(&self, t: f64) -> BodyVelocity {
        BodyVelocity {
            linear: 1.0,
            angular: self.amplitude * (self.omega * t).sin(),
        }
    }
}
