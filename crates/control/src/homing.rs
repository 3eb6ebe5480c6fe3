//! Position homing for mobile robots
//!
//! Converts the Cartesian error to a target point into a translational
//! speed proportional to the distance and a rotational correction opposed
//! to the bearing of the target.

use serde::{Deserialize, Serialize};
use simcore::{BodyVelocity, Vector2D};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomingGains {
    /// Translational gain (1/s)
    pub k_trans: f64,
    /// Rotational gain
    pub k_rot: f64,
}

impl Default for HomingGains {
    fn default() -> Self {
        HomingGains { k_trans: 0.02, k_rot: 0.09 }
    }
}

impl HomingGains {
    pub fn new(k_trans: f64, k_rot: f64) -> Self {
        HomingGains { k_trans, k_rot }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomingController {
    pub target: Vector2D,
    pub gains: HomingGains,
}

impl HomingController {
    pub fn new(target: Vector2D, gains: HomingGains) -> Self {
        HomingController { target, gains }
    }

    pub fn command(&self, position: Vector2D) -> BodyVelocity {
        let position_error = position - self.target;
        let bearing = (self.target - position).bearing();
        BodyVelocity {
            linear: self.gains.k_trans * position_error.norm(),
            angular: -self.gains.k_rot * bearing,
        }
    }
}
