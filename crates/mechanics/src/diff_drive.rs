use log::debug;
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use simcore::{
    BodyVelocity, History, Model, Named, Pose, SimError, Vector2D, WheelSpeeds, ensure_positive,
    ensure_time_step,
};

/// Physical configuration of a two-wheeled differential-drive base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffDriveConfig {
    /// Wheel radius r in meters.
    pub wheel_radius: f64,
    /// Distance d between the two wheels in meters.
    pub axle_length: f64,
}

impl Default for DiffDriveConfig {
    fn default() -> Self {
        // Kobuki base
        DiffDriveConfig {
            wheel_radius: 0.075,
            axle_length: 0.35,
        }
    }
}

impl DiffDriveConfig {
    pub fn new(wheel_radius: f64, axle_length: f64) -> Self {
        DiffDriveConfig { wheel_radius, axle_length }
    }

    pub fn with_wheel_radius(mut self, wheel_radius: f64) -> Self {
        self.wheel_radius = wheel_radius;
        self
    }

    pub fn with_axle_length(mut self, axle_length: f64) -> Self {
        self.axle_length = axle_length;
        self
    }

    /// Jacobian mapping `(right, left)` wheel speeds to `(linear, angular)`
    /// body velocity: `[[r/2, r/2], [r/d, -r/d]]`.
    pub fn jacobian(&self) -> Result<Matrix2<f64>, SimError> {
        let r = ensure_positive("wheel_radius", self.wheel_radius)?;
        let d = ensure_positive("axle_length", self.axle_length)?;
        let a = r / 2.0;
        let b = r / d;
        Ok(Matrix2::new(a, a, b, -b))
    }
}

/// Kinematic model of a differential-drive mobile robot.
///
/// The pose is integrated one fixed step at a time; position and heading
/// histories always have the same length.
#[derive(Debug, Clone)]
pub struct DifferentialDriveRobot {
    name: String,
    config: DiffDriveConfig,
    jacobian: Matrix2<f64>,
    jacobian_inverse: Matrix2<f64>,
    position: History<Vector2D>,
    orientation: History<f64>,
}

impl DifferentialDriveRobot {
    pub fn new(name: impl Into<String>, config: DiffDriveConfig) -> Result<Self, SimError> {
        Self::with_pose(name, config, Pose::default())
    }

    pub fn with_pose(
        name: impl Into<String>,
        config: DiffDriveConfig,
        pose: Pose,
    ) -> Result<Self, SimError> {
        let jacobian = config.jacobian()?;
        let jacobian_inverse = jacobian.try_inverse().ok_or(SimError::SingularJacobian)?;
        Ok(DifferentialDriveRobot {
            name: name.into(),
            config,
            jacobian,
            jacobian_inverse,
            position: History::new(pose.position),
            orientation: History::new(pose.heading),
        })
    }

    pub fn config(&self) -> &DiffDriveConfig {
        &self.config
    }

    pub fn jacobian(&self) -> &Matrix2<f64> {
        &self.jacobian
    }

    pub fn position(&self) -> &[Vector2D] {
        self.position.as_slice()
    }

    pub fn orientation(&self) -> &[f64] {
        self.orientation.as_slice()
    }

    /// Latest pose
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position.last(),
            heading: self.orientation.last(),
        }
    }

    /// Wheel speeds to body velocity. The Jacobian acts on `(right, left)`.
    pub fn forward_kinematics(&self, wheels: WheelSpeeds) -> BodyVelocity {
        let body = self.jacobian * Vector2::new(wheels.right, wheels.left);
        BodyVelocity::new(body[0], body[1])
    }

    /// Body velocity to wheel speeds.
    pub fn inverse_kinematics(&self, body: BodyVelocity) -> WheelSpeeds {
        let wheels = self.jacobian_inverse * Vector2::new(body.linear, body.angular);
        WheelSpeeds::new(wheels[1], wheels[0])
    }

    pub fn step_from_wheel_speeds(
        &mut self,
        dt: f64,
        wheels: WheelSpeeds,
    ) -> Result<(), SimError> {
        let body = self.forward_kinematics(wheels);
        self.step_from_body_velocities(dt, body)
    }

    /// Heading is advanced first and the new heading drives the position
    /// update.
    pub fn step_from_body_velocities(
        &mut self,
        dt: f64,
        body: BodyVelocity,
    ) -> Result<(), SimError> {
        let dt = ensure_time_step(dt)?;
        let heading = self.orientation.last() + dt * body.angular;
        let last = self.position.last();
        let next = Vector2D::new(
            last.x + dt * body.linear * heading.cos(),
            last.y + dt * body.linear * heading.sin(),
        );
        self.orientation.push(heading);
        self.position.push(next);
        Ok(())
    }
}

impl Named for DifferentialDriveRobot {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Model for DifferentialDriveRobot {
    fn reset(&mut self) {
        debug!("resetting robot {} to its initial pose", self.name);
        self.position.reset();
        self.orientation.reset();
    }
}
