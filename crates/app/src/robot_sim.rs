//! Mobile robot environment
//!
//! Owns a set of named differential-drive robots and moves one of them at a
//! time, either with a fixed command, an open-loop trajectory, the homing
//! controller or a rotate-then-translate move to a point.

use control::{
    HomingController, HomingGains, SineBodyTrajectory, SineWheelTrajectory, circle_wheel_speeds,
};
use log::debug;
use mechanics::DifferentialDriveRobot;
use serde::{Deserialize, Serialize};
use simcore::{
    BodyVelocity, FixedStepClock, Registry, SimError, Vector2D, WheelSpeeds, ensure_positive,
};

/// Per-tick drive command for a robot run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RobotCommand {
    /// Constant wheel speeds (rad/s)
    Wheels { left: f64, right: f64 },
    /// Constant body velocity
    Body { linear: f64, angular: f64 },
    /// Circle of `radius` at `rot_speed`
    Circle { radius: f64, rot_speed: f64 },
    /// Rectified sine wheel speeds
    SineWheels { amplitude: f64, omega: f64 },
    /// Unit speed with a sinusoidal turn rate
    SineBody { amplitude: f64, omega: f64 },
    /// Closed-loop homing on `target`
    Homing {
        target: Vector2D,
        #[serde(default)]
        gains: HomingGains,
    },
}

enum Drive {
    Wheels(WheelSpeeds),
    Body(BodyVelocity),
}

impl RobotCommand {
    /// Resolves the command at tick start time `t` for the robot's current state.
    fn drive(&self, robot: &DifferentialDriveRobot, t: f64) -> Drive {
        match *self {
            RobotCommand::Wheels { left, right } => Drive::Wheels(WheelSpeeds::new(left, right)),
            RobotCommand::Body { linear, angular } => {
                Drive::Body(BodyVelocity::new(linear, angular))
            }
            RobotCommand::Circle { radius, rot_speed } => Drive::Wheels(circle_wheel_speeds(
                radius,
                rot_speed,
                robot.config().axle_length,
            )),
            RobotCommand::SineWheels { amplitude, omega } => {
                Drive::Wheels(SineWheelTrajectory { amplitude, omega }.wheel_speeds(t))
            }
            RobotCommand::SineBody { amplitude, omega } => {
                Drive::Body(SineBodyTrajectory { amplitude, omega }.body_velocity(t))
            }
            RobotCommand::Homing { target, gains } => {
                Drive::Body(HomingController::new(target, gains).command(robot.pose().position))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RobotSimulator {
    robots: Registry<DifferentialDriveRobot>,
}

impl RobotSimulator {
    pub fn new(name: impl Into<String>) -> Self {
        RobotSimulator {
            robots: Registry::new(name, "robot"),
        }
    }

    pub fn name(&self) -> &str {
        self.robots.owner()
    }

    pub fn add_robot(&mut self, robot: DifferentialDriveRobot) -> Result<(), SimError> {
        self.robots.insert(robot)
    }

    pub fn remove_robot(&mut self, name: &str) -> Option<DifferentialDriveRobot> {
        self.robots.remove(name)
    }

    pub fn robot(&self, name: &str) -> Option<&DifferentialDriveRobot> {
        self.robots.get(name)
    }

    pub fn robots(&self) -> impl Iterator<Item = &DifferentialDriveRobot> {
        self.robots.iter()
    }

    /// Applies one wheel-speed step to the named robot. Returns `Ok(false)`
    /// when no robot has that name.
    pub fn drive_wheels(
        &mut self,
        name: &str,
        dt: f64,
        wheels: WheelSpeeds,
    ) -> Result<bool, SimError> {
        match self.robots.lookup_mut(name) {
            Some(robot) => {
                robot.step_from_wheel_speeds(dt, wheels)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drives the named robot from `t = 0` until `duration` and returns the
    /// time samples, aligned with the poses the run appended.
    ///
    /// An unknown name is logged and yields an empty time vector.
    pub fn run(
        &mut self,
        name: &str,
        dt: f64,
        duration: f64,
        command: RobotCommand,
    ) -> Result<Vec<f64>, SimError> {
        let clock = FixedStepClock::new(dt, duration)?;
        let Some(robot) = self.robots.lookup_mut(name) else {
            return Ok(Vec::new());
        };

        debug!("running robot {} for {} s (dt = {}): {:?}", name, duration, dt, command);
        let times = clock.run(|ctx| {
            let drive = command.drive(robot, ctx.t);
            match drive {
                Drive::Wheels(wheels) => robot.step_from_wheel_speeds(ctx.dt, wheels),
                Drive::Body(body) => robot.step_from_body_velocities(ctx.dt, body),
            }
        })?;
        debug!("robot {} finished at {:?}", name, robot.pose());
        Ok(times)
    }

    /// Moves the named robot to `target` in two phases of `duration` each:
    /// turn in place to face the target, then drive straight to it.
    ///
    /// Both rates are spread over the ticks the clock actually performs, so
    /// the robot ends on the target even when `duration / dt` is not a whole
    /// number of steps.
    pub fn go_to(
        &mut self,
        name: &str,
        target: Vector2D,
        dt: f64,
        duration: f64,
    ) -> Result<Vec<f64>, SimError> {
        let clock = FixedStepClock::new(dt, duration)?;
        ensure_positive("duration", duration)?;
        let Some(robot) = self.robots.lookup_mut(name) else {
            return Ok(Vec::new());
        };
        let phase = clock.ticks() as f64 * clock.dt();

        let start = robot.pose();
        let misalignment = start.heading - (target - start.position).bearing();
        let turn = BodyVelocity::new(0.0, -misalignment / phase);
        let mut times = clock.run(|ctx| robot.step_from_body_velocities(ctx.dt, turn))?;

        let distance = robot.pose().position.distance_to(target);
        let advance = BodyVelocity::new(distance / phase, 0.0);
        let second = clock.run(|ctx| robot.step_from_body_velocities(ctx.dt, advance))?;

        let offset = times.last().copied().unwrap_or(0.0);
        times.extend(second.iter().skip(1).map(|t| t + offset));
        debug!("robot {} moved to {:?} (target {:?})", name, robot.pose().position, target);
        Ok(times)
    }
}
