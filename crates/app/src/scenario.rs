//! Scenario files
//!
//! A scenario names the simulator, sets default `dt`/`duration` and lists the
//! motor and robot runs to perform. Runs execute in file order, motors first.

use std::collections::BTreeMap;
use std::path::Path;

use control::HomingGains;
use electrical::{DcMotor, MotorConstant, MotorInitialState};
use log::{debug, info};
use mechanics::{DiffDriveConfig, DifferentialDriveRobot};
use serde::{Deserialize, Serialize};
use simcore::{Pose, SimError, Vector2D};
use thiserror::Error;

use crate::motor_sim::{MotorCommand, MotorSimulator};
use crate::robot_sim::{RobotCommand, RobotSimulator};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("simulation failed: {0}")]
    Sim(#[from] SimError),

    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot read scenario: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorRun {
    pub name: String,
    #[serde(default)]
    pub constants: MotorConstant,
    #[serde(default)]
    pub initial: MotorInitialState,
    pub command: MotorCommand,
    #[serde(default)]
    pub dt: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotTask {
    Run(RobotCommand),
    GoTo { target: Vector2D },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotRun {
    pub name: String,
    #[serde(default)]
    pub config: DiffDriveConfig,
    #[serde(default)]
    pub initial_pose: Pose,
    pub task: RobotTask,
    #[serde(default)]
    pub dt: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub motors: Vec<MotorRun>,
    #[serde(default)]
    pub robots: Vec<RobotRun>,
}

fn default_dt() -> f64 {
    0.01
}

fn default_duration() -> f64 {
    1.0
}

/// Populated simulators and the time vector of every run, keyed by entity name.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub motors: MotorSimulator,
    pub robots: RobotSimulator,
    pub motor_times: BTreeMap<String, Vec<f64>>,
    pub robot_times: BTreeMap<String, Vec<f64>>,
}

impl ScenarioConfig {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Four motors (open loop, inductive, PI, P) and five robots exercising
    /// every drive mode.
    pub fn demo() -> Self {
        let motor = |name: &str, command| MotorRun {
            name: name.into(),
            constants: MotorConstant::default(),
            initial: MotorInitialState::default(),
            command,
            dt: None,
            duration: None,
        };
        let robot = |name: &str, task| RobotRun {
            name: name.into(),
            config: DiffDriveConfig::default(),
            initial_pose: Pose::default(),
            task,
            dt: None,
            duration: None,
        };

        ScenarioConfig {
            name: "simu".into(),
            dt: default_dt(),
            duration: default_duration(),
            motors: vec![
                motor("mot1", MotorCommand::OpenLoop { voltage: 1.0 }),
                motor("mot2", MotorCommand::OpenLoopInductive { voltage: 1.0 }),
                motor(
                    "mot3",
                    MotorCommand::ProportionalIntegral { setpoint: 1.0, kp: 20.0, ki: 60.0 },
                ),
                motor("mot4", MotorCommand::Proportional { setpoint: 1.0, kp: 20.0 }),
            ],
            robots: vec![
                RobotRun {
                    duration: Some(10.0),
                    ..robot(
                        "rob1",
                        RobotTask::Run(RobotCommand::Circle { radius: 1.0, rot_speed: 1.0 }),
                    )
                },
                RobotRun {
                    duration: Some(10.0),
                    ..robot(
                        "rob2",
                        RobotTask::Run(RobotCommand::SineBody {
                            amplitude: std::f64::consts::FRAC_PI_2,
                            omega: 1.0,
                        }),
                    )
                },
                robot("rob3", RobotTask::GoTo { target: Vector2D::new(3.0, 4.0) }),
                RobotRun {
                    duration: Some(10.0),
                    ..robot(
                        "rob4",
                        RobotTask::Run(RobotCommand::SineWheels { amplitude: 1.0, omega: 1.0 }),
                    )
                },
                RobotRun {
                    dt: Some(0.02),
                    duration: Some(50.0),
                    ..robot(
                        "rob5",
                        RobotTask::Run(RobotCommand::Homing {
                            target: Vector2D::new(10.0, 5.0),
                            gains: HomingGains::default(),
                        }),
                    )
                },
            ],
        }
    }

    /// Builds both simulators and performs every run.
    pub fn run(&self) -> Result<ScenarioOutcome, ScenarioError> {
        let mut motors = MotorSimulator::new(self.name.as_str());
        let mut robots = RobotSimulator::new(self.name.as_str());
        let mut motor_times = BTreeMap::new();
        let mut robot_times = BTreeMap::new();

        for entry in &self.motors {
            motors.add_motor(DcMotor::with_initial_state(
                entry.name.as_str(),
                entry.constants,
                entry.initial,
            )?)?;
        }
        for entry in &self.robots {
            robots.add_robot(DifferentialDriveRobot::with_pose(
                entry.name.as_str(),
                entry.config,
                entry.initial_pose,
            )?)?;
        }
        info!(
            "scenario {}: {} motor(s), {} robot(s)",
            self.name,
            self.motors.len(),
            self.robots.len()
        );

        for entry in &self.motors {
            let dt = entry.dt.unwrap_or(self.dt);
            let duration = entry.duration.unwrap_or(self.duration);
            let times = motors.run(&entry.name, dt, duration, entry.command)?;
            motor_times.insert(entry.name.clone(), times);
        }

        for entry in &self.robots {
            let dt = entry.dt.unwrap_or(self.dt);
            let duration = entry.duration.unwrap_or(self.duration);
            let times = match entry.task {
                RobotTask::Run(command) => robots.run(&entry.name, dt, duration, command)?,
                RobotTask::GoTo { target } => robots.go_to(&entry.name, target, dt, duration)?,
            };
            robot_times.insert(entry.name.clone(), times);
        }
        debug!("scenario {} done", self.name);

        Ok(ScenarioOutcome {
            motors,
            robots,
            motor_times,
            robot_times,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use simcore::Named;

    const SCENARIO: &str = r#"{
        "name": "bench",
        "dt": 0.01,
        "motors": [
            { "name": "m", "command": { "mode": "open_loop", "voltage": 1.0 } },
            {
                "name": "pi",
                "constants": { "viscous_friction": 0.2 },
                "command": {
                    "mode": "proportional_integral",
                    "setpoint": 1.0,
                    "kp": 20.0,
                    "ki": 60.0
                },
                "duration": 2.0
            }
        ],
        "robots": [
            {
                "name": "r",
                "task": { "run": { "mode": "wheels", "left": 1.0, "right": 1.0 } }
            },
            {
                "name": "g",
                "initial_pose": { "position": { "x": 1.0, "y": 1.0 }, "heading": 0.5 },
                "task": { "go_to": { "target": { "x": -2.0, "y": 3.0 } } }
            },
            {
                "name": "h",
                "task": { "run": { "mode": "homing", "target": { "x": 5.0, "y": 0.0 } } }
            }
        ]
    }"#;

    #[test]
    fn test_parse_applies_defaults() {
        let config = ScenarioConfig::from_json(SCENARIO).unwrap();
        assert_eq!(config.duration, 1.0);
        assert_eq!(config.motors[0].constants, MotorConstant::default());
        assert_eq!(config.motors[1].constants.viscous_friction, 0.2);
        assert_eq!(config.motors[1].constants.resistance, 1.0);
        assert_eq!(config.motors[1].duration, Some(2.0));
        assert_eq!(
            config.robots[2].task,
            RobotTask::Run(RobotCommand::Homing {
                target: Vector2D::new(5.0, 0.0),
                gains: HomingGains::default(),
            })
        );
    }

    #[test]
    fn test_run_scenario() {
        let outcome = ScenarioConfig::from_json(SCENARIO).unwrap().run().unwrap();

        assert_eq!(outcome.motor_times["m"].len(), 101);
        assert_eq!(
            outcome.motors.motor("pi").unwrap().angular_velocity().len(),
            outcome.motor_times["pi"].len()
        );

        let g = outcome.robots.robot("g").unwrap().pose();
        assert_abs_diff_eq!(g.position.x, -2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(g.position.y, 3.0, epsilon = 1e-9);
        assert_eq!(outcome.robot_times["r"].len(), 101);
    }

    #[test]
    fn test_duplicate_names_fail() {
        let json = r#"{
            "name": "dup",
            "motors": [
                { "name": "a", "command": { "mode": "open_loop", "voltage": 1.0 } },
                { "name": "a", "command": { "mode": "open_loop", "voltage": 2.0 } }
            ]
        }"#;
        let err = ScenarioConfig::from_json(json).unwrap().run().unwrap_err();
        assert!(matches!(err, ScenarioError::Sim(SimError::DuplicateName { .. })));
    }

    #[test]
    fn test_malformed_scenario() {
        let err = ScenarioConfig::from_json(r#"{ "name": "x", "motors": [ { "name": "a" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ScenarioConfig::from_path("/nonexistent/scenario.json").unwrap_err();
        assert!(matches!(err, ScenarioError::Io(_)));
    }

    #[test]
    fn test_demo_runs() {
        let outcome = ScenarioConfig::demo().run().unwrap();
        assert_eq!(outcome.motors.motors().count(), 4);
        assert_eq!(outcome.robots.robots().count(), 5);
        for robot in outcome.robots.robots() {
            assert_eq!(robot.position().len(), outcome.robot_times[robot.name()].len());
        }
    }
}
